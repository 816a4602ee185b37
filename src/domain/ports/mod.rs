use crate::domain::models::{
    auth::{AuthSession, PasswordResetToken, RememberToken},
    availability::AvailabilityConfig,
    blocked_date::BlockedDate,
    budget::Budget,
    page::PageSettings,
    portfolio::PortfolioItem,
    project_cost::ProjectCost,
    user::User,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<User>, AppError>;
    async fn list(&self, role: Option<&str>, status: Option<&str>) -> Result<Vec<User>, AppError>;
    async fn update(&self, user: &User) -> Result<User, AppError>;
    async fn set_status(&self, id: &str, status: &str) -> Result<User, AppError>;
    async fn set_password(&self, id: &str, password_hash: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn create_session(&self, session: &AuthSession) -> Result<(), AppError>;
    async fn find_session(&self, token_hash: &str) -> Result<Option<AuthSession>, AppError>;
    async fn delete_session(&self, token_hash: &str) -> Result<(), AppError>;
    async fn delete_sessions_for_user(&self, user_id: &str) -> Result<(), AppError>;

    async fn create_remember_token(&self, token: &RememberToken) -> Result<(), AppError>;
    async fn find_remember_token(&self, token_hash: &str) -> Result<Option<RememberToken>, AppError>;
    async fn delete_remember_token(&self, token_hash: &str) -> Result<(), AppError>;
    /// Atomically burns the old remember token and installs its replacement
    /// together with a fresh session.
    async fn rotate_remember_token(
        &self,
        old_token_hash: &str,
        new_token: &RememberToken,
        new_session: &AuthSession,
    ) -> Result<(), AppError>;

    async fn create_reset_token(&self, token: &PasswordResetToken) -> Result<(), AppError>;
    async fn find_reset_token(&self, token_hash: &str) -> Result<Option<PasswordResetToken>, AppError>;
    /// Marks the token used and swaps the user's password in one transaction.
    async fn consume_reset_token(&self, token_hash: &str, user_id: &str, password_hash: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    async fn find_by_decorator(&self, decorator_id: &str) -> Result<Option<AvailabilityConfig>, AppError>;
    async fn upsert(&self, config: &AvailabilityConfig) -> Result<AvailabilityConfig, AppError>;
}

#[async_trait]
pub trait BlockedDateRepository: Send + Sync {
    async fn create(&self, blocked: &BlockedDate) -> Result<BlockedDate, AppError>;
    async fn list_by_decorator(&self, decorator_id: &str) -> Result<Vec<BlockedDate>, AppError>;
    async fn delete(&self, decorator_id: &str, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait BudgetRepository: Send + Sync {
    async fn create(&self, budget: &Budget) -> Result<Budget, AppError>;
    async fn find_by_id(&self, decorator_id: &str, id: &str) -> Result<Option<Budget>, AppError>;
    async fn list_by_decorator(&self, decorator_id: &str, status: Option<&str>) -> Result<Vec<Budget>, AppError>;
    /// Countable (pendente/aprovado) budgets on one calendar date.
    async fn list_countable_by_date(&self, decorator_id: &str, date: NaiveDate) -> Result<Vec<Budget>, AppError>;
    async fn update(&self, budget: &Budget) -> Result<Budget, AppError>;
    async fn set_status(&self, decorator_id: &str, id: &str, status: &str) -> Result<Budget, AppError>;
    async fn delete(&self, decorator_id: &str, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait PortfolioRepository: Send + Sync {
    async fn create(&self, item: &PortfolioItem) -> Result<PortfolioItem, AppError>;
    async fn find_by_id(&self, decorator_id: &str, id: &str) -> Result<Option<PortfolioItem>, AppError>;
    async fn list_by_decorator(&self, decorator_id: &str, only_visible: bool) -> Result<Vec<PortfolioItem>, AppError>;
    async fn update(&self, item: &PortfolioItem) -> Result<PortfolioItem, AppError>;
    async fn reorder(&self, decorator_id: &str, ordered_ids: &[String]) -> Result<(), AppError>;
    async fn delete(&self, decorator_id: &str, id: &str) -> Result<(), AppError>;
    async fn max_position(&self, decorator_id: &str) -> Result<i64, AppError>;
}

#[async_trait]
pub trait ProjectCostRepository: Send + Sync {
    async fn create(&self, cost: &ProjectCost) -> Result<ProjectCost, AppError>;
    async fn list_by_budget(&self, budget_id: &str) -> Result<Vec<ProjectCost>, AppError>;
    async fn delete(&self, decorator_id: &str, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait PageSettingsRepository: Send + Sync {
    async fn get(&self) -> Result<PageSettings, AppError>;
    async fn update(&self, settings: &PageSettings) -> Result<PageSettings, AppError>;
}

#[async_trait]
pub trait EmailService: Send + Sync {
    async fn send(&self, recipient: &str, subject: &str, html_body: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Persists the bytes and returns the stored relative path.
    async fn store(&self, filename: &str, bytes: &[u8]) -> Result<String, AppError>;
    async fn remove(&self, path: &str) -> Result<(), AppError>;
}
