use std::sync::Arc;
use crate::domain::ports::{
    AuthRepository, AvailabilityRepository, BlockedDateRepository, BudgetRepository,
    EmailService, ImageStore, PageSettingsRepository, PortfolioRepository,
    ProjectCostRepository, UserRepository,
};
use crate::domain::services::auth_service::AuthService;
use crate::domain::services::budget_service::BudgetService;
use crate::config::Config;
use tera::Tera;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub auth_repo: Arc<dyn AuthRepository>,
    pub availability_repo: Arc<dyn AvailabilityRepository>,
    pub blocked_date_repo: Arc<dyn BlockedDateRepository>,
    pub budget_repo: Arc<dyn BudgetRepository>,
    pub portfolio_repo: Arc<dyn PortfolioRepository>,
    pub cost_repo: Arc<dyn ProjectCostRepository>,
    pub page_repo: Arc<dyn PageSettingsRepository>,
    pub auth_service: Arc<AuthService>,
    pub budget_service: Arc<BudgetService>,
    pub email_service: Arc<dyn EmailService>,
    pub image_store: Arc<dyn ImageStore>,
    pub templates: Arc<Tera>,
}
