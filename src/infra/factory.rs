use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{ConnectOptions, SqlitePool};
use tracing::info;
use tracing::log::LevelFilter;
use tera::Tera;

use crate::config::Config;
use crate::state::AppState;
use crate::domain::services::auth_service::AuthService;
use crate::domain::services::budget_service::BudgetService;
use crate::infra::email::http_email_service::HttpEmailService;
use crate::infra::storage::LocalImageStore;
use crate::infra::repositories::{
    sqlite_auth_repo::SqliteAuthRepo, sqlite_availability_repo::SqliteAvailabilityRepo,
    sqlite_blocked_date_repo::SqliteBlockedDateRepo, sqlite_budget_repo::SqliteBudgetRepo,
    sqlite_page_repo::SqlitePageRepo, sqlite_portfolio_repo::SqlitePortfolioRepo,
    sqlite_project_cost_repo::SqliteProjectCostRepo, sqlite_user_repo::SqliteUserRepo,
};

pub fn load_templates() -> Tera {
    let mut tera = Tera::default();
    tera.add_raw_template("password_reset.html", include_str!("../templates/password_reset.html"))
        .expect("Failed to load password reset template");
    tera.add_raw_template("account_decision.html", include_str!("../templates/account_decision.html"))
        .expect("Failed to load account decision template");
    tera
}

pub async fn bootstrap_state(config: &Config) -> AppState {
    info!("Initializing SQLite connection with WAL Mode...");

    let opts = SqliteConnectOptions::from_str(&config.database_url)
        .expect("Invalid SQLite connection string")
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .log_statements(LevelFilter::Debug)
        .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(opts)
        .await
        .expect("Failed to connect to SQLite");

    run_migrations(&pool).await;

    let auth_repo = Arc::new(SqliteAuthRepo::new(pool.clone()));
    let auth_service = Arc::new(AuthService::new(auth_repo.clone()));

    let availability_repo = Arc::new(SqliteAvailabilityRepo::new(pool.clone()));
    let blocked_date_repo = Arc::new(SqliteBlockedDateRepo::new(pool.clone()));
    let budget_repo = Arc::new(SqliteBudgetRepo::new(pool.clone()));
    let image_store = Arc::new(LocalImageStore::new(config.upload_dir.clone()));

    let budget_service = Arc::new(BudgetService::new(
        budget_repo.clone(),
        availability_repo.clone(),
        blocked_date_repo.clone(),
        image_store.clone(),
    ));

    let email_service = Arc::new(HttpEmailService::new(
        config.mail_service_url.clone(),
        config.mail_service_token.clone(),
    ));

    AppState {
        config: config.clone(),
        user_repo: Arc::new(SqliteUserRepo::new(pool.clone())),
        auth_repo,
        availability_repo,
        blocked_date_repo,
        budget_repo,
        portfolio_repo: Arc::new(SqlitePortfolioRepo::new(pool.clone())),
        cost_repo: Arc::new(SqliteProjectCostRepo::new(pool.clone())),
        page_repo: Arc::new(SqlitePageRepo::new(pool.clone())),
        auth_service,
        budget_service,
        email_service,
        image_store,
        templates: Arc::new(load_templates()),
    }
}

async fn run_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run migrations");
}
