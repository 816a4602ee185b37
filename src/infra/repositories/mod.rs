pub mod sqlite_auth_repo;
pub mod sqlite_availability_repo;
pub mod sqlite_blocked_date_repo;
pub mod sqlite_budget_repo;
pub mod sqlite_page_repo;
pub mod sqlite_portfolio_repo;
pub mod sqlite_project_cost_repo;
pub mod sqlite_user_repo;
