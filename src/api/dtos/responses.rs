use crate::domain::models::availability::{IntervalRule, ScheduleWindow};
use crate::domain::models::page::PageSettings;
use crate::domain::models::portfolio::PortfolioItem;
use crate::domain::models::project_cost::ProjectCost;
use serde::Serialize;

#[derive(Serialize)]
pub struct AvailabilityResponse {
    pub available_days: Vec<String>,
    pub windows: Vec<ScheduleWindow>,
    pub intervals: Vec<IntervalRule>,
    pub max_daily_services: i64,
}

#[derive(Serialize)]
pub struct CostListResponse {
    pub costs: Vec<ProjectCost>,
    pub total_cents: i64,
}

#[derive(Serialize)]
pub struct PublicProfileResponse {
    pub name: String,
    pub slug: String,
    pub phone: Option<String>,
    pub portfolio: Vec<PortfolioItem>,
    pub page: PageSettings,
}
