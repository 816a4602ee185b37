use crate::domain::models::availability::{IntervalRule, ScheduleWindow};
use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
    pub role: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub remember: bool,
}

#[derive(Deserialize)]
pub struct PasswordResetRequest {
    pub email: String,
}

#[derive(Deserialize)]
pub struct PasswordResetConfirmRequest {
    pub token: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct ApprovalRequest {
    pub approve: bool,
}

#[derive(Deserialize)]
pub struct UpdatePageRequest {
    pub hero_title: Option<String>,
    pub hero_subtitle: Option<String>,
    pub about_html: Option<String>,
    pub primary_color: Option<String>,
    pub logo_url: Option<String>,
}

#[derive(Deserialize)]
pub struct UpsertAvailabilityRequest {
    #[serde(default)]
    pub available_days: Vec<String>,
    #[serde(default)]
    pub windows: Vec<ScheduleWindow>,
    #[serde(default)]
    pub intervals: Vec<IntervalRule>,
    pub max_daily_services: i64,
}

#[derive(Deserialize)]
pub struct CreateBlockedDateRequest {
    pub date: NaiveDate,
    #[serde(default)]
    pub recurring: bool,
    pub reason: String,
}

#[derive(Deserialize)]
pub struct UpdateBudgetRequest {
    pub client_name: Option<String>,
    pub client_email: Option<String>,
    pub client_phone: Option<String>,
    pub event_date: Option<String>,
    pub event_time: Option<String>,
    pub service_type: Option<String>,
    pub tamanho_arco_m: Option<f64>,
    pub event_address: Option<String>,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateBudgetStatusRequest {
    pub status: String,
}

#[derive(Deserialize)]
pub struct UpdatePortfolioItemRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub visible: Option<bool>,
}

#[derive(Deserialize)]
pub struct ReorderPortfolioRequest {
    pub ordered_ids: Vec<String>,
}

#[derive(Deserialize)]
pub struct CreateCostRequest {
    pub description: String,
    pub amount_cents: i64,
}
