use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A working window for one weekday, times as "HH:MM" strings.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ScheduleWindow {
    pub day: String,
    pub start: String,
    pub end: String,
}

pub const INTERVAL_UNIT_MINUTES: &str = "minutes";
pub const INTERVAL_UNIT_HOURS: &str = "hours";

/// Minimum spacing between two services on one weekday.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct IntervalRule {
    pub day: String,
    pub interval: i64,
    pub unit: String,
}

impl IntervalRule {
    pub fn minutes(&self) -> i64 {
        match self.unit.as_str() {
            INTERVAL_UNIT_HOURS => self.interval * 60,
            _ => self.interval,
        }
    }
}

/// One row per decorator; day-keyed collections live in JSON columns.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct AvailabilityConfig {
    pub id: String,
    pub decorator_id: String,
    pub available_days_json: String,
    pub windows_json: String,
    pub intervals_json: String,
    pub max_daily_services: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewAvailabilityParams {
    pub decorator_id: String,
    pub available_days: Vec<String>,
    pub windows: Vec<ScheduleWindow>,
    pub intervals: Vec<IntervalRule>,
    pub max_daily_services: i64,
}

impl AvailabilityConfig {
    pub fn new(params: NewAvailabilityParams) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            decorator_id: params.decorator_id,
            available_days_json: serde_json::to_string(&params.available_days)
                .unwrap_or_else(|_| "[]".to_string()),
            windows_json: serde_json::to_string(&params.windows)
                .unwrap_or_else(|_| "[]".to_string()),
            intervals_json: serde_json::to_string(&params.intervals)
                .unwrap_or_else(|_| "[]".to_string()),
            max_daily_services: params.max_daily_services,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn available_days(&self) -> Vec<String> {
        serde_json::from_str(&self.available_days_json).unwrap_or_default()
    }

    pub fn windows(&self) -> Vec<ScheduleWindow> {
        serde_json::from_str(&self.windows_json).unwrap_or_default()
    }

    pub fn interval_rules(&self) -> Vec<IntervalRule> {
        serde_json::from_str(&self.intervals_json).unwrap_or_default()
    }
}
