use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Datelike, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct BlockedDate {
    pub id: String,
    pub decorator_id: String,
    pub date: NaiveDate,
    pub recurring: bool,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

impl BlockedDate {
    pub fn new(decorator_id: String, date: NaiveDate, recurring: bool, reason: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            decorator_id,
            date,
            recurring,
            reason,
            created_at: Utc::now(),
        }
    }

    /// Recurring blocks match on month and day every year.
    pub fn matches(&self, date: NaiveDate) -> bool {
        if self.recurring {
            self.date.month() == date.month() && self.date.day() == date.day()
        } else {
            self.date == date
        }
    }
}
