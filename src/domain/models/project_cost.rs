use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct ProjectCost {
    pub id: String,
    pub budget_id: String,
    pub decorator_id: String,
    pub description: String,
    pub amount_cents: i64,
    pub created_at: DateTime<Utc>,
}

impl ProjectCost {
    pub fn new(budget_id: String, decorator_id: String, description: String, amount_cents: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            budget_id,
            decorator_id,
            description,
            amount_cents,
            created_at: Utc::now(),
        }
    }
}
