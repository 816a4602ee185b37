use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct PortfolioItem {
    pub id: String,
    pub decorator_id: String,
    pub title: String,
    pub description: Option<String>,
    pub image_path: Option<String>,
    pub position: i64,
    pub visible: bool,
    pub created_at: DateTime<Utc>,
}

impl PortfolioItem {
    pub fn new(decorator_id: String, title: String, description: Option<String>, position: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            decorator_id,
            title,
            description,
            image_path: None,
            position,
            visible: true,
            created_at: Utc::now(),
        }
    }
}
