use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Admin-editable landing page content. Single row, fixed id.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct PageSettings {
    pub id: String,
    pub hero_title: String,
    pub hero_subtitle: String,
    pub about_html: String,
    pub primary_color: String,
    pub logo_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

pub const PAGE_SETTINGS_ID: &str = "default";
