use crate::domain::models::page::{PageSettings, PAGE_SETTINGS_ID};
use crate::domain::ports::PageSettingsRepository;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

pub struct SqlitePageRepo {
    pool: SqlitePool,
}

impl SqlitePageRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PageSettingsRepository for SqlitePageRepo {
    async fn get(&self) -> Result<PageSettings, AppError> {
        sqlx::query_as::<_, PageSettings>("SELECT * FROM page_settings WHERE id = ?")
            .bind(PAGE_SETTINGS_ID)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, settings: &PageSettings) -> Result<PageSettings, AppError> {
        sqlx::query_as::<_, PageSettings>(
            "UPDATE page_settings SET hero_title=?, hero_subtitle=?, about_html=?, primary_color=?, logo_url=?, updated_at=?
             WHERE id=?
             RETURNING *"
        )
            .bind(&settings.hero_title).bind(&settings.hero_subtitle).bind(&settings.about_html)
            .bind(&settings.primary_color).bind(&settings.logo_url).bind(Utc::now())
            .bind(PAGE_SETTINGS_ID)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
}
