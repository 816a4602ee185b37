use crate::domain::{models::availability::AvailabilityConfig, ports::AvailabilityRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteAvailabilityRepo {
    pool: SqlitePool,
}

impl SqliteAvailabilityRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AvailabilityRepository for SqliteAvailabilityRepo {
    async fn find_by_decorator(&self, decorator_id: &str) -> Result<Option<AvailabilityConfig>, AppError> {
        sqlx::query_as::<_, AvailabilityConfig>(
            "SELECT * FROM availability_configs WHERE decorator_id = ? ORDER BY updated_at DESC LIMIT 1"
        )
            .bind(decorator_id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn upsert(&self, config: &AvailabilityConfig) -> Result<AvailabilityConfig, AppError> {
        sqlx::query_as::<_, AvailabilityConfig>(
            "INSERT INTO availability_configs
                (id, decorator_id, available_days_json, windows_json, intervals_json, max_daily_services, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(decorator_id) DO UPDATE SET
                available_days_json = excluded.available_days_json,
                windows_json = excluded.windows_json,
                intervals_json = excluded.intervals_json,
                max_daily_services = excluded.max_daily_services,
                updated_at = excluded.updated_at
             RETURNING *"
        )
            .bind(&config.id).bind(&config.decorator_id)
            .bind(&config.available_days_json).bind(&config.windows_json).bind(&config.intervals_json)
            .bind(config.max_daily_services).bind(config.created_at).bind(config.updated_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
}
