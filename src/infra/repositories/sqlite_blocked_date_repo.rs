use crate::domain::{models::blocked_date::BlockedDate, ports::BlockedDateRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteBlockedDateRepo {
    pool: SqlitePool,
}

impl SqliteBlockedDateRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BlockedDateRepository for SqliteBlockedDateRepo {
    async fn create(&self, blocked: &BlockedDate) -> Result<BlockedDate, AppError> {
        sqlx::query_as::<_, BlockedDate>(
            "INSERT INTO blocked_dates (id, decorator_id, date, recurring, reason, created_at)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&blocked.id).bind(&blocked.decorator_id).bind(blocked.date)
            .bind(blocked.recurring).bind(&blocked.reason).bind(blocked.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_decorator(&self, decorator_id: &str) -> Result<Vec<BlockedDate>, AppError> {
        sqlx::query_as::<_, BlockedDate>("SELECT * FROM blocked_dates WHERE decorator_id = ? ORDER BY date ASC")
            .bind(decorator_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete(&self, decorator_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM blocked_dates WHERE id = ? AND decorator_id = ?")
            .bind(id).bind(decorator_id)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Blocked date not found".into()));
        }
        Ok(())
    }
}
