use crate::domain::{models::portfolio::PortfolioItem, ports::PortfolioRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

pub struct SqlitePortfolioRepo {
    pool: SqlitePool,
}

impl SqlitePortfolioRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PortfolioRepository for SqlitePortfolioRepo {
    async fn create(&self, item: &PortfolioItem) -> Result<PortfolioItem, AppError> {
        sqlx::query_as::<_, PortfolioItem>(
            "INSERT INTO portfolio_items (id, decorator_id, title, description, image_path, position, visible, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&item.id).bind(&item.decorator_id).bind(&item.title).bind(&item.description)
            .bind(&item.image_path).bind(item.position).bind(item.visible).bind(item.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, decorator_id: &str, id: &str) -> Result<Option<PortfolioItem>, AppError> {
        sqlx::query_as::<_, PortfolioItem>("SELECT * FROM portfolio_items WHERE decorator_id = ? AND id = ?")
            .bind(decorator_id).bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_decorator(&self, decorator_id: &str, only_visible: bool) -> Result<Vec<PortfolioItem>, AppError> {
        if only_visible {
            sqlx::query_as::<_, PortfolioItem>(
                "SELECT * FROM portfolio_items WHERE decorator_id = ? AND visible = 1 ORDER BY position ASC, created_at ASC"
            )
                .bind(decorator_id).fetch_all(&self.pool).await.map_err(AppError::Database)
        } else {
            sqlx::query_as::<_, PortfolioItem>(
                "SELECT * FROM portfolio_items WHERE decorator_id = ? ORDER BY position ASC, created_at ASC"
            )
                .bind(decorator_id).fetch_all(&self.pool).await.map_err(AppError::Database)
        }
    }

    async fn update(&self, item: &PortfolioItem) -> Result<PortfolioItem, AppError> {
        sqlx::query_as::<_, PortfolioItem>(
            "UPDATE portfolio_items SET title=?, description=?, image_path=?, visible=?
             WHERE id=? AND decorator_id=?
             RETURNING *"
        )
            .bind(&item.title).bind(&item.description).bind(&item.image_path).bind(item.visible)
            .bind(&item.id).bind(&item.decorator_id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn reorder(&self, decorator_id: &str, ordered_ids: &[String]) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        for (position, id) in ordered_ids.iter().enumerate() {
            sqlx::query("UPDATE portfolio_items SET position = ? WHERE id = ? AND decorator_id = ?")
                .bind(position as i64).bind(id).bind(decorator_id)
                .execute(&mut *tx).await.map_err(AppError::Database)?;
        }
        tx.commit().await.map_err(AppError::Database)?;
        Ok(())
    }

    async fn delete(&self, decorator_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM portfolio_items WHERE id = ? AND decorator_id = ?")
            .bind(id).bind(decorator_id)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Portfolio item not found".into()));
        }
        Ok(())
    }

    async fn max_position(&self, decorator_id: &str) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COALESCE(MAX(position), -1) as max_pos FROM portfolio_items WHERE decorator_id = ?")
            .bind(decorator_id).fetch_one(&self.pool).await.map_err(AppError::Database)?;
        Ok(row.get::<i64, _>("max_pos"))
    }
}
