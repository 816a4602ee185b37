use crate::domain::{models::budget::Budget, ports::BudgetRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;

pub struct SqliteBudgetRepo {
    pool: SqlitePool,
}

impl SqliteBudgetRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BudgetRepository for SqliteBudgetRepo {
    async fn create(&self, budget: &Budget) -> Result<Budget, AppError> {
        sqlx::query_as::<_, Budget>(
            "INSERT INTO budgets
                (id, decorator_id, client_name, client_email, client_phone, event_date, event_time,
                 service_type, tamanho_arco_m, event_address, notes, image_path, status, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&budget.id).bind(&budget.decorator_id)
            .bind(&budget.client_name).bind(&budget.client_email).bind(&budget.client_phone)
            .bind(budget.event_date).bind(budget.event_time)
            .bind(&budget.service_type).bind(budget.tamanho_arco_m)
            .bind(&budget.event_address).bind(&budget.notes).bind(&budget.image_path)
            .bind(&budget.status).bind(budget.created_at).bind(budget.updated_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, decorator_id: &str, id: &str) -> Result<Option<Budget>, AppError> {
        sqlx::query_as::<_, Budget>("SELECT * FROM budgets WHERE decorator_id = ? AND id = ?")
            .bind(decorator_id).bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_decorator(&self, decorator_id: &str, status: Option<&str>) -> Result<Vec<Budget>, AppError> {
        match status {
            Some(status) => {
                sqlx::query_as::<_, Budget>(
                    "SELECT * FROM budgets WHERE decorator_id = ? AND status = ? ORDER BY event_date ASC, event_time ASC"
                )
                    .bind(decorator_id).bind(status).fetch_all(&self.pool).await.map_err(AppError::Database)
            }
            None => {
                sqlx::query_as::<_, Budget>(
                    "SELECT * FROM budgets WHERE decorator_id = ? ORDER BY event_date ASC, event_time ASC"
                )
                    .bind(decorator_id).fetch_all(&self.pool).await.map_err(AppError::Database)
            }
        }
    }

    async fn list_countable_by_date(&self, decorator_id: &str, date: NaiveDate) -> Result<Vec<Budget>, AppError> {
        sqlx::query_as::<_, Budget>(
            "SELECT * FROM budgets
             WHERE decorator_id = ? AND event_date = ? AND status IN ('pendente', 'aprovado')
             ORDER BY event_time ASC"
        )
            .bind(decorator_id).bind(date).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, budget: &Budget) -> Result<Budget, AppError> {
        sqlx::query_as::<_, Budget>(
            "UPDATE budgets SET
                client_name=?, client_email=?, client_phone=?, event_date=?, event_time=?,
                service_type=?, tamanho_arco_m=?, event_address=?, notes=?, image_path=?, updated_at=?
             WHERE id=? AND decorator_id=?
             RETURNING *"
        )
            .bind(&budget.client_name).bind(&budget.client_email).bind(&budget.client_phone)
            .bind(budget.event_date).bind(budget.event_time)
            .bind(&budget.service_type).bind(budget.tamanho_arco_m)
            .bind(&budget.event_address).bind(&budget.notes).bind(&budget.image_path)
            .bind(Utc::now())
            .bind(&budget.id).bind(&budget.decorator_id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn set_status(&self, decorator_id: &str, id: &str, status: &str) -> Result<Budget, AppError> {
        sqlx::query_as::<_, Budget>(
            "UPDATE budgets SET status = ?, updated_at = ? WHERE id = ? AND decorator_id = ? RETURNING *"
        )
            .bind(status).bind(Utc::now()).bind(id).bind(decorator_id)
            .fetch_one(&self.pool).await.map_err(|e| match e {
                sqlx::Error::RowNotFound => AppError::NotFound("Budget not found".into()),
                other => AppError::Database(other),
            })
    }

    async fn delete(&self, decorator_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM budgets WHERE id = ? AND decorator_id = ?")
            .bind(id).bind(decorator_id)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Budget not found".into()));
        }
        Ok(())
    }
}
