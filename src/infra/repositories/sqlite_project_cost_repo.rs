use crate::domain::{models::project_cost::ProjectCost, ports::ProjectCostRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteProjectCostRepo {
    pool: SqlitePool,
}

impl SqliteProjectCostRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectCostRepository for SqliteProjectCostRepo {
    async fn create(&self, cost: &ProjectCost) -> Result<ProjectCost, AppError> {
        sqlx::query_as::<_, ProjectCost>(
            "INSERT INTO project_costs (id, budget_id, decorator_id, description, amount_cents, created_at)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&cost.id).bind(&cost.budget_id).bind(&cost.decorator_id)
            .bind(&cost.description).bind(cost.amount_cents).bind(cost.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_budget(&self, budget_id: &str) -> Result<Vec<ProjectCost>, AppError> {
        sqlx::query_as::<_, ProjectCost>("SELECT * FROM project_costs WHERE budget_id = ? ORDER BY created_at ASC")
            .bind(budget_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete(&self, decorator_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM project_costs WHERE id = ? AND decorator_id = ?")
            .bind(id).bind(decorator_id)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Cost entry not found".into()));
        }
        Ok(())
    }
}
