use crate::domain::{models::user::User, ports::UserRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

pub struct SqliteUserRepo {
    pool: SqlitePool,
}

impl SqliteUserRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepo {
    async fn create(&self, user: &User) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, name, email, phone, password_hash, role, status, slug, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&user.id).bind(&user.name).bind(&user.email).bind(&user.phone)
            .bind(&user.password_hash).bind(&user.role).bind(&user.status).bind(&user.slug)
            .bind(user.created_at).bind(user.updated_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE slug = ?")
            .bind(slug).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self, role: Option<&str>, status: Option<&str>) -> Result<Vec<User>, AppError> {
        match (role, status) {
            (Some(role), Some(status)) => {
                sqlx::query_as::<_, User>("SELECT * FROM users WHERE role = ? AND status = ? ORDER BY created_at ASC")
                    .bind(role).bind(status).fetch_all(&self.pool).await.map_err(AppError::Database)
            }
            (Some(role), None) => {
                sqlx::query_as::<_, User>("SELECT * FROM users WHERE role = ? ORDER BY created_at ASC")
                    .bind(role).fetch_all(&self.pool).await.map_err(AppError::Database)
            }
            (None, Some(status)) => {
                sqlx::query_as::<_, User>("SELECT * FROM users WHERE status = ? ORDER BY created_at ASC")
                    .bind(status).fetch_all(&self.pool).await.map_err(AppError::Database)
            }
            (None, None) => {
                sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at ASC")
                    .fetch_all(&self.pool).await.map_err(AppError::Database)
            }
        }
    }

    async fn update(&self, user: &User) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET name=?, email=?, phone=?, slug=?, updated_at=?
             WHERE id=?
             RETURNING *"
        )
            .bind(&user.name).bind(&user.email).bind(&user.phone).bind(&user.slug)
            .bind(Utc::now()).bind(&user.id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn set_status(&self, id: &str, status: &str) -> Result<User, AppError> {
        sqlx::query_as::<_, User>("UPDATE users SET status = ?, updated_at = ? WHERE id = ? RETURNING *")
            .bind(status).bind(Utc::now()).bind(id)
            .fetch_one(&self.pool).await.map_err(|e| match e {
                sqlx::Error::RowNotFound => AppError::NotFound("User not found".into()),
                other => AppError::Database(other),
            })
    }

    async fn set_password(&self, id: &str, password_hash: &str) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE users SET password_hash = ?, updated_at = ? WHERE id = ?")
            .bind(password_hash).bind(Utc::now()).bind(id)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("User not found".into()));
        }
        Ok(())
    }
}
