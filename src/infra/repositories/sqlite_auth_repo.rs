use crate::domain::models::auth::{AuthSession, PasswordResetToken, RememberToken};
use crate::domain::ports::AuthRepository;
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteAuthRepo {
    pool: SqlitePool,
}

impl SqliteAuthRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthRepository for SqliteAuthRepo {
    async fn create_session(&self, session: &AuthSession) -> Result<(), AppError> {
        sqlx::query("INSERT INTO auth_sessions (token_hash, user_id, csrf_token, expires_at, created_at) VALUES (?, ?, ?, ?, ?)")
            .bind(&session.token_hash).bind(&session.user_id).bind(&session.csrf_token)
            .bind(session.expires_at).bind(session.created_at)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(())
    }

    async fn find_session(&self, token_hash: &str) -> Result<Option<AuthSession>, AppError> {
        sqlx::query_as::<_, AuthSession>("SELECT * FROM auth_sessions WHERE token_hash = ?")
            .bind(token_hash).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete_session(&self, token_hash: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM auth_sessions WHERE token_hash = ?")
            .bind(token_hash).execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(())
    }

    async fn delete_sessions_for_user(&self, user_id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM auth_sessions WHERE user_id = ?")
            .bind(user_id).execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(())
    }

    async fn create_remember_token(&self, token: &RememberToken) -> Result<(), AppError> {
        sqlx::query("INSERT INTO remember_tokens (token_hash, user_id, expires_at, created_at) VALUES (?, ?, ?, ?)")
            .bind(&token.token_hash).bind(&token.user_id).bind(token.expires_at).bind(token.created_at)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(())
    }

    async fn find_remember_token(&self, token_hash: &str) -> Result<Option<RememberToken>, AppError> {
        sqlx::query_as::<_, RememberToken>("SELECT * FROM remember_tokens WHERE token_hash = ?")
            .bind(token_hash).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete_remember_token(&self, token_hash: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM remember_tokens WHERE token_hash = ?")
            .bind(token_hash).execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(())
    }

    async fn rotate_remember_token(
        &self,
        old_token_hash: &str,
        new_token: &RememberToken,
        new_session: &AuthSession,
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let result = sqlx::query("DELETE FROM remember_tokens WHERE token_hash = ?")
            .bind(old_token_hash).execute(&mut *tx).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            // Someone already burned this token; do not mint a replacement.
            return Err(AppError::Unauthorized);
        }

        sqlx::query("INSERT INTO remember_tokens (token_hash, user_id, expires_at, created_at) VALUES (?, ?, ?, ?)")
            .bind(&new_token.token_hash).bind(&new_token.user_id)
            .bind(new_token.expires_at).bind(new_token.created_at)
            .execute(&mut *tx).await.map_err(AppError::Database)?;

        sqlx::query("INSERT INTO auth_sessions (token_hash, user_id, csrf_token, expires_at, created_at) VALUES (?, ?, ?, ?, ?)")
            .bind(&new_session.token_hash).bind(&new_session.user_id).bind(&new_session.csrf_token)
            .bind(new_session.expires_at).bind(new_session.created_at)
            .execute(&mut *tx).await.map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(())
    }

    async fn create_reset_token(&self, token: &PasswordResetToken) -> Result<(), AppError> {
        sqlx::query("INSERT INTO password_reset_tokens (token_hash, user_id, used, expires_at, created_at) VALUES (?, ?, ?, ?, ?)")
            .bind(&token.token_hash).bind(&token.user_id).bind(token.used)
            .bind(token.expires_at).bind(token.created_at)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(())
    }

    async fn find_reset_token(&self, token_hash: &str) -> Result<Option<PasswordResetToken>, AppError> {
        sqlx::query_as::<_, PasswordResetToken>("SELECT * FROM password_reset_tokens WHERE token_hash = ?")
            .bind(token_hash).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn consume_reset_token(&self, token_hash: &str, user_id: &str, password_hash: &str) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let result = sqlx::query("UPDATE password_reset_tokens SET used = 1 WHERE token_hash = ? AND used = 0")
            .bind(token_hash).execute(&mut *tx).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::Unauthorized);
        }

        sqlx::query("UPDATE users SET password_hash = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?")
            .bind(password_hash).bind(user_id)
            .execute(&mut *tx).await.map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(())
    }
}
