use std::sync::Arc;
use crate::domain::models::auth::{AuthSession, PasswordResetToken, RememberToken};
use crate::domain::ports::AuthRepository;
use crate::error::AppError;
use chrono::{Duration, Utc};
use rand::{distributions::Alphanumeric, Rng};
use sha2::{Digest, Sha256};

const SESSION_TTL_HOURS: i64 = 24;
const REMEMBER_TTL_DAYS: i64 = 30;
const RESET_TTL_HOURS: i64 = 2;

/// Raw cookie values handed back to the client after a successful login.
pub struct IssuedSession {
    pub session_token: String,
    pub csrf_token: String,
    pub remember_token: Option<String>,
}

pub struct AuthService {
    repo: Arc<dyn AuthRepository>,
}

impl AuthService {
    pub fn new(repo: Arc<dyn AuthRepository>) -> Self {
        Self { repo }
    }

    pub async fn login(&self, user_id: &str, remember: bool) -> Result<IssuedSession, AppError> {
        let (session_token, session) = self.build_session(user_id);
        self.repo.create_session(&session).await?;

        let remember_token = if remember {
            let raw = random_token(64);
            let record = RememberToken {
                token_hash: self.hash_token(&raw),
                user_id: user_id.to_string(),
                expires_at: Utc::now() + Duration::days(REMEMBER_TTL_DAYS),
                created_at: Utc::now(),
            };
            self.repo.create_remember_token(&record).await?;
            Some(raw)
        } else {
            None
        };

        Ok(IssuedSession {
            session_token,
            csrf_token: session.csrf_token,
            remember_token,
        })
    }

    /// Resolves a raw session cookie to its live session record. Expired
    /// sessions are reaped on sight.
    pub async fn authenticate(&self, raw_session_token: &str) -> Result<Option<AuthSession>, AppError> {
        let token_hash = self.hash_token(raw_session_token);
        let Some(session) = self.repo.find_session(&token_hash).await? else {
            return Ok(None);
        };

        if session.expires_at < Utc::now() {
            self.repo.delete_session(&token_hash).await?;
            return Ok(None);
        }

        Ok(Some(session))
    }

    /// Revives a login from a remember-token cookie. The token is single-use:
    /// the old record is burned and replaced together with a fresh session in
    /// one transaction.
    pub async fn revive(&self, raw_remember_token: &str) -> Result<Option<(IssuedSession, String)>, AppError> {
        let old_hash = self.hash_token(raw_remember_token);
        let Some(record) = self.repo.find_remember_token(&old_hash).await? else {
            return Ok(None);
        };

        if record.expires_at < Utc::now() {
            self.repo.delete_remember_token(&old_hash).await?;
            return Ok(None);
        }

        let (session_token, session) = self.build_session(&record.user_id);
        let new_raw = random_token(64);
        let new_record = RememberToken {
            token_hash: self.hash_token(&new_raw),
            user_id: record.user_id.clone(),
            expires_at: Utc::now() + Duration::days(REMEMBER_TTL_DAYS),
            created_at: Utc::now(),
        };

        self.repo
            .rotate_remember_token(&old_hash, &new_record, &session)
            .await?;

        let issued = IssuedSession {
            session_token,
            csrf_token: session.csrf_token,
            remember_token: Some(new_raw),
        };
        Ok(Some((issued, record.user_id)))
    }

    pub async fn logout(
        &self,
        raw_session_token: Option<&str>,
        raw_remember_token: Option<&str>,
    ) -> Result<(), AppError> {
        if let Some(raw) = raw_session_token {
            self.repo.delete_session(&self.hash_token(raw)).await?;
        }
        if let Some(raw) = raw_remember_token {
            self.repo.delete_remember_token(&self.hash_token(raw)).await?;
        }
        Ok(())
    }

    pub async fn issue_reset_token(&self, user_id: &str) -> Result<String, AppError> {
        let raw = random_token(48);
        let record = PasswordResetToken {
            token_hash: self.hash_token(&raw),
            user_id: user_id.to_string(),
            used: false,
            expires_at: Utc::now() + Duration::hours(RESET_TTL_HOURS),
            created_at: Utc::now(),
        };
        self.repo.create_reset_token(&record).await?;
        Ok(raw)
    }

    pub async fn reset_password(&self, raw_token: &str, password_hash: &str) -> Result<(), AppError> {
        let token_hash = self.hash_token(raw_token);
        let record = self
            .repo
            .find_reset_token(&token_hash)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if record.used || record.expires_at < Utc::now() {
            return Err(AppError::Unauthorized);
        }

        self.repo
            .consume_reset_token(&token_hash, &record.user_id, password_hash)
            .await?;

        // A password change invalidates every open session.
        self.repo.delete_sessions_for_user(&record.user_id).await
    }

    fn build_session(&self, user_id: &str) -> (String, AuthSession) {
        let raw = random_token(64);
        let session = AuthSession {
            token_hash: self.hash_token(&raw),
            user_id: user_id.to_string(),
            csrf_token: random_token(32),
            expires_at: Utc::now() + Duration::hours(SESSION_TTL_HOURS),
            created_at: Utc::now(),
        };
        (raw, session)
    }

    pub fn hash_token(&self, token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        hex::encode(hasher.finalize())
    }
}

fn random_token(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
