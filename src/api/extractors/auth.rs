use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use crate::api::handlers::auth::set_auth_cookies;
use crate::domain::models::user::{User, ROLE_ADMIN, ROLE_DECORATOR};
use crate::state::AppState;
use std::sync::Arc;
use tower_cookies::Cookies;
use tracing::Span;

pub const SESSION_COOKIE: &str = "session_token";
pub const REMEMBER_COOKIE: &str = "remember_token";

pub struct AuthUser(pub User);

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let cookies = parts.extensions.get::<Cookies>()
            .ok_or(StatusCode::INTERNAL_SERVER_ERROR)?
            .clone();

        let mut user_id: Option<String> = None;
        let mut csrf_required: Option<String> = None;

        if let Some(cookie) = cookies.get(SESSION_COOKIE) {
            let session = state.auth_service.authenticate(cookie.value()).await
                .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
            if let Some(session) = session {
                csrf_required = Some(session.csrf_token.clone());
                user_id = Some(session.user_id);
            }
        }

        // Fall back to the remember cookie: single-use, rotated together
        // with a fresh session. The new pair goes straight onto the response.
        if user_id.is_none() {
            if let Some(cookie) = cookies.get(REMEMBER_COOKIE) {
                let revived = state.auth_service.revive(cookie.value()).await
                    .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
                if let Some((issued, revived_user_id)) = revived {
                    set_auth_cookies(&cookies, &issued.session_token, issued.remember_token.as_deref());
                    user_id = Some(revived_user_id);
                }
            }
        }

        let user_id = user_id.ok_or(StatusCode::UNAUTHORIZED)?;

        // CSRF only guards live sessions; a remember-token revival arrives
        // before the client has seen its csrf value.
        if let Some(expected) = csrf_required {
            let method = &parts.method;
            if method != "GET" && method != "HEAD" && method != "OPTIONS" {
                let header_val = parts.headers.get("X-CSRF-Token")
                    .ok_or(StatusCode::FORBIDDEN)?
                    .to_str()
                    .map_err(|_| StatusCode::FORBIDDEN)?;
                if header_val != expected {
                    return Err(StatusCode::FORBIDDEN);
                }
            }
        }

        let user = state.user_repo.find_by_id(&user_id).await
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
            .ok_or(StatusCode::UNAUTHORIZED)?;

        if !user.is_approved() {
            return Err(StatusCode::FORBIDDEN);
        }

        Span::current().record("user_id", &user.id);

        Ok(AuthUser(user))
    }
}

pub struct Decorator(pub User);

impl FromRequestParts<Arc<AppState>> for Decorator {
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_DECORATOR {
            return Err(StatusCode::FORBIDDEN);
        }
        Ok(Decorator(user))
    }
}

pub struct Admin(pub User);

impl FromRequestParts<Arc<AppState>> for Admin {
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN {
            return Err(StatusCode::FORBIDDEN);
        }
        Ok(Admin(user))
    }
}
