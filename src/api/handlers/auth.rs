use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use crate::api::dtos::requests::{
    LoginRequest, PasswordResetConfirmRequest, PasswordResetRequest, RegisterRequest,
};
use crate::api::extractors::auth::{AuthUser, REMEMBER_COOKIE, SESSION_COOKIE};
use crate::domain::models::auth::{AuthResponse, UserProfile};
use crate::domain::models::user::{NewUserParams, User, ROLE_DECORATOR, ROLE_USER};
use crate::domain::services::slug::{slugify, with_suffix};
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use argon2::{password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use rand::rngs::OsRng;
use tera::Context;
use time::Duration;
use tower_cookies::{cookie::SameSite, Cookie, Cookies};
use tracing::info;

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.role != ROLE_USER && payload.role != ROLE_DECORATOR {
        return Err(AppError::Validation("Role must be 'user' or 'decorator'".into()));
    }
    if payload.password.len() < 8 {
        return Err(AppError::Validation("Password must have at least 8 characters".into()));
    }
    if state.user_repo.find_by_email(&payload.email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".into()));
    }

    let slug = if payload.role == ROLE_DECORATOR {
        Some(allocate_slug(&state, &payload.name).await?)
    } else {
        None
    };

    let password_hash = hash_password(&payload.password)?;
    let user = User::new(NewUserParams {
        name: payload.name,
        email: payload.email,
        phone: payload.phone,
        password_hash,
        role: payload.role,
        slug,
    });

    let created = state.user_repo.create(&user).await?;
    info!("User registered: {} ({})", created.id, created.role);

    Ok((StatusCode::CREATED, Json(serde_json::json!({
        "id": created.id,
        "name": created.name,
        "email": created.email,
        "role": created.role,
        "status": created.status,
        "slug": created.slug,
    }))))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.user_repo.find_by_email(&payload.email).await?
        .ok_or(AppError::Unauthorized)?;

    let parsed_hash = PasswordHash::new(&user.password_hash)
        .map_err(|_| AppError::Internal)?;

    Argon2::default().verify_password(payload.password.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::Unauthorized)?;

    if !user.is_approved() {
        return Err(AppError::Forbidden("Account is awaiting approval".into()));
    }

    let issued = state.auth_service.login(&user.id, payload.remember).await?;

    set_auth_cookies(&cookies, &issued.session_token, issued.remember_token.as_deref());

    info!("User logged in: {}", user.id);

    Ok(Json(AuthResponse {
        csrf_token: issued.csrf_token,
        user: UserProfile {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            slug: user.slug,
        },
    }))
}

pub async fn logout(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
) -> Result<impl IntoResponse, AppError> {
    let session = cookies.get(SESSION_COOKIE).map(|c| c.value().to_string());
    let remember = cookies.get(REMEMBER_COOKIE).map(|c| c.value().to_string());
    let _ = state.auth_service.logout(session.as_deref(), remember.as_deref()).await;

    cookies.remove(Cookie::build((SESSION_COOKIE, "")).path("/").into());
    cookies.remove(Cookie::build((REMEMBER_COOKIE, "")).path("/").into());

    info!("User logged out");

    Ok(StatusCode::OK)
}

pub async fn me(user: AuthUser) -> Result<impl IntoResponse, AppError> {
    let user = user.0;
    Ok(Json(UserProfile {
        id: user.id,
        name: user.name,
        email: user.email,
        role: user.role,
        slug: user.slug,
    }))
}

pub async fn request_password_reset(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<PasswordResetRequest>,
) -> Result<impl IntoResponse, AppError> {
    // Always answer 200 so the endpoint cannot be used to probe for accounts.
    if let Some(user) = state.user_repo.find_by_email(&payload.email).await? {
        let token = state.auth_service.issue_reset_token(&user.id).await?;

        let reset_url = format!(
            "{}/reset-password?token={}",
            state.config.frontend_base_url, token
        );

        let mut ctx = Context::new();
        ctx.insert("user_name", &user.name);
        ctx.insert("reset_url", &reset_url);
        ctx.insert("primary_color", &state.page_repo.get().await?.primary_color);

        let body = state.templates.render("password_reset.html", &ctx)
            .map_err(|e| AppError::InternalWithMsg(format!("Template error: {}", e)))?;

        state.email_service.send(&user.email, "Redefinição de senha", &body).await?;
        info!("Password reset requested for user {}", user.id);
    }

    Ok(Json(serde_json::json!({ "status": "ok" })))
}

pub async fn confirm_password_reset(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<PasswordResetConfirmRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.password.len() < 8 {
        return Err(AppError::Validation("Password must have at least 8 characters".into()));
    }

    let password_hash = hash_password(&payload.password)?;
    state.auth_service.reset_password(&payload.token, &password_hash).await?;

    info!("Password reset completed");
    Ok(Json(serde_json::json!({ "status": "ok" })))
}

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AppError::Internal)?
        .to_string())
}

async fn allocate_slug(state: &Arc<AppState>, name: &str) -> Result<String, AppError> {
    let base = slugify(name);
    if base.is_empty() {
        return Err(AppError::Validation("Name must contain letters or digits".into()));
    }

    for attempt in 1..=50 {
        let candidate = with_suffix(&base, attempt);
        if state.user_repo.find_by_slug(&candidate).await?.is_none() {
            return Ok(candidate);
        }
    }

    Err(AppError::Conflict("Could not allocate a unique profile slug".into()))
}

pub fn set_auth_cookies(cookies: &Cookies, session: &str, remember: Option<&str>) {
    let mut session_c = Cookie::new(SESSION_COOKIE, session.to_string());
    session_c.set_http_only(true);
    session_c.set_secure(true);
    session_c.set_same_site(SameSite::Strict);
    session_c.set_path("/");
    session_c.set_max_age(Duration::hours(24));
    cookies.add(session_c);

    if let Some(remember) = remember {
        let mut remember_c = Cookie::new(REMEMBER_COOKIE, remember.to_string());
        remember_c.set_http_only(true);
        remember_c.set_secure(true);
        remember_c.set_same_site(SameSite::Strict);
        remember_c.set_path("/");
        remember_c.set_max_age(Duration::days(30));
        cookies.add(remember_c);
    }
}
