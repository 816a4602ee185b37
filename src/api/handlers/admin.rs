use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use crate::api::dtos::requests::{ApprovalRequest, UpdatePageRequest};
use crate::api::extractors::auth::Admin;
use crate::domain::models::user::{ACCOUNT_APPROVED, ACCOUNT_REJECTED};
use crate::error::AppError;
use crate::state::AppState;
use serde::Deserialize;
use std::sync::Arc;
use tera::Context;
use tracing::{info, warn};

#[derive(Deserialize)]
pub struct UserListQuery {
    pub role: Option<String>,
    pub status: Option<String>,
}

pub async fn list_users(
    State(state): State<Arc<AppState>>,
    _admin: Admin,
    Query(query): Query<UserListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let users = state
        .user_repo
        .list(query.role.as_deref(), query.status.as_deref())
        .await?;

    let safe_users: Vec<_> = users.into_iter().map(|u| serde_json::json!({
        "id": u.id,
        "name": u.name,
        "email": u.email,
        "phone": u.phone,
        "role": u.role,
        "status": u.status,
        "slug": u.slug,
        "created_at": u.created_at,
    })).collect();

    Ok(Json(safe_users))
}

pub async fn set_approval(
    State(state): State<Arc<AppState>>,
    _admin: Admin,
    Path(user_id): Path<String>,
    Json(payload): Json<ApprovalRequest>,
) -> Result<impl IntoResponse, AppError> {
    let status = if payload.approve {
        ACCOUNT_APPROVED
    } else {
        ACCOUNT_REJECTED
    };

    let user = state.user_repo.set_status(&user_id, status).await?;
    info!("User {} set to {}", user.id, status);

    let mut ctx = Context::new();
    ctx.insert("user_name", &user.name);
    ctx.insert("approved", &payload.approve);

    match state.templates.render("account_decision.html", &ctx) {
        Ok(body) => {
            // The decision stands even if the notification bounces.
            if let Err(e) = state
                .email_service
                .send(&user.email, "Cadastro de decorador", &body)
                .await
            {
                warn!("Failed to send decision email to {}: {}", user.email, e);
            }
        }
        Err(e) => warn!("Failed to render decision template: {}", e),
    }

    Ok(Json(user))
}

pub async fn get_page(
    State(state): State<Arc<AppState>>,
    _admin: Admin,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.page_repo.get().await?))
}

pub async fn update_page(
    State(state): State<Arc<AppState>>,
    _admin: Admin,
    Json(payload): Json<UpdatePageRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut settings = state.page_repo.get().await?;

    if let Some(title) = payload.hero_title {
        settings.hero_title = title;
    }
    if let Some(subtitle) = payload.hero_subtitle {
        settings.hero_subtitle = subtitle;
    }
    if let Some(about) = payload.about_html {
        settings.about_html = about;
    }
    if let Some(color) = payload.primary_color {
        settings.primary_color = color;
    }
    if let Some(logo) = payload.logo_url {
        settings.logo_url = Some(logo);
    }

    let updated = state.page_repo.update(&settings).await?;
    info!("Page settings updated");
    Ok(Json(updated))
}
