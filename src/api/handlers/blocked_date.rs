use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use crate::api::dtos::requests::CreateBlockedDateRequest;
use crate::api::extractors::auth::Decorator;
use crate::domain::models::blocked_date::BlockedDate;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tracing::info;

pub async fn list_blocked_dates(
    State(state): State<Arc<AppState>>,
    Decorator(user): Decorator,
) -> Result<impl IntoResponse, AppError> {
    let dates = state.blocked_date_repo.list_by_decorator(&user.id).await?;
    Ok(Json(dates))
}

pub async fn create_blocked_date(
    State(state): State<Arc<AppState>>,
    Decorator(user): Decorator,
    Json(payload): Json<CreateBlockedDateRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.reason.trim().is_empty() {
        return Err(AppError::Validation("Reason must not be empty".into()));
    }

    let blocked = BlockedDate::new(user.id.clone(), payload.date, payload.recurring, payload.reason);
    let created = state.blocked_date_repo.create(&blocked).await?;

    info!("Blocked date {} for decorator {}", created.date, user.id);
    Ok(Json(created))
}

pub async fn delete_blocked_date(
    State(state): State<Arc<AppState>>,
    Decorator(user): Decorator,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.blocked_date_repo.delete(&user.id, &id).await?;
    info!("Blocked date removed: {}", id);
    Ok(Json(serde_json::json!({ "status": "deleted" })))
}
