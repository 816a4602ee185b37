use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use crate::api::dtos::requests::{CreateCostRequest, UpdateBudgetRequest, UpdateBudgetStatusRequest};
use crate::api::dtos::responses::CostListResponse;
use crate::api::extractors::auth::Decorator;
use crate::domain::models::budget::ALL_STATUSES;
use crate::domain::models::project_cost::ProjectCost;
use crate::domain::services::availability::parse_event_time;
use crate::domain::services::budget_service::BudgetChanges;
use crate::error::AppError;
use crate::state::AppState;
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

#[derive(Deserialize)]
pub struct BudgetListQuery {
    pub status: Option<String>,
}

pub async fn list_budgets(
    State(state): State<Arc<AppState>>,
    Decorator(user): Decorator,
    Query(query): Query<BudgetListQuery>,
) -> Result<impl IntoResponse, AppError> {
    if let Some(status) = &query.status {
        if !ALL_STATUSES.contains(&status.as_str()) {
            return Err(AppError::Validation(format!("Unknown status: {}", status)));
        }
    }

    let budgets = state
        .budget_repo
        .list_by_decorator(&user.id, query.status.as_deref())
        .await?;
    Ok(Json(budgets))
}

pub async fn get_budget(
    State(state): State<Arc<AppState>>,
    Decorator(user): Decorator,
    Path(budget_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let budget = state.budget_repo.find_by_id(&user.id, &budget_id).await?
        .ok_or_else(|| AppError::NotFound("Budget not found".into()))?;
    Ok(Json(budget))
}

pub async fn update_budget(
    State(state): State<Arc<AppState>>,
    Decorator(user): Decorator,
    Path(budget_id): Path<String>,
    Json(payload): Json<UpdateBudgetRequest>,
) -> Result<impl IntoResponse, AppError> {
    let event_date = payload
        .event_date
        .map(|raw| {
            NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                .map_err(|_| AppError::Validation("Invalid date format (YYYY-MM-DD)".into()))
        })
        .transpose()?;

    let event_time = payload
        .event_time
        .map(|raw| {
            parse_event_time(&raw)
                .ok_or_else(|| AppError::Validation("Invalid time format (HH:MM)".into()))
        })
        .transpose()?;

    let changes = BudgetChanges {
        client_name: payload.client_name,
        client_email: payload.client_email,
        client_phone: payload.client_phone,
        event_date,
        event_time,
        service_type: payload.service_type,
        tamanho_arco_m: payload.tamanho_arco_m,
        event_address: payload.event_address,
        notes: payload.notes,
    };

    let updated = state.budget_service.update(&user.id, &budget_id, changes).await?;
    Ok(Json(updated))
}

pub async fn update_budget_status(
    State(state): State<Arc<AppState>>,
    Decorator(user): Decorator,
    Path(budget_id): Path<String>,
    Json(payload): Json<UpdateBudgetStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    // Flat status set: any member is reachable from any other.
    if !ALL_STATUSES.contains(&payload.status.as_str()) {
        return Err(AppError::Validation(format!("Unknown status: {}", payload.status)));
    }

    let updated = state
        .budget_repo
        .set_status(&user.id, &budget_id, &payload.status)
        .await?;

    info!("Budget {} status set to {}", updated.id, updated.status);
    Ok(Json(updated))
}

pub async fn delete_budget(
    State(state): State<Arc<AppState>>,
    Decorator(user): Decorator,
    Path(budget_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let budget = state.budget_repo.find_by_id(&user.id, &budget_id).await?
        .ok_or_else(|| AppError::NotFound("Budget not found".into()))?;

    state.budget_repo.delete(&user.id, &budget_id).await?;

    if let Some(image_path) = &budget.image_path {
        let _ = state.image_store.remove(image_path).await;
    }

    info!("Budget deleted: {}", budget_id);
    Ok(Json(serde_json::json!({ "status": "deleted" })))
}

pub async fn list_costs(
    State(state): State<Arc<AppState>>,
    Decorator(user): Decorator,
    Path(budget_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.budget_repo.find_by_id(&user.id, &budget_id).await?
        .ok_or_else(|| AppError::NotFound("Budget not found".into()))?;

    let costs = state.cost_repo.list_by_budget(&budget_id).await?;
    let total_cents = costs.iter().map(|c| c.amount_cents).sum();

    Ok(Json(CostListResponse { costs, total_cents }))
}

pub async fn create_cost(
    State(state): State<Arc<AppState>>,
    Decorator(user): Decorator,
    Path(budget_id): Path<String>,
    Json(payload): Json<CreateCostRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.description.trim().is_empty() {
        return Err(AppError::Validation("Description must not be empty".into()));
    }
    if payload.amount_cents < 0 {
        return Err(AppError::Validation("Amount must not be negative".into()));
    }

    state.budget_repo.find_by_id(&user.id, &budget_id).await?
        .ok_or_else(|| AppError::NotFound("Budget not found".into()))?;

    let cost = ProjectCost::new(budget_id, user.id.clone(), payload.description, payload.amount_cents);
    let created = state.cost_repo.create(&cost).await?;

    info!("Cost entry {} added to budget {}", created.id, created.budget_id);
    Ok(Json(created))
}

pub async fn delete_cost(
    State(state): State<Arc<AppState>>,
    Decorator(user): Decorator,
    Path(cost_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.cost_repo.delete(&user.id, &cost_id).await?;
    Ok(Json(serde_json::json!({ "status": "deleted" })))
}
