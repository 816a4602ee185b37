use axum::{
    extract::{Multipart, Path, State},
    response::IntoResponse,
    Json,
};
use crate::api::dtos::responses::PublicProfileResponse;
use crate::api::handlers::portfolio::image_extension;
use crate::domain::models::budget::NewBudgetParams;
use crate::domain::models::user::{ROLE_DECORATOR, ACCOUNT_APPROVED};
use crate::domain::services::availability::parse_event_time;
use crate::domain::services::budget_service::UploadedImage;
use crate::error::AppError;
use crate::state::AppState;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::info;

pub async fn get_page(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.page_repo.get().await?))
}

pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let decorator = state.user_repo.find_by_slug(&slug).await?
        .filter(|u| u.role == ROLE_DECORATOR && u.status == ACCOUNT_APPROVED)
        .ok_or_else(|| AppError::NotFound("Decorator not found".into()))?;

    let portfolio = state.portfolio_repo.list_by_decorator(&decorator.id, true).await?;
    let page = state.page_repo.get().await?;

    Ok(Json(PublicProfileResponse {
        name: decorator.name,
        slug,
        phone: decorator.phone,
        portfolio,
        page,
    }))
}

/// Public contact form: a client asks a decorator for a quote. Multipart so
/// a reference photo can ride along.
pub async fn create_budget(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let decorator = state.user_repo.find_by_slug(&slug).await?
        .filter(|u| u.role == ROLE_DECORATOR && u.status == ACCOUNT_APPROVED)
        .ok_or_else(|| AppError::NotFound("Decorator not found".into()))?;

    let mut client_name: Option<String> = None;
    let mut client_email: Option<String> = None;
    let mut client_phone: Option<String> = None;
    let mut event_date: Option<String> = None;
    let mut event_time: Option<String> = None;
    let mut service_type: Option<String> = None;
    let mut tamanho_arco_m: Option<String> = None;
    let mut event_address: Option<String> = None;
    let mut notes: Option<String> = None;
    let mut image: Option<UploadedImage> = None;

    while let Some(field) = multipart.next_field().await
        .map_err(|_| AppError::Validation("Malformed multipart body".into()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "image" {
            let filename = field.file_name().unwrap_or_default().to_string();
            let extension = image_extension(&filename)?;
            let bytes = field.bytes().await
                .map_err(|_| AppError::Validation("Invalid image upload".into()))?;
            image = Some(UploadedImage {
                extension,
                bytes: bytes.to_vec(),
            });
            continue;
        }

        let value = field.text().await
            .map_err(|_| AppError::Validation(format!("Invalid field: {}", name)))?;
        match name.as_str() {
            "client_name" => client_name = Some(value),
            "client_email" => client_email = Some(value),
            "client_phone" => client_phone = Some(value),
            "event_date" => event_date = Some(value),
            "event_time" => event_time = Some(value),
            "service_type" => service_type = Some(value),
            "tamanho_arco_m" => tamanho_arco_m = Some(value),
            "event_address" => event_address = Some(value),
            "notes" => notes = Some(value),
            _ => {}
        }
    }

    let client_name = required(client_name, "client_name")?;
    let client_email = required(client_email, "client_email")?;
    let service_type = required(service_type, "service_type")?;

    let event_date = NaiveDate::parse_from_str(&required(event_date, "event_date")?, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format (YYYY-MM-DD)".into()))?;
    let event_time = parse_event_time(&required(event_time, "event_time")?)
        .ok_or_else(|| AppError::Validation("Invalid time format (HH:MM)".into()))?;

    let tamanho_arco_m = tamanho_arco_m
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| {
            raw.trim().parse::<f64>()
                .map_err(|_| AppError::Validation("tamanho_arco_m must be a number".into()))
        })
        .transpose()?;

    let created = state.budget_service.create(
        NewBudgetParams {
            decorator_id: decorator.id,
            client_name,
            client_email,
            client_phone,
            event_date,
            event_time,
            service_type,
            tamanho_arco_m,
            event_address,
            notes,
        },
        image,
    ).await?;

    info!("Public budget request {} for decorator {}", created.id, slug);
    Ok(Json(created))
}

fn required(value: Option<String>, field: &str) -> Result<String, AppError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::Validation(format!("Missing field: {}", field)))
}
