use axum::{
    extract::{Multipart, Path, State},
    response::IntoResponse,
    Json,
};
use crate::api::dtos::requests::{ReorderPortfolioRequest, UpdatePortfolioItemRequest};
use crate::api::extractors::auth::Decorator;
use crate::domain::models::portfolio::PortfolioItem;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tracing::info;

const ALLOWED_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

pub fn image_extension(filename: &str) -> Result<String, AppError> {
    let ext = filename
        .rsplit('.')
        .next()
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(AppError::Validation(
            "Image must be jpg, jpeg, png or webp".to_string(),
        ));
    }
    Ok(ext)
}

pub async fn list_portfolio(
    State(state): State<Arc<AppState>>,
    Decorator(user): Decorator,
) -> Result<impl IntoResponse, AppError> {
    let items = state.portfolio_repo.list_by_decorator(&user.id, false).await?;
    Ok(Json(items))
}

pub async fn create_portfolio_item(
    State(state): State<Arc<AppState>>,
    Decorator(user): Decorator,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut title: Option<String> = None;
    let mut description: Option<String> = None;
    let mut image: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await
        .map_err(|_| AppError::Validation("Malformed multipart body".into()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title" => {
                title = Some(field.text().await
                    .map_err(|_| AppError::Validation("Invalid title field".into()))?);
            }
            "description" => {
                description = Some(field.text().await
                    .map_err(|_| AppError::Validation("Invalid description field".into()))?);
            }
            "image" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let ext = image_extension(&filename)?;
                let bytes = field.bytes().await
                    .map_err(|_| AppError::Validation("Invalid image upload".into()))?;
                image = Some((ext, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let title = title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Title is required".into()))?;

    let position = state.portfolio_repo.max_position(&user.id).await? + 1;
    let mut item = PortfolioItem::new(user.id.clone(), title, description, position);

    if let Some((ext, bytes)) = image {
        let filename = format!("portfolio_{}.{}", item.id, ext);
        let path = state.image_store.store(&filename, &bytes).await?;
        item.image_path = Some(path);
    }

    let created = state.portfolio_repo.create(&item).await?;
    info!("Portfolio item created: {}", created.id);
    Ok(Json(created))
}

pub async fn update_portfolio_item(
    State(state): State<Arc<AppState>>,
    Decorator(user): Decorator,
    Path(item_id): Path<String>,
    Json(payload): Json<UpdatePortfolioItemRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut item = state.portfolio_repo.find_by_id(&user.id, &item_id).await?
        .ok_or_else(|| AppError::NotFound("Portfolio item not found".into()))?;

    if let Some(title) = payload.title {
        if title.trim().is_empty() {
            return Err(AppError::Validation("Title must not be empty".into()));
        }
        item.title = title;
    }
    if let Some(description) = payload.description {
        item.description = Some(description);
    }
    if let Some(visible) = payload.visible {
        item.visible = visible;
    }

    let updated = state.portfolio_repo.update(&item).await?;
    Ok(Json(updated))
}

pub async fn reorder_portfolio(
    State(state): State<Arc<AppState>>,
    Decorator(user): Decorator,
    Json(payload): Json<ReorderPortfolioRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.portfolio_repo.reorder(&user.id, &payload.ordered_ids).await?;
    let items = state.portfolio_repo.list_by_decorator(&user.id, false).await?;
    Ok(Json(items))
}

pub async fn delete_portfolio_item(
    State(state): State<Arc<AppState>>,
    Decorator(user): Decorator,
    Path(item_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let item = state.portfolio_repo.find_by_id(&user.id, &item_id).await?
        .ok_or_else(|| AppError::NotFound("Portfolio item not found".into()))?;

    state.portfolio_repo.delete(&user.id, &item_id).await?;

    if let Some(image_path) = &item.image_path {
        let _ = state.image_store.remove(image_path).await;
    }

    info!("Portfolio item deleted: {}", item_id);
    Ok(Json(serde_json::json!({ "status": "deleted" })))
}
