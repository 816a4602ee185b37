use axum::{extract::State, response::IntoResponse, Json};
use crate::api::dtos::requests::UpsertAvailabilityRequest;
use crate::api::dtos::responses::AvailabilityResponse;
use crate::api::extractors::auth::Decorator;
use crate::domain::models::availability::{
    AvailabilityConfig, NewAvailabilityParams, INTERVAL_UNIT_HOURS, INTERVAL_UNIT_MINUTES,
};
use crate::domain::services::availability::parse_event_time;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tracing::info;

const WEEKDAYS: [&str; 7] = [
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
];

pub async fn get_availability(
    State(state): State<Arc<AppState>>,
    Decorator(user): Decorator,
) -> Result<impl IntoResponse, AppError> {
    let config = state.availability_repo.find_by_decorator(&user.id).await?
        .ok_or_else(|| AppError::NotFound("No availability configured".into()))?;

    Ok(Json(AvailabilityResponse {
        available_days: config.available_days(),
        windows: config.windows(),
        intervals: config.interval_rules(),
        max_daily_services: config.max_daily_services,
    }))
}

pub async fn upsert_availability(
    State(state): State<Arc<AppState>>,
    Decorator(user): Decorator,
    Json(payload): Json<UpsertAvailabilityRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.max_daily_services < 1 {
        return Err(AppError::Validation("max_daily_services must be at least 1".into()));
    }

    for day in &payload.available_days {
        if !WEEKDAYS.contains(&day.as_str()) {
            return Err(AppError::Validation(format!("Unknown weekday: {}", day)));
        }
    }

    for window in &payload.windows {
        if !WEEKDAYS.contains(&window.day.as_str()) {
            return Err(AppError::Validation(format!("Unknown weekday: {}", window.day)));
        }
        let (start, end) = match (parse_event_time(&window.start), parse_event_time(&window.end)) {
            (Some(start), Some(end)) => (start, end),
            _ => return Err(AppError::Validation("Window times must be HH:MM".into())),
        };
        if start >= end {
            return Err(AppError::Validation("Window start must come before its end".into()));
        }
    }

    for rule in &payload.intervals {
        if !WEEKDAYS.contains(&rule.day.as_str()) {
            return Err(AppError::Validation(format!("Unknown weekday: {}", rule.day)));
        }
        if rule.unit != INTERVAL_UNIT_MINUTES && rule.unit != INTERVAL_UNIT_HOURS {
            return Err(AppError::Validation("Interval unit must be 'minutes' or 'hours'".into()));
        }
        if rule.interval < 1 {
            return Err(AppError::Validation("Interval must be at least 1".into()));
        }
    }

    let config = AvailabilityConfig::new(NewAvailabilityParams {
        decorator_id: user.id.clone(),
        available_days: payload.available_days,
        windows: payload.windows,
        intervals: payload.intervals,
        max_daily_services: payload.max_daily_services,
    });

    let saved = state.availability_repo.upsert(&config).await?;
    info!("Availability updated for decorator {}", user.id);

    Ok(Json(AvailabilityResponse {
        available_days: saved.available_days(),
        windows: saved.windows(),
        intervals: saved.interval_rules(),
        max_daily_services: saved.max_daily_services,
    }))
}
