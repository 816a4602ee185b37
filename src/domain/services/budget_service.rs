use std::sync::Arc;
use chrono::{NaiveDate, NaiveTime};
use tracing::info;

use crate::domain::models::budget::{
    is_arc_service, Budget, NewBudgetParams, ALL_SERVICE_TYPES,
};
use crate::domain::ports::{
    AvailabilityRepository, BlockedDateRepository, BudgetRepository, ImageStore,
};
use crate::domain::services::availability::validate_slot;
use crate::error::AppError;

pub const ARC_SIZE_MIN_M: f64 = 0.5;
pub const ARC_SIZE_MAX_M: f64 = 30.0;

/// Arc services carry a size in metres, one decimal place, 0.5–30.
/// Every other service must not carry one.
pub fn validate_arc_size(service_type: &str, tamanho_arco_m: Option<f64>) -> Result<(), AppError> {
    if !ALL_SERVICE_TYPES.contains(&service_type) {
        return Err(AppError::Validation(format!(
            "Unknown service type: {}",
            service_type
        )));
    }

    if is_arc_service(service_type) {
        let size = tamanho_arco_m.ok_or_else(|| {
            AppError::Validation("Arc services require tamanho_arco_m".to_string())
        })?;
        if !(ARC_SIZE_MIN_M..=ARC_SIZE_MAX_M).contains(&size) {
            return Err(AppError::Validation(format!(
                "tamanho_arco_m must be between {} and {} metres",
                ARC_SIZE_MIN_M, ARC_SIZE_MAX_M
            )));
        }
        let tenths = size * 10.0;
        if (tenths - tenths.round()).abs() > 1e-9 {
            return Err(AppError::Validation(
                "tamanho_arco_m allows at most one decimal place".to_string(),
            ));
        }
    } else if tamanho_arco_m.is_some() {
        return Err(AppError::Validation(
            "tamanho_arco_m only applies to arc services".to_string(),
        ));
    }

    Ok(())
}

pub struct UploadedImage {
    pub extension: String,
    pub bytes: Vec<u8>,
}

#[derive(Default)]
pub struct BudgetChanges {
    pub client_name: Option<String>,
    pub client_email: Option<String>,
    pub client_phone: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub event_time: Option<NaiveTime>,
    pub service_type: Option<String>,
    pub tamanho_arco_m: Option<f64>,
    pub event_address: Option<String>,
    pub notes: Option<String>,
}

pub struct BudgetService {
    budget_repo: Arc<dyn BudgetRepository>,
    availability_repo: Arc<dyn AvailabilityRepository>,
    blocked_repo: Arc<dyn BlockedDateRepository>,
    image_store: Arc<dyn ImageStore>,
}

impl BudgetService {
    pub fn new(
        budget_repo: Arc<dyn BudgetRepository>,
        availability_repo: Arc<dyn AvailabilityRepository>,
        blocked_repo: Arc<dyn BlockedDateRepository>,
        image_store: Arc<dyn ImageStore>,
    ) -> Self {
        Self {
            budget_repo,
            availability_repo,
            blocked_repo,
            image_store,
        }
    }

    async fn check_availability(
        &self,
        decorator_id: &str,
        date: NaiveDate,
        time: NaiveTime,
        exclude_id: Option<&str>,
    ) -> Result<(), AppError> {
        let config = self.availability_repo.find_by_decorator(decorator_id).await?;
        let blocked = self.blocked_repo.list_by_decorator(decorator_id).await?;
        let same_day = self
            .budget_repo
            .list_countable_by_date(decorator_id, date)
            .await?;

        validate_slot(config.as_ref(), &blocked, &same_day, date, time, exclude_id)
            .map_err(|r| AppError::Conflict(r.to_string()))
    }

    pub async fn create(
        &self,
        params: NewBudgetParams,
        image: Option<UploadedImage>,
    ) -> Result<Budget, AppError> {
        validate_arc_size(&params.service_type, params.tamanho_arco_m)?;
        self.check_availability(&params.decorator_id, params.event_date, params.event_time, None)
            .await?;

        let mut budget = Budget::new(params);

        if let Some(image) = image {
            let filename = format!("budget_{}.{}", budget.id, image.extension);
            let path = self.image_store.store(&filename, &image.bytes).await?;
            budget.image_path = Some(path);
        }

        let created = self.budget_repo.create(&budget).await?;
        info!("Budget created: {} for decorator {}", created.id, created.decorator_id);
        Ok(created)
    }

    /// Applies the changed fields and re-validates only what changed: a new
    /// date or time re-runs the availability rules (ignoring this budget's
    /// own slot), a new service type or arc size re-runs the size rules
    /// against the merged record.
    pub async fn update(
        &self,
        decorator_id: &str,
        budget_id: &str,
        changes: BudgetChanges,
    ) -> Result<Budget, AppError> {
        let mut budget = self
            .budget_repo
            .find_by_id(decorator_id, budget_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Budget not found".into()))?;

        if let Some(name) = changes.client_name {
            budget.client_name = name;
        }
        if let Some(email) = changes.client_email {
            budget.client_email = email;
        }
        if let Some(phone) = changes.client_phone {
            budget.client_phone = Some(phone);
        }
        if let Some(address) = changes.event_address {
            budget.event_address = Some(address);
        }
        if let Some(notes) = changes.notes {
            budget.notes = Some(notes);
        }

        let slot_changed = changes.event_date.is_some() || changes.event_time.is_some();
        if let Some(date) = changes.event_date {
            budget.event_date = date;
        }
        if let Some(time) = changes.event_time {
            budget.event_time = time;
        }

        let service_changed = changes.service_type.is_some() || changes.tamanho_arco_m.is_some();
        if let Some(service_type) = changes.service_type {
            if !is_arc_service(&service_type) && changes.tamanho_arco_m.is_none() {
                budget.tamanho_arco_m = None;
            }
            budget.service_type = service_type;
        }
        if let Some(size) = changes.tamanho_arco_m {
            budget.tamanho_arco_m = Some(size);
        }

        if service_changed {
            validate_arc_size(&budget.service_type, budget.tamanho_arco_m)?;
        }
        if slot_changed {
            self.check_availability(
                decorator_id,
                budget.event_date,
                budget.event_time,
                Some(budget_id),
            )
            .await?;
        }

        let updated = self.budget_repo.update(&budget).await?;
        info!("Budget updated: {}", updated.id);
        Ok(updated)
    }
}
