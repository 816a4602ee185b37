use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::FromRow;

pub const STATUS_PENDING: &str = "pendente";
pub const STATUS_APPROVED: &str = "aprovado";
pub const STATUS_REJECTED: &str = "recusado";
pub const STATUS_CANCELLED: &str = "cancelado";
pub const STATUS_SENT: &str = "enviado";

pub const ALL_STATUSES: [&str; 5] = [
    STATUS_PENDING,
    STATUS_APPROVED,
    STATUS_REJECTED,
    STATUS_CANCELLED,
    STATUS_SENT,
];

pub const SERVICE_ARCO_ORGANICO: &str = "arco_organico";
pub const SERVICE_ARCO_TRADICIONAL: &str = "arco_tradicional";
pub const SERVICE_ESCULTURA: &str = "escultura";
pub const SERVICE_CENTRO_DE_MESA: &str = "centro_de_mesa";
pub const SERVICE_DECORACAO_COMPLETA: &str = "decoracao_completa";

pub const ALL_SERVICE_TYPES: [&str; 5] = [
    SERVICE_ARCO_ORGANICO,
    SERVICE_ARCO_TRADICIONAL,
    SERVICE_ESCULTURA,
    SERVICE_CENTRO_DE_MESA,
    SERVICE_DECORACAO_COMPLETA,
];

pub fn is_arc_service(service_type: &str) -> bool {
    service_type == SERVICE_ARCO_ORGANICO || service_type == SERVICE_ARCO_TRADICIONAL
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Budget {
    pub id: String,
    pub decorator_id: String,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: Option<String>,
    pub event_date: NaiveDate,
    pub event_time: NaiveTime,
    pub service_type: String,
    pub tamanho_arco_m: Option<f64>,
    pub event_address: Option<String>,
    pub notes: Option<String>,
    pub image_path: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewBudgetParams {
    pub decorator_id: String,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: Option<String>,
    pub event_date: NaiveDate,
    pub event_time: NaiveTime,
    pub service_type: String,
    pub tamanho_arco_m: Option<f64>,
    pub event_address: Option<String>,
    pub notes: Option<String>,
}

impl Budget {
    pub fn new(params: NewBudgetParams) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            decorator_id: params.decorator_id,
            client_name: params.client_name,
            client_email: params.client_email,
            client_phone: params.client_phone,
            event_date: params.event_date,
            event_time: params.event_time,
            service_type: params.service_type,
            tamanho_arco_m: params.tamanho_arco_m,
            event_address: params.event_address,
            notes: params.notes,
            image_path: None,
            status: STATUS_PENDING.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Only open and confirmed requests occupy a slot.
    pub fn counts_toward_capacity(&self) -> bool {
        self.status == STATUS_PENDING || self.status == STATUS_APPROVED
    }
}
