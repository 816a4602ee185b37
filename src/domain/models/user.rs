use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

pub const ROLE_USER: &str = "user";
pub const ROLE_DECORATOR: &str = "decorator";
pub const ROLE_ADMIN: &str = "admin";

pub const ACCOUNT_PENDING: &str = "pendente";
pub const ACCOUNT_APPROVED: &str = "aprovado";
pub const ACCOUNT_REJECTED: &str = "recusado";

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub status: String,
    pub slug: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewUserParams {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password_hash: String,
    pub role: String,
    pub slug: Option<String>,
}

impl User {
    pub fn new(params: NewUserParams) -> Self {
        // Decorator accounts wait for admin approval; everyone else is live
        // immediately.
        let status = if params.role == ROLE_DECORATOR {
            ACCOUNT_PENDING
        } else {
            ACCOUNT_APPROVED
        };

        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: params.name,
            email: params.email,
            phone: params.phone,
            password_hash: params.password_hash,
            role: params.role,
            status: status.to_string(),
            slug: params.slug,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_approved(&self) -> bool {
        self.status == ACCOUNT_APPROVED
    }
}
