use decora_backend::{
    api::handlers::auth::hash_password,
    api::router::create_router,
    config::Config,
    domain::models::user::{NewUserParams, User, ROLE_ADMIN},
    domain::ports::{EmailService, ImageStore},
    domain::services::auth_service::AuthService,
    domain::services::budget_service::BudgetService,
    error::AppError,
    infra::factory::load_templates,
    infra::repositories::{
        sqlite_auth_repo::SqliteAuthRepo,
        sqlite_availability_repo::SqliteAvailabilityRepo,
        sqlite_blocked_date_repo::SqliteBlockedDateRepo,
        sqlite_budget_repo::SqliteBudgetRepo,
        sqlite_page_repo::SqlitePageRepo,
        sqlite_portfolio_repo::SqlitePortfolioRepo,
        sqlite_project_cost_repo::SqliteProjectCostRepo,
        sqlite_user_repo::SqliteUserRepo,
    },
    state::AppState,
};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct MockEmailService {
    pub sent: Arc<Mutex<Vec<(String, String, String)>>>,
}

#[async_trait]
impl EmailService for MockEmailService {
    async fn send(&self, recipient: &str, subject: &str, html_body: &str) -> Result<(), AppError> {
        self.sent.lock().unwrap().push((
            recipient.to_string(),
            subject.to_string(),
            html_body.to_string(),
        ));
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MockImageStore {
    pub stored: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl ImageStore for MockImageStore {
    async fn store(&self, filename: &str, _bytes: &[u8]) -> Result<String, AppError> {
        self.stored.lock().unwrap().push(filename.to_string());
        Ok(filename.to_string())
    }

    async fn remove(&self, path: &str) -> Result<(), AppError> {
        self.stored.lock().unwrap().retain(|p| p != path);
        Ok(())
    }
}

pub struct AuthHeaders {
    pub session_token: String,
    pub remember_token: Option<String>,
    pub csrf_token: String,
}

impl AuthHeaders {
    pub fn cookie_header(&self) -> String {
        match &self.remember_token {
            Some(remember) => format!(
                "session_token={}; remember_token={}",
                self.session_token, remember
            ),
            None => format!("session_token={}", self.session_token),
        }
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
    pub emails: MockEmailService,
    pub images: MockImageStore,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            upload_dir: "./test-uploads".to_string(),
            mail_service_url: "http://localhost".to_string(),
            mail_service_token: "token".to_string(),
            frontend_base_url: "http://localhost:5173".to_string(),
        };

        let emails = MockEmailService::default();
        let images = MockImageStore::default();

        let auth_repo = Arc::new(SqliteAuthRepo::new(pool.clone()));
        let auth_service = Arc::new(AuthService::new(auth_repo.clone()));

        let availability_repo = Arc::new(SqliteAvailabilityRepo::new(pool.clone()));
        let blocked_date_repo = Arc::new(SqliteBlockedDateRepo::new(pool.clone()));
        let budget_repo = Arc::new(SqliteBudgetRepo::new(pool.clone()));
        let image_store = Arc::new(images.clone());

        let budget_service = Arc::new(BudgetService::new(
            budget_repo.clone(),
            availability_repo.clone(),
            blocked_date_repo.clone(),
            image_store.clone(),
        ));

        let state = Arc::new(AppState {
            config,
            user_repo: Arc::new(SqliteUserRepo::new(pool.clone())),
            auth_repo,
            availability_repo,
            blocked_date_repo,
            budget_repo,
            portfolio_repo: Arc::new(SqlitePortfolioRepo::new(pool.clone())),
            cost_repo: Arc::new(SqliteProjectCostRepo::new(pool.clone())),
            page_repo: Arc::new(SqlitePageRepo::new(pool.clone())),
            auth_service,
            budget_service,
            email_service: Arc::new(emails.clone()),
            image_store,
            templates: Arc::new(load_templates()),
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
            emails,
            images,
        }
    }

    /// Admin accounts are provisioned out-of-band, so tests seed them
    /// straight through the repository.
    pub async fn seed_admin(&self, email: &str, password: &str) -> User {
        let user = User::new(NewUserParams {
            name: "Admin".to_string(),
            email: email.to_string(),
            phone: None,
            password_hash: hash_password(password).unwrap(),
            role: ROLE_ADMIN.to_string(),
            slug: None,
        });
        self.state.user_repo.create(&user).await.unwrap()
    }

    pub async fn register(&self, name: &str, email: &str, password: &str, role: &str) -> Value {
        let res = self.router.clone().oneshot(
            Request::builder().method("POST").uri("/api/v1/auth/register")
                .header("Content-Type", "application/json")
                .body(Body::from(serde_json::json!({
                    "name": name, "email": email, "password": password, "role": role
                }).to_string())).unwrap()
        ).await.unwrap();
        parse_body(res).await
    }

    pub async fn login(&self, email: &str, password: &str, remember: bool) -> AuthHeaders {
        let res = self.router.clone().oneshot(
            Request::builder().method("POST").uri("/api/v1/auth/login")
                .header("Content-Type", "application/json")
                .body(Body::from(serde_json::json!({
                    "email": email, "password": password, "remember": remember
                }).to_string())).unwrap()
        ).await.unwrap();

        assert!(res.status().is_success(), "login failed: {}", res.status());

        let session_token = extract_cookie(&res, "session_token").expect("no session cookie");
        let remember_token = extract_cookie(&res, "remember_token");

        let body = parse_body(res).await;
        let csrf_token = body["csrf_token"].as_str().unwrap().to_string();

        AuthHeaders {
            session_token,
            remember_token,
            csrf_token,
        }
    }

    /// Registers a decorator, approves it via the repo, and logs it in.
    pub async fn approved_decorator(&self, name: &str, email: &str) -> (Value, AuthHeaders) {
        let registered = self.register(name, email, "senha-segura", "decorator").await;
        let id = registered["id"].as_str().unwrap();
        self.state.user_repo.set_status(id, "aprovado").await.unwrap();
        let auth = self.login(email, "senha-segura", false).await;
        (registered, auth)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
    }
}

pub async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn extract_cookie(response: &axum::response::Response, name: &str) -> Option<String> {
    let prefix = format!("{}=", name);
    for value in response.headers().get_all(header::SET_COOKIE) {
        let raw = value.to_str().ok()?;
        if let Some(rest) = raw.strip_prefix(&prefix) {
            let token = rest.split(';').next().unwrap_or_default();
            if !token.is_empty() {
                return Some(token.to_string());
            }
        }
    }
    None
}

pub const MULTIPART_BOUNDARY: &str = "----decora-test-boundary";

/// Builds a multipart/form-data body from text fields plus an optional file
/// part named "image".
pub fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                MULTIPART_BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    if let Some((filename, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                MULTIPART_BOUNDARY, filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", MULTIPART_BOUNDARY).as_bytes());
    body
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", MULTIPART_BOUNDARY)
}
