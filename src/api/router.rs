use axum::{
    body::Body,
    extract::Request,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{admin, auth, availability, blocked_date, budget, health, portfolio, public};
use tower_http::{
    classify::ServerErrorsFailureClass,
    trace::TraceLayer,
};
use tower_cookies::CookieManagerLayer;
use tracing::{error, info, info_span, Span};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Auth
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/logout", post(auth::logout))
        .route("/api/v1/auth/me", get(auth::me))
        .route("/api/v1/auth/password-reset/request", post(auth::request_password_reset))
        .route("/api/v1/auth/password-reset/confirm", post(auth::confirm_password_reset))

        // Admin back-office
        .route("/api/v1/admin/users", get(admin::list_users))
        .route("/api/v1/admin/users/{user_id}/approval", put(admin::set_approval))
        .route("/api/v1/admin/page", get(admin::get_page).put(admin::update_page))

        // Decorator: availability & blocked dates
        .route("/api/v1/decorator/availability", get(availability::get_availability).put(availability::upsert_availability))
        .route("/api/v1/decorator/blocked-dates", get(blocked_date::list_blocked_dates).post(blocked_date::create_blocked_date))
        .route("/api/v1/decorator/blocked-dates/{id}", delete(blocked_date::delete_blocked_date))

        // Decorator: portfolio
        .route("/api/v1/decorator/portfolio", get(portfolio::list_portfolio).post(portfolio::create_portfolio_item))
        .route("/api/v1/decorator/portfolio/reorder", put(portfolio::reorder_portfolio))
        .route("/api/v1/decorator/portfolio/{id}", put(portfolio::update_portfolio_item).delete(portfolio::delete_portfolio_item))

        // Decorator: budgets & project costs
        .route("/api/v1/decorator/budgets", get(budget::list_budgets))
        .route("/api/v1/decorator/budgets/{budget_id}", get(budget::get_budget).put(budget::update_budget).delete(budget::delete_budget))
        .route("/api/v1/decorator/budgets/{budget_id}/status", put(budget::update_budget_status))
        .route("/api/v1/decorator/budgets/{budget_id}/costs", get(budget::list_costs).post(budget::create_cost))
        .route("/api/v1/decorator/costs/{cost_id}", delete(budget::delete_cost))

        // Public surface
        .route("/api/v1/public/page", get(public::get_page))
        .route("/api/v1/public/decorators/{slug}", get(public::get_profile))
        .route("/api/v1/public/decorators/{slug}/budgets", post(public::create_budget))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
