mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::{extract_cookie, parse_body, TestApp};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_register_and_login_user() {
    let app = TestApp::new().await;

    let registered = app.register("Joana", "joana@example.com", "senha-segura", "user").await;
    assert_eq!(registered["role"], "user");
    assert_eq!(registered["status"], "aprovado");
    assert!(registered["slug"].is_null());

    let auth = app.login("joana@example.com", "senha-segura", false).await;

    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/auth/me")
            .header(header::COOKIE, auth.cookie_header())
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["email"], "joana@example.com");
}

#[tokio::test]
async fn test_decorator_registration_is_pending() {
    let app = TestApp::new().await;

    let registered = app.register("Maria Balões", "maria@example.com", "senha-segura", "decorator").await;
    assert_eq!(registered["status"], "pendente");
    assert_eq!(registered["slug"], "maria-baloes");

    // Pending decorators cannot log in.
    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/auth/login")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "email": "maria@example.com", "password": "senha-segura"
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let app = TestApp::new().await;

    app.register("Um", "dup@example.com", "senha-segura", "user").await;

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/auth/register")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "name": "Dois", "email": "dup@example.com",
                "password": "senha-segura", "role": "user"
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_wrong_password_rejected() {
    let app = TestApp::new().await;
    app.register("Joana", "joana@example.com", "senha-segura", "user").await;

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/auth/login")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "email": "joana@example.com", "password": "senha-errada"
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_csrf_required_on_mutations() {
    let app = TestApp::new().await;
    let (_, auth) = app.approved_decorator("Clara", "clara@example.com").await;

    let payload = json!({ "date": "2025-05-01", "reason": "Feriado" }).to_string();

    // No CSRF header.
    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/decorator/blocked-dates")
            .header(header::COOKIE, auth.cookie_header())
            .header("Content-Type", "application/json")
            .body(Body::from(payload.clone())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // Wrong CSRF header.
    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/decorator/blocked-dates")
            .header(header::COOKIE, auth.cookie_header())
            .header("X-CSRF-Token", "forged")
            .header("Content-Type", "application/json")
            .body(Body::from(payload.clone())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // Matching header goes through.
    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/decorator/blocked-dates")
            .header(header::COOKIE, auth.cookie_header())
            .header("X-CSRF-Token", &auth.csrf_token)
            .header("Content-Type", "application/json")
            .body(Body::from(payload)).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_logout_invalidates_session() {
    let app = TestApp::new().await;
    app.register("Joana", "joana@example.com", "senha-segura", "user").await;
    let auth = app.login("joana@example.com", "senha-segura", false).await;

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/auth/logout")
            .header(header::COOKIE, auth.cookie_header())
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // The server-side session row is gone; the old cookie is dead.
    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/auth/me")
            .header(header::COOKIE, auth.cookie_header())
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_remember_token_revives_and_rotates() {
    let app = TestApp::new().await;
    app.register("Joana", "joana@example.com", "senha-segura", "user").await;
    let auth = app.login("joana@example.com", "senha-segura", true).await;
    let remember = auth.remember_token.clone().expect("remember cookie missing");

    // Present only the remember cookie, as a returning browser would after
    // its session expired.
    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/auth/me")
            .header(header::COOKIE, format!("remember_token={}", remember))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // The revival set a fresh pair of cookies.
    let new_session = extract_cookie(&res, "session_token").expect("no rotated session");
    let new_remember = extract_cookie(&res, "remember_token").expect("no rotated remember");
    assert_ne!(new_remember, remember);

    // The old remember token was single-use.
    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/auth/me")
            .header(header::COOKIE, format!("remember_token={}", remember))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // The rotated pair works.
    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/auth/me")
            .header(header::COOKIE, format!("session_token={}; remember_token={}", new_session, new_remember))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_password_reset_flow() {
    let app = TestApp::new().await;
    app.register("Joana", "joana@example.com", "senha-segura", "user").await;

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/auth/password-reset/request")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({ "email": "joana@example.com" }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let sent = app.emails.sent.lock().unwrap().clone();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "joana@example.com");

    // Pull the raw token out of the reset link in the mail body.
    let html = &sent[0].2;
    let start = html.find("token=").expect("no token in mail") + "token=".len();
    let token: String = html[start..].chars().take_while(|c| c.is_ascii_alphanumeric()).collect();

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/auth/password-reset/confirm")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "token": token, "password": "senha-novinha"
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // Old password is out, new one is in.
    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/auth/login")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "email": "joana@example.com", "password": "senha-segura"
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    app.login("joana@example.com", "senha-novinha", false).await;

    // The token is single-use.
    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/auth/password-reset/confirm")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "token": token, "password": "outra-senha"
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_reset_request_for_unknown_email_still_ok() {
    let app = TestApp::new().await;

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/auth/password-reset/request")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({ "email": "ghost@example.com" }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(app.emails.sent.lock().unwrap().is_empty());
}
