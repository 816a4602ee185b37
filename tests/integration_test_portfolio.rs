mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::{multipart_body, multipart_content_type, parse_body, AuthHeaders, TestApp};
use serde_json::json;
use tower::ServiceExt;

async fn create_item(app: &TestApp, auth: &AuthHeaders, title: &str, file: Option<(&str, &[u8])>) -> axum::response::Response {
    let body = multipart_body(&[("title", title)], file);
    app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/decorator/portfolio")
            .header(header::COOKIE, auth.cookie_header())
            .header("X-CSRF-Token", &auth.csrf_token)
            .header("Content-Type", multipart_content_type())
            .body(Body::from(body)).unwrap()
    ).await.unwrap()
}

#[tokio::test]
async fn test_create_item_with_image() {
    let app = TestApp::new().await;
    let (_, auth) = app.approved_decorator("Paula", "paula@example.com").await;

    let res = create_item(&app, &auth, "Arco de festa", Some(("foto.png", b"fake-png-bytes"))).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    let id = body["id"].as_str().unwrap();
    assert_eq!(body["image_path"], format!("portfolio_{}.png", id));
    assert_eq!(body["position"], 0);

    assert_eq!(app.images.stored.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_title_is_required() {
    let app = TestApp::new().await;
    let (_, auth) = app.approved_decorator("Paula", "paula2@example.com").await;

    let body = multipart_body(&[("description", "sem titulo")], None);
    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/decorator/portfolio")
            .header(header::COOKIE, auth.cookie_header())
            .header("X-CSRF-Token", &auth.csrf_token)
            .header("Content-Type", multipart_content_type())
            .body(Body::from(body)).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unsupported_image_extension_rejected() {
    let app = TestApp::new().await;
    let (_, auth) = app.approved_decorator("Paula", "paula3@example.com").await;

    let res = create_item(&app, &auth, "Arco", Some(("script.exe", b"mz"))).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reorder_items() {
    let app = TestApp::new().await;
    let (_, auth) = app.approved_decorator("Paula", "paula4@example.com").await;

    let mut ids = Vec::new();
    for title in ["Primeiro", "Segundo", "Terceiro"] {
        let res = create_item(&app, &auth, title, None).await;
        let body = parse_body(res).await;
        ids.push(body["id"].as_str().unwrap().to_string());
    }

    let reversed: Vec<_> = ids.iter().rev().cloned().collect();
    let res = app.router.clone().oneshot(
        Request::builder().method("PUT").uri("/api/v1/decorator/portfolio/reorder")
            .header(header::COOKIE, auth.cookie_header())
            .header("X-CSRF-Token", &auth.csrf_token)
            .header("Content-Type", "application/json")
            .body(Body::from(json!({ "ordered_ids": reversed }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let list = parse_body(res).await;
    let titles: Vec<_> = list.as_array().unwrap().iter()
        .map(|i| i["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["Terceiro", "Segundo", "Primeiro"]);
}

#[tokio::test]
async fn test_hidden_items_stay_out_of_public_profile() {
    let app = TestApp::new().await;
    let (registered, auth) = app.approved_decorator("Paula", "paula5@example.com").await;
    let slug = registered["slug"].as_str().unwrap();

    let res = create_item(&app, &auth, "Visivel", None).await;
    parse_body(res).await;
    let res = create_item(&app, &auth, "Escondido", None).await;
    let hidden = parse_body(res).await;
    let hidden_id = hidden["id"].as_str().unwrap();

    let res = app.router.clone().oneshot(
        Request::builder().method("PUT")
            .uri(format!("/api/v1/decorator/portfolio/{}", hidden_id))
            .header(header::COOKIE, auth.cookie_header())
            .header("X-CSRF-Token", &auth.csrf_token)
            .header("Content-Type", "application/json")
            .body(Body::from(json!({ "visible": false }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri(format!("/api/v1/public/decorators/{}", slug))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    let body = parse_body(res).await;
    let titles: Vec<_> = body["portfolio"].as_array().unwrap().iter()
        .map(|i| i["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Visivel"]);

    // The decorator's own listing still shows both.
    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/decorator/portfolio")
            .header(header::COOKIE, auth.cookie_header())
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    let body = parse_body(res).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_delete_item_removes_stored_image() {
    let app = TestApp::new().await;
    let (_, auth) = app.approved_decorator("Paula", "paula6@example.com").await;

    let res = create_item(&app, &auth, "Com foto", Some(("foto.jpg", b"bytes"))).await;
    let body = parse_body(res).await;
    let id = body["id"].as_str().unwrap();
    assert_eq!(app.images.stored.lock().unwrap().len(), 1);

    let res = app.router.clone().oneshot(
        Request::builder().method("DELETE")
            .uri(format!("/api/v1/decorator/portfolio/{}", id))
            .header(header::COOKIE, auth.cookie_header())
            .header("X-CSRF-Token", &auth.csrf_token)
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    assert!(app.images.stored.lock().unwrap().is_empty());

    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/decorator/portfolio")
            .header(header::COOKIE, auth.cookie_header())
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    let body = parse_body(res).await;
    assert!(body.as_array().unwrap().is_empty());
}
