use crate::common::{InMemoryDirectory, TestApp, UNUSED_GATEWAY};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use serde_json::json;
use tower::ServiceExt;

fn app() -> TestApp {
    TestApp::new(UNUSED_GATEWAY, InMemoryDirectory::default())
}

#[tokio::test]
async fn test_valid_code_is_normalized() {
    let app = app();

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/promo/validate",
            None,
            Some(json!({ "promo_code": "  save20 " })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["code"], "SAVE20");
    assert_eq!(body["valid"], true);
    assert_eq!(body["discount_percentage"], 20);
    assert_eq!(app.promos.lookups(), 1);
}

#[tokio::test]
async fn test_unknown_code_is_invalid_with_no_discount() {
    let app = app();

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/promo/validate",
            None,
            Some(json!({ "promo_code": "NOPE" })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], false);
    assert_eq!(body["discount_percentage"], 0);
    assert_eq!(body["message"], "Invalid promo code");
}

#[tokio::test]
async fn test_empty_code_skips_lookup() {
    let app = app();

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/promo/validate",
            None,
            Some(json!({ "promo_code": "   " })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], false);
    assert_eq!(body["message"], "Please enter a promo code");
    assert_eq!(app.promos.lookups(), 0);
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let app = app();

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/promo/validate",
            None,
            Some(json!({ "code": "SAVE20" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(app.promos.lookups(), 0);
}

#[tokio::test]
async fn test_preflight_is_answered() {
    let app = app();

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/orders")
        .header(header::ORIGIN, "https://app.example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(
            header::ACCESS_CONTROL_REQUEST_HEADERS,
            "authorization, content-type",
        )
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}
