use crate::common::{InMemoryDirectory, TestApp, KEY_ID, KEY_SECRET, UNUSED_GATEWAY};
use axum::http::{Method, StatusCode};
use serde_json::json;
use uuid::Uuid;
use wiremock::{
    matchers::{basic_auth, body_partial_json, method, path},
    Mock, MockServer, ResponseTemplate,
};

fn gateway_order(amount: u64, currency: &str) -> serde_json::Value {
    json!({
        "id": "order_TEST123",
        "entity": "order",
        "amount": amount,
        "currency": currency,
        "receipt": "rcpt_test",
        "status": "created"
    })
}

#[tokio::test]
async fn test_create_order_with_promo_code() {
    let gateway = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/orders"))
        .and(basic_auth(KEY_ID, KEY_SECRET))
        .and(body_partial_json(json!({
            "amount": 39900,
            "currency": "INR",
            "notes": { "promo_code": "SAVE20", "discount_percentage": 20 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(gateway_order(39900, "INR")))
        .expect(1)
        .mount(&gateway)
        .await;

    let user_id = Uuid::new_v4();
    let app = TestApp::new(&gateway.uri(), InMemoryDirectory::with_free_user(user_id));
    let token = app.token_for(user_id);

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/orders",
            Some(token.as_str()),
            Some(json!({
                "amount": 39900,
                "currency": "INR",
                "user_id": user_id.to_string(),
                "promo_code": "save20",
                "discount": 20
            })),
        )
        .await;

    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["success"], true);
    assert_eq!(body["order_id"], "order_TEST123");
    assert_eq!(body["amount"], 39900);
    assert_eq!(body["currency"], "INR");
    assert_eq!(body["key_id"], KEY_ID);
    assert!(body.get("key_secret").is_none());
}

#[tokio::test]
async fn test_create_order_without_promo_code() {
    let gateway = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/orders"))
        .and(body_partial_json(json!({
            "amount": 1200,
            "currency": "USD",
            "notes": { "discount_percentage": 0 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(gateway_order(1200, "USD")))
        .expect(1)
        .mount(&gateway)
        .await;

    let user_id = Uuid::new_v4();
    let app = TestApp::new(&gateway.uri(), InMemoryDirectory::with_free_user(user_id));
    let token = app.token_for(user_id);

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/orders",
            Some(token.as_str()),
            Some(json!({ "amount": 1200, "currency": "usd", "user_id": user_id })),
        )
        .await;

    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["order_id"], "order_TEST123");
    assert_eq!(app.promos.lookups(), 0);
}

#[tokio::test]
async fn test_discount_not_matching_promo_code_is_rejected() {
    let gateway = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gateway_order(24950, "INR")))
        .expect(0)
        .mount(&gateway)
        .await;

    let user_id = Uuid::new_v4();
    let app = TestApp::new(&gateway.uri(), InMemoryDirectory::with_free_user(user_id));
    let token = app.token_for(user_id);

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/orders",
            Some(token.as_str()),
            Some(json!({
                "amount": 24950,
                "currency": "INR",
                "user_id": user_id,
                "promo_code": "SAVE20",
                "discount": 50
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_discount_without_promo_code_is_rejected() {
    let user_id = Uuid::new_v4();
    let app = TestApp::new(UNUSED_GATEWAY, InMemoryDirectory::with_free_user(user_id));
    let token = app.token_for(user_id);

    let (status, _) = app
        .send(
            Method::POST,
            "/api/v1/orders",
            Some(token.as_str()),
            Some(json!({ "amount": 39900, "currency": "INR", "user_id": user_id, "discount": 20 })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_amount_must_match_catalog() {
    let gateway = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gateway_order(100, "INR")))
        .expect(0)
        .mount(&gateway)
        .await;

    let user_id = Uuid::new_v4();
    let app = TestApp::new(&gateway.uri(), InMemoryDirectory::with_free_user(user_id));
    let token = app.token_for(user_id);

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/orders",
            Some(token.as_str()),
            Some(json!({ "amount": 100, "currency": "INR", "user_id": user_id })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Amount does not match catalog price");
}

#[tokio::test]
async fn test_invalid_promo_code_is_rejected_with_reason() {
    let user_id = Uuid::new_v4();
    let app = TestApp::new(UNUSED_GATEWAY, InMemoryDirectory::with_free_user(user_id));
    let token = app.token_for(user_id);

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/orders",
            Some(token.as_str()),
            Some(json!({
                "amount": 49900,
                "currency": "INR",
                "user_id": user_id,
                "promo_code": "EXPIRED"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("This promo code has expired"));
}

#[tokio::test]
async fn test_promo_outage_tells_client_to_retry_without_code() {
    let user_id = Uuid::new_v4();
    let app = TestApp::new(UNUSED_GATEWAY, InMemoryDirectory::with_free_user(user_id));
    let token = app.token_for(user_id);

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/orders",
            Some(token.as_str()),
            Some(json!({
                "amount": 39900,
                "currency": "INR",
                "user_id": user_id,
                "promo_code": "OUTAGE",
                "discount": 20
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "PROMO_UNAVAILABLE");
    assert_eq!(app.promos.lookups(), 1);

    // The same promo endpoint degrades to "no discount"
    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/promo/validate",
            None,
            Some(json!({ "promo_code": "OUTAGE" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], false);
    assert_eq!(body["discount_percentage"], 0);
    assert_eq!(body["message"], "Error validating code");
}

#[tokio::test]
async fn test_missing_user_id_is_bad_request() {
    let user_id = Uuid::new_v4();
    let app = TestApp::new(UNUSED_GATEWAY, InMemoryDirectory::with_free_user(user_id));
    let token = app.token_for(user_id);

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/orders",
            Some(token.as_str()),
            Some(json!({ "amount": 49900, "currency": "INR" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_order_for_another_user_is_unauthorized() {
    let user_id = Uuid::new_v4();
    let app = TestApp::new(UNUSED_GATEWAY, InMemoryDirectory::with_free_user(user_id));
    let token = app.token_for(user_id);

    let (status, _) = app
        .send(
            Method::POST,
            "/api/v1/orders",
            Some(token.as_str()),
            Some(json!({ "amount": 49900, "currency": "INR", "user_id": Uuid::new_v4() })),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_missing_bearer_is_unauthorized() {
    let user_id = Uuid::new_v4();
    let app = TestApp::new(UNUSED_GATEWAY, InMemoryDirectory::with_free_user(user_id));

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/orders",
            None,
            Some(json!({ "amount": 49900, "currency": "INR", "user_id": user_id })),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_gateway_rejection_surfaces_reason() {
    let gateway = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/orders"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "code": "BAD_REQUEST_ERROR",
                "description": "Order amount less than minimum amount allowed"
            }
        })))
        .expect(1)
        .mount(&gateway)
        .await;

    let user_id = Uuid::new_v4();
    let app = TestApp::new(&gateway.uri(), InMemoryDirectory::with_free_user(user_id));
    let token = app.token_for(user_id);

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/orders",
            Some(token.as_str()),
            Some(json!({ "amount": 1100, "currency": "EUR", "user_id": user_id })),
        )
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "GATEWAY_ERROR");
    assert_eq!(
        body["error"],
        "Failed to create order: Order amount less than minimum amount allowed"
    );
}

#[tokio::test]
async fn test_gateway_error_without_body_uses_status() {
    let gateway = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/orders"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&gateway)
        .await;

    let user_id = Uuid::new_v4();
    let app = TestApp::new(&gateway.uri(), InMemoryDirectory::with_free_user(user_id));
    let token = app.token_for(user_id);

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/orders",
            Some(token.as_str()),
            Some(json!({ "amount": 900, "currency": "USD", "user_id": user_id })),
        )
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to create order: HTTP 502");
}
