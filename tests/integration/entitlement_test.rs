use crate::common::{InMemoryDirectory, TestApp, UNUSED_GATEWAY};
use axum::http::{Method, StatusCode};
use premium_checkout::{models::entitlement::UserEntitlement, services::ProfileRecord};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

#[tokio::test]
async fn test_free_user_is_inactive() {
    let user_id = Uuid::new_v4();
    let app = TestApp::new(UNUSED_GATEWAY, InMemoryDirectory::with_free_user(user_id));
    let token = app.token_for(user_id);

    let (status, body) = app
        .send(Method::GET, "/api/v1/entitlement", Some(token.as_str()), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_active"], false);
    assert_eq!(body["entitlement"]["plan_tier"], "free");
    assert!(body["entitlement"]["plan_end_date"].is_null());
}

#[tokio::test]
async fn test_lapsed_premium_is_inactive() {
    let user_id = Uuid::new_v4();
    let directory = InMemoryDirectory::default();
    directory.insert(ProfileRecord {
        user_id,
        entitlement: UserEntitlement::premium(
            "premium_yearly",
            OffsetDateTime::now_utc() - Duration::days(400),
            Duration::days(365),
        ),
        last_payment_id: Some("pay_old".to_string()),
    });
    let app = TestApp::new(UNUSED_GATEWAY, directory);
    let token = app.token_for(user_id);

    let (status, body) = app
        .send(Method::GET, "/api/v1/entitlement", Some(token.as_str()), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["entitlement"]["has_active_subscription"], true);
    assert_eq!(body["is_active"], false);
}

#[tokio::test]
async fn test_current_premium_is_active() {
    let user_id = Uuid::new_v4();
    let directory = InMemoryDirectory::default();
    directory.insert(ProfileRecord {
        user_id,
        entitlement: UserEntitlement::premium(
            "premium_yearly",
            OffsetDateTime::now_utc() - Duration::days(10),
            Duration::days(365),
        ),
        last_payment_id: Some("pay_recent".to_string()),
    });
    let app = TestApp::new(UNUSED_GATEWAY, directory);
    let token = app.token_for(user_id);

    let (status, body) = app
        .send(Method::GET, "/api/v1/entitlement", Some(token.as_str()), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_active"], true);
}

#[tokio::test]
async fn test_missing_profile_is_not_found() {
    let app = TestApp::new(UNUSED_GATEWAY, InMemoryDirectory::default());
    let token = app.token_for(Uuid::new_v4());

    let (status, body) = app
        .send(Method::GET, "/api/v1/entitlement", Some(token.as_str()), None)
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}
