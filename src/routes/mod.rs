// Route modules
pub mod entitlement;
pub mod orders;
pub mod payments;
pub mod pricing;
pub mod promo;

use crate::{
    app_state::AppState,
    middleware::{jwt_auth_middleware, logging_middleware},
};
use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api_v1_routes(state.clone()))
        // Outermost so pre-flight requests never reach auth
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// API v1 routes
fn api_v1_routes(state: AppState) -> Router<AppState> {
    // Routes requiring a bearer token
    let protected_routes = Router::new()
        .route("/orders", post(orders::create_order))
        .route("/payments/verify", post(payments::verify_payment))
        .route("/entitlement", get(entitlement::get_entitlement))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_middleware,
        ));

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/pricing", get(pricing::get_pricing))
        .route("/promo/validate", post(promo::validate_promo));

    Router::new()
        .merge(protected_routes)
        .merge(public_routes)
        .layer(middleware::from_fn(logging_middleware))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
