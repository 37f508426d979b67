use axum::{extract::State, Json};
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::{
    app_state::AppState,
    error::{ApiError, AppJson, Result},
    middleware::UserIdentity,
    models::orders::{CreateOrderRequest, CreateOrderResponse},
    services::NewOrder,
};

/// POST /api/v1/orders
///
/// Request body:
/// ```json
/// {
///   "amount": 39900,
///   "currency": "INR",
///   "user_id": "7f9c2ba4-...",
///   "promo_code": "SAVE20",   // optional
///   "discount": 20            // optional, must match the code
/// }
/// ```
///
/// Response:
/// ```json
/// { "success": true, "order_id": "order_...", "amount": 39900, "currency": "INR", "key_id": "rzp_..." }
/// ```
#[instrument(skip(state, identity, request))]
pub async fn create_order(
    State(state): State<AppState>,
    identity: UserIdentity,
    AppJson(request): AppJson<CreateOrderRequest>,
) -> Result<Json<CreateOrderResponse>> {
    request
        .validate()
        .map_err(|e| ApiError::BadRequest(format!("Validation error: {}", e)))?;

    let user_id = Uuid::parse_str(request.user_id.trim())
        .map_err(|_| ApiError::BadRequest("Invalid user_id".to_string()))?;

    // Orders are only placed for the caller
    if user_id != identity.user_id {
        return Err(ApiError::Unauthorized(
            "user_id does not match the authenticated user".to_string(),
        ));
    }

    let order = state
        .order_service
        .create_order(NewOrder {
            amount: request.amount,
            currency: request.currency,
            user_id,
            promo_code: request.promo_code,
            discount_percentage: request.discount,
        })
        .await?;

    Ok(Json(CreateOrderResponse {
        success: true,
        order_id: order.id,
        amount: order.amount,
        currency: order.currency,
        key_id: state.order_service.key_id().to_string(),
    }))
}
