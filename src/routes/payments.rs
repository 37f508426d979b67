use axum::{extract::State, Json};
use tracing::instrument;
use validator::Validate;

use crate::{
    app_state::AppState,
    error::{ApiError, AppJson, Result},
    middleware::UserIdentity,
    models::payments::{PaymentVerification, VerifyPaymentRequest, VerifyPaymentResponse},
};

/// POST /api/v1/payments/verify
///
/// Verifies the gateway checkout signature and activates premium for the
/// authenticated user.
#[instrument(skip(state, identity, request), fields(user_id = %identity.user_id))]
pub async fn verify_payment(
    State(state): State<AppState>,
    identity: UserIdentity,
    AppJson(request): AppJson<VerifyPaymentRequest>,
) -> Result<Json<VerifyPaymentResponse>> {
    request
        .validate()
        .map_err(|e| ApiError::BadRequest(format!("Validation error: {}", e)))?;

    let verification = PaymentVerification::from(request);
    let entitlement = state
        .payment_service
        .verify(identity.user_id, &verification)
        .await?;

    Ok(Json(VerifyPaymentResponse {
        success: true,
        entitlement,
    }))
}
