use axum::{extract::State, Json};
use tracing::instrument;
use validator::Validate;

use crate::{
    app_state::AppState,
    error::{ApiError, AppJson, Result},
    models::promo::{PromoValidateRequest, PromoValidateResponse},
};

/// POST /api/v1/promo/validate
///
/// Always 200 for a well-formed body; `valid` carries the outcome.
#[instrument(skip(state, request))]
pub async fn validate_promo(
    State(state): State<AppState>,
    AppJson(request): AppJson<PromoValidateRequest>,
) -> Result<Json<PromoValidateResponse>> {
    request
        .validate()
        .map_err(|e| ApiError::BadRequest(format!("Validation error: {}", e)))?;

    let promo = state.promo_service.validate(&request.promo_code).await;

    Ok(Json(PromoValidateResponse {
        success: true,
        promo,
    }))
}
