use axum::{extract::State, Json};
use time::OffsetDateTime;
use tracing::instrument;

use crate::{
    app_state::AppState,
    error::{ApiError, Result},
    middleware::UserIdentity,
    models::entitlement::EntitlementResponse,
};

/// GET /api/v1/entitlement
#[instrument(skip(state, identity), fields(user_id = %identity.user_id))]
pub async fn get_entitlement(
    State(state): State<AppState>,
    identity: UserIdentity,
) -> Result<Json<EntitlementResponse>> {
    let profile = state
        .user_directory
        .fetch_profile(identity.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Profile not found".to_string()))?;

    Ok(Json(EntitlementResponse {
        success: true,
        is_active: profile.entitlement.is_active_at(OffsetDateTime::now_utc()),
        entitlement: profile.entitlement,
    }))
}
