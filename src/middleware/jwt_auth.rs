use crate::{
    app_state::AppState,
    error::{ApiError, Result},
    services::jwt_service::JWTService,
};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

/// Request extension storing the authenticated user from the bearer token
#[derive(Debug, Clone)]
pub struct UserIdentity {
    pub user_id: Uuid,
    pub email: Option<String>,
}

/// Bearer authentication middleware
///
/// Validates the `Authorization: Bearer <token>` header and stores the
/// user identity in request extensions. Fails closed with 401 before the
/// handler runs.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            ApiError::Unauthorized(
                "Invalid Authorization format, expected 'Bearer <token>'".to_string(),
            )
        })?;

    let claims = state.jwt_service.validate_token(token)?;
    let user_id = JWTService::user_id_from_claims(&claims)?;

    request.extensions_mut().insert(UserIdentity {
        user_id,
        email: claims.email,
    });

    Ok(next.run(request).await)
}

/// Axum extractor for user identity
///
/// Only works on routes protected by jwt_auth_middleware.
impl<S> FromRequestParts<S> for UserIdentity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<UserIdentity>()
            .cloned()
            .ok_or_else(|| {
                ApiError::Unauthorized(
                    "User identity not found - route must be protected by jwt_auth_middleware"
                        .to_string(),
                )
            })
    }
}
