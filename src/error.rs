use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    ExpiredToken,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Promo authority unreachable while placing an order
    #[error("Promo code could not be verified: {0}")]
    PromoUnavailable(String),

    #[error("Payment gateway rejected request: {0}")]
    GatewayRejected(String),

    #[error("Invalid payment signature")]
    InvalidSignature,

    /// Payment was verified but the entitlement write did not commit
    #[error("Subscription update failed: {0}")]
    SubscriptionUpdateFailed(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::PromoUnavailable(_) | ApiError::InvalidSignature => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Unauthorized(_) | ApiError::InvalidToken(_) | ApiError::ExpiredToken => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Database(_)
            | ApiError::GatewayRejected(_)
            | ApiError::SubscriptionUpdateFailed(_)
            | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Database(_) => "DATABASE_ERROR",
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::InvalidToken(_) => "INVALID_TOKEN",
            ApiError::ExpiredToken => "EXPIRED_TOKEN",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::PromoUnavailable(_) => "PROMO_UNAVAILABLE",
            ApiError::GatewayRejected(_) => "GATEWAY_ERROR",
            ApiError::InvalidSignature => "INVALID_SIGNATURE",
            ApiError::SubscriptionUpdateFailed(_) => "SUBSCRIPTION_UPDATE_FAILED",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match self {
            ApiError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                "An internal database error occurred".to_string()
            }
            ApiError::GatewayRejected(ref reason) => {
                tracing::error!("Payment gateway error: {}", reason);
                format!("Failed to create order: {}", reason)
            }
            ApiError::PromoUnavailable(ref detail) => {
                tracing::warn!("Promo authority unavailable: {}", detail);
                "Promo code could not be verified right now; retry without the code".to_string()
            }
            ApiError::InvalidSignature => "Invalid payment signature".to_string(),
            ApiError::SubscriptionUpdateFailed(ref detail) => {
                tracing::error!("Subscription update failed: {}", detail);
                "Payment verified but subscription update failed".to_string()
            }
            ApiError::ExpiredToken => "Access token has expired".to_string(),
            ApiError::Internal(ref e) => {
                tracing::error!("Internal error: {:?}", e);
                "An internal error occurred".to_string()
            }
            ApiError::BadRequest(ref msg)
            | ApiError::Unauthorized(ref msg)
            | ApiError::InvalidToken(ref msg)
            | ApiError::NotFound(ref msg)
            | ApiError::Conflict(ref msg) => msg.clone(),
        };

        let body = json!({
            "success": false,
            "error": message,
            "code": self.code(),
        });

        (self.status(), Json(body)).into_response()
    }
}

/// JSON body extractor whose rejections render as `ApiError::BadRequest`
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

// Helper type for results
pub type Result<T> = std::result::Result<T, ApiError>;
