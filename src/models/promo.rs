use serde::{Deserialize, Serialize};
use validator::Validate;

/// Result of validating a promo code against the data layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromoCode {
    /// Normalized code (trimmed, upper-cased)
    pub code: String,
    pub valid: bool,
    pub discount_percentage: u8,
    pub message: String,
}

impl PromoCode {
    /// An invalid result; never carries a discount
    pub fn rejected(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            valid: false,
            discount_percentage: 0,
            message: message.into(),
        }
    }
}

/// POST /api/v1/promo/validate request
#[derive(Debug, Deserialize, Validate)]
pub struct PromoValidateRequest {
    #[validate(length(max = 64))]
    pub promo_code: String,
}

/// POST /api/v1/promo/validate response
#[derive(Debug, Serialize)]
pub struct PromoValidateResponse {
    pub success: bool,
    #[serde(flatten)]
    pub promo: PromoCode,
}
