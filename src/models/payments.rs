use serde::{Deserialize, Serialize};
use validator::Validate;

use super::entitlement::UserEntitlement;

/// POST /api/v1/payments/verify request
#[derive(Debug, Deserialize, Validate)]
pub struct VerifyPaymentRequest {
    #[validate(length(min = 1, max = 255))]
    pub payment_id: String,
    #[validate(length(min = 1, max = 255))]
    pub order_id: String,
    #[validate(length(min = 1, max = 512))]
    pub signature: String,
}

/// POST /api/v1/payments/verify response
#[derive(Debug, Serialize)]
pub struct VerifyPaymentResponse {
    pub success: bool,
    pub entitlement: UserEntitlement,
}

/// Gateway checkout callback; consumed by exactly one verification
#[derive(Debug, Clone)]
pub struct PaymentVerification {
    pub payment_id: String,
    pub order_id: String,
    pub signature: String,
}

impl From<VerifyPaymentRequest> for PaymentVerification {
    fn from(request: VerifyPaymentRequest) -> Self {
        Self {
            payment_id: request.payment_id,
            order_id: request.order_id,
            signature: request.signature,
        }
    }
}
