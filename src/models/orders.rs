use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// POST /api/v1/orders request
///
/// `amount` is in minor currency units and already includes any discount.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrderRequest {
    #[validate(range(min = 1))]
    pub amount: u64,
    #[validate(length(equal = 3))]
    pub currency: String,
    #[validate(length(min = 1, max = 64))]
    pub user_id: String,
    #[validate(length(max = 64))]
    pub promo_code: Option<String>,
    #[validate(range(max = 100))]
    pub discount: Option<u8>,
}

/// POST /api/v1/orders response
#[derive(Debug, Serialize)]
pub struct CreateOrderResponse {
    pub success: bool,
    pub order_id: String,
    pub amount: u64,
    pub currency: String,
    /// Public gateway key id for opening checkout on the client
    pub key_id: String,
}

/// Audit metadata attached to a gateway order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderNotes {
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promo_code: Option<String>,
    pub discount_percentage: u8,
}

/// A checkout attempt as placed with the gateway; immutable once created
#[derive(Debug, Clone)]
pub struct Order {
    pub id: String,
    pub amount: u64,
    pub currency: String,
    pub user_id: Uuid,
    pub receipt: String,
    pub notes: OrderNotes,
}
