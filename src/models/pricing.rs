use serde::{Deserialize, Serialize};

use super::promo::PromoCode;
use crate::pricing::{PricingPlan, Region};

/// GET /api/v1/pricing query
#[derive(Debug, Default, Deserialize)]
pub struct PricingQuery {
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub promo_code: Option<String>,
}

/// Client-visible price for one checkout
#[derive(Debug, Serialize)]
pub struct PricingQuote {
    pub region: Region,
    pub plan: &'static PricingPlan,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promo: Option<PromoCode>,
    pub discount_percentage: u8,
    pub final_price: u64,
    /// `final_price` in minor units, the figure to send when creating an order
    pub amount_minor: u64,
}

#[derive(Debug, Serialize)]
pub struct PricingResponse {
    pub success: bool,
    #[serde(flatten)]
    pub quote: PricingQuote,
}
