// Request/Response models
pub mod entitlement;
pub mod orders;
pub mod payments;
pub mod pricing;
pub mod promo;
