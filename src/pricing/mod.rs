//! Regional pricing: locale/timezone → region → plan → discounted price.
//!
//! Everything here is pure; callers pass the client's locale and timezone
//! explicitly.

pub mod catalog;
pub mod discount;
pub mod region;

pub use catalog::{BillingPeriod, PricingPlan};
pub use discount::{final_price, to_minor_units};
pub use region::Region;
