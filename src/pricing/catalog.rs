use serde::Serialize;

use super::region::Region;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingPeriod {
    Year,
}

/// Price of the premium plan in one region
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PricingPlan {
    /// ISO 4217 code
    pub currency: &'static str,
    pub symbol: &'static str,
    /// Display amount in whole currency units
    pub base_price: u64,
    pub period: BillingPeriod,
    /// Shown next to the price only; no tax is computed
    pub display_tax_rate_percent: u8,
}

static INDIA: PricingPlan = PricingPlan {
    currency: "INR",
    symbol: "₹",
    base_price: 499,
    period: BillingPeriod::Year,
    display_tax_rate_percent: 18,
};

static UNITED_STATES: PricingPlan = PricingPlan {
    currency: "USD",
    symbol: "$",
    base_price: 12,
    period: BillingPeriod::Year,
    display_tax_rate_percent: 0,
};

static EUROPE: PricingPlan = PricingPlan {
    currency: "EUR",
    symbol: "€",
    base_price: 11,
    period: BillingPeriod::Year,
    display_tax_rate_percent: 20,
};

static FALLBACK: PricingPlan = PricingPlan {
    currency: "USD",
    symbol: "$",
    base_price: 9,
    period: BillingPeriod::Year,
    display_tax_rate_percent: 0,
};

/// Plan for a region. Exhaustive: a new region needs its plan here.
pub fn price_for(region: Region) -> &'static PricingPlan {
    match region {
        Region::In => &INDIA,
        Region::Us => &UNITED_STATES,
        Region::Eu => &EUROPE,
        Region::Other => &FALLBACK,
    }
}

/// Plan used when the region is unresolved or unknown
pub fn fallback() -> &'static PricingPlan {
    &FALLBACK
}

/// Plan for a raw region code; unknown codes get the fallback plan
pub fn price_for_code(code: &str) -> &'static PricingPlan {
    price_for(Region::from_code(code))
}

/// Every plan billed in `currency` (case-insensitive)
pub fn plans_for_currency(currency: &str) -> impl Iterator<Item = &'static PricingPlan> + '_ {
    Region::ALL
        .into_iter()
        .map(price_for)
        .filter(move |plan| plan.currency.eq_ignore_ascii_case(currency))
}
