use crate::{
    error::{ApiError, Result},
    models::orders::{Order, OrderNotes},
    pricing::{catalog, final_price, to_minor_units},
    services::{
        gateway::{GatewayOrderRequest, PaymentGateway},
        PromoService,
    },
};
use std::sync::Arc;
use time::OffsetDateTime;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Order placement input, as received from an authenticated client
#[derive(Debug, Clone)]
pub struct NewOrder {
    /// Minor units, discount already applied
    pub amount: u64,
    pub currency: String,
    pub user_id: Uuid,
    pub promo_code: Option<String>,
    /// Discount the client believes applies; checked, never trusted
    pub discount_percentage: Option<u8>,
}

pub struct OrderService {
    gateway: Arc<PaymentGateway>,
    promo_service: Arc<PromoService>,
}

impl OrderService {
    pub fn new(gateway: Arc<PaymentGateway>, promo_service: Arc<PromoService>) -> Self {
        Self {
            gateway,
            promo_service,
        }
    }

    pub fn key_id(&self) -> &str {
        self.gateway.key_id()
    }

    /// Create a gateway order for one checkout attempt.
    ///
    /// The promo code is re-validated here and the amount must match a
    /// catalog price for the currency after that discount.
    #[instrument(skip(self, new_order), fields(user_id = %new_order.user_id))]
    pub async fn create_order(&self, new_order: NewOrder) -> Result<Order> {
        let currency = normalize_currency(&new_order.currency)?;
        if new_order.amount == 0 {
            return Err(ApiError::BadRequest("Amount must be positive".to_string()));
        }

        let (promo_code, discount_percentage) = self
            .resolve_discount(
                new_order.promo_code.as_deref(),
                new_order.discount_percentage,
            )
            .await?;

        ensure_catalog_amount(new_order.amount, &currency, discount_percentage)?;

        let receipt = receipt_for(new_order.user_id, OffsetDateTime::now_utc());
        let notes = OrderNotes {
            user_id: new_order.user_id.to_string(),
            promo_code,
            discount_percentage,
        };

        let gateway_order = self
            .gateway
            .create_order(&GatewayOrderRequest {
                amount: new_order.amount,
                currency: &currency,
                receipt: &receipt,
                notes: &notes,
            })
            .await?;

        info!(
            order_id = %gateway_order.id,
            amount = gateway_order.amount,
            currency = %gateway_order.currency,
            discount_percentage,
            "Created checkout order"
        );

        Ok(Order {
            id: gateway_order.id,
            amount: gateway_order.amount,
            currency: gateway_order.currency,
            user_id: new_order.user_id,
            receipt,
            notes,
        })
    }

    /// Server-side discount for the order: the authority's figure for the
    /// code, or zero without one. A claimed discount must agree with it.
    async fn resolve_discount(
        &self,
        promo_code: Option<&str>,
        claimed: Option<u8>,
    ) -> Result<(Option<String>, u8)> {
        let code = promo_code.map(str::trim).filter(|code| !code.is_empty());

        let Some(code) = code else {
            if claimed.is_some_and(|pct| pct != 0) {
                return Err(ApiError::BadRequest(
                    "Discount supplied without a promo code".to_string(),
                ));
            }
            return Ok((None, 0));
        };

        let promo = self.promo_service.lookup(code).await.map_err(|e| {
            warn!(code, error = ?e, "Promo authority unavailable during order creation");
            ApiError::PromoUnavailable(format!("{:?}", e))
        })?;
        if !promo.valid {
            return Err(ApiError::BadRequest(format!(
                "Promo code rejected: {}",
                promo.message
            )));
        }

        if let Some(pct) = claimed {
            if pct != promo.discount_percentage {
                warn!(
                    code = %promo.code,
                    claimed = pct,
                    actual = promo.discount_percentage,
                    "Client discount does not match promo code"
                );
                return Err(ApiError::BadRequest(
                    "Discount does not match promo code".to_string(),
                ));
            }
        }

        Ok((Some(promo.code), promo.discount_percentage))
    }
}

fn normalize_currency(currency: &str) -> Result<String> {
    let currency = currency.trim();
    if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ApiError::BadRequest(format!(
            "Invalid currency code: {}",
            currency
        )));
    }
    Ok(currency.to_ascii_uppercase())
}

/// `amount` must be the discounted price of some plan billed in `currency`
fn ensure_catalog_amount(amount: u64, currency: &str, discount_percentage: u8) -> Result<()> {
    let matches_plan = catalog::plans_for_currency(currency).any(|plan| {
        to_minor_units(final_price(plan.base_price, discount_percentage)) == Some(amount)
    });

    if matches_plan {
        Ok(())
    } else {
        warn!(amount, currency, discount_percentage, "Order amount does not match catalog");
        Err(ApiError::BadRequest(
            "Amount does not match catalog price".to_string(),
        ))
    }
}

/// Unique per attempt: user prefix plus nanosecond timestamp (gateway limit 40 chars)
fn receipt_for(user_id: Uuid, at: OffsetDateTime) -> String {
    let user = user_id.simple().to_string();
    format!("rcpt_{}_{}", &user[..8], at.unix_timestamp_nanos())
}
