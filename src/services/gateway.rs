//! Payment gateway REST client (order creation).

use crate::{
    config::GatewayConfig,
    error::{ApiError, Result},
    models::orders::OrderNotes,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, instrument, warn};

/// Body of `POST /v1/orders`
#[derive(Debug, Serialize)]
pub struct GatewayOrderRequest<'a> {
    /// Minor currency units
    pub amount: u64,
    pub currency: &'a str,
    pub receipt: &'a str,
    pub notes: &'a OrderNotes,
}

/// Order as returned by the gateway
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayOrder {
    pub id: String,
    pub amount: u64,
    pub currency: String,
    #[serde(default)]
    pub receipt: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GatewayErrorResponse {
    error: GatewayErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GatewayErrorDetail {
    #[serde(default)]
    code: Option<String>,
    description: String,
}

pub struct PaymentGateway {
    config: GatewayConfig,
    http_client: reqwest::Client,
}

impl PaymentGateway {
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config: config.clone(),
            http_client,
        })
    }

    /// Public key id; the only gateway credential a client may see
    pub fn key_id(&self) -> &str {
        &self.config.key_id
    }

    /// Place one order with the gateway. Not retried.
    #[instrument(skip(self, request), fields(receipt = request.receipt, amount = request.amount))]
    pub async fn create_order(&self, request: &GatewayOrderRequest<'_>) -> Result<GatewayOrder> {
        let endpoint = format!("{}/v1/orders", self.config.api_base.trim_end_matches('/'));

        let response = self
            .http_client
            .post(&endpoint)
            .basic_auth(&self.config.key_id, Some(&self.config.key_secret))
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::GatewayRejected(format!("Gateway unreachable: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let (code, reason) = match response.json::<GatewayErrorResponse>().await {
                Ok(body) => (body.error.code, body.error.description),
                Err(_) => (None, format!("HTTP {}", status.as_u16())),
            };
            warn!(
                status = status.as_u16(),
                code = code.as_deref().unwrap_or("-"),
                reason = %reason,
                "Gateway rejected order"
            );
            return Err(ApiError::GatewayRejected(reason));
        }

        let order: GatewayOrder = response
            .json()
            .await
            .map_err(|e| ApiError::GatewayRejected(format!("Invalid gateway response: {}", e)))?;

        info!(
            order_id = %order.id,
            status = order.status.as_deref().unwrap_or("unknown"),
            "Gateway order created"
        );

        Ok(order)
    }
}
