//! Payment verification: the only path that grants premium entitlement.

use crate::{
    config::{PaymentsConfig, ReverificationPolicy},
    error::{ApiError, Result},
    models::{entitlement::UserEntitlement, payments::PaymentVerification},
    services::user_directory::UserDirectory,
};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;
use subtle::ConstantTimeEq;
use time::{Duration, OffsetDateTime};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Hex HMAC-SHA256 of `order_id|payment_id`, the gateway's checkout signature
pub fn sign_payment(secret: &str, order_id: &str, payment_id: &str) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("Invalid signing key: {}", e)))?;
    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Constant-time comparison of `signature` against the expected hex digest
pub fn verify_payment_signature(
    secret: &str,
    order_id: &str,
    payment_id: &str,
    signature: &str,
) -> Result<()> {
    let expected = sign_payment(secret, order_id, payment_id)?;
    if bool::from(expected.as_bytes().ct_eq(signature.as_bytes())) {
        Ok(())
    } else {
        Err(ApiError::InvalidSignature)
    }
}

pub struct PaymentService {
    signing_secret: String,
    payments: PaymentsConfig,
    directory: Arc<dyn UserDirectory>,
}

impl PaymentService {
    pub fn new(
        signing_secret: impl Into<String>,
        payments: PaymentsConfig,
        directory: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            signing_secret: signing_secret.into(),
            payments,
            directory,
        }
    }

    /// Verify a checkout callback and activate premium for `user_id`.
    ///
    /// No directory access happens before the signature check passes.
    #[instrument(
        skip(self, verification),
        fields(order_id = %verification.order_id, payment_id = %verification.payment_id)
    )]
    pub async fn verify(
        &self,
        user_id: Uuid,
        verification: &PaymentVerification,
    ) -> Result<UserEntitlement> {
        if let Err(e) = verify_payment_signature(
            &self.signing_secret,
            &verification.order_id,
            &verification.payment_id,
            &verification.signature,
        ) {
            warn!(user_id = %user_id, "Payment signature verification failed");
            return Err(e);
        }

        self.ensure_not_consumed(user_id, verification).await?;

        let entitlement = UserEntitlement::premium(
            self.payments.plan_id.clone(),
            OffsetDateTime::now_utc(),
            Duration::days(self.payments.plan_duration_days),
        );

        match self
            .directory
            .update_entitlement(
                user_id,
                &entitlement,
                &verification.payment_id,
                &verification.order_id,
            )
            .await
        {
            Ok(()) => {}
            // Lost a race with another account for the same payment
            Err(ApiError::Conflict(message)) => return Err(ApiError::Conflict(message)),
            Err(e) => {
                error!(
                    user_id = %user_id,
                    order_id = %verification.order_id,
                    payment_id = %verification.payment_id,
                    error = %e,
                    "Payment verified but entitlement was not written; reconcile manually"
                );
                return Err(ApiError::SubscriptionUpdateFailed(format!(
                    "user {} payment {}: {}",
                    user_id, verification.payment_id, e
                )));
            }
        }

        info!(user_id = %user_id, "Premium entitlement activated");

        Ok(entitlement)
    }

    /// A payment grants one account. Under `reject_replayed` it grants once.
    async fn ensure_not_consumed(
        &self,
        user_id: Uuid,
        verification: &PaymentVerification,
    ) -> Result<()> {
        let owner = self
            .directory
            .payment_owner(&verification.payment_id)
            .await
            .map_err(|e| {
                error!(
                    user_id = %user_id,
                    payment_id = %verification.payment_id,
                    error = %e,
                    "Payment verified but consumption record could not be read; reconcile manually"
                );
                ApiError::SubscriptionUpdateFailed(format!(
                    "user {} payment {}: {}",
                    user_id, verification.payment_id, e
                ))
            })?;

        let Some(owner) = owner else {
            return Ok(());
        };

        if owner != user_id {
            warn!(user_id = %user_id, owner = %owner, "Payment already applied to another account");
            return Err(ApiError::Conflict("Payment already applied".to_string()));
        }

        if self.payments.reverification == ReverificationPolicy::RejectReplayed {
            warn!(user_id = %user_id, "Replayed payment rejected");
            return Err(ApiError::Conflict("Payment already applied".to_string()));
        }

        Ok(())
    }
}
