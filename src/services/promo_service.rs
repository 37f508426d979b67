use crate::{
    error::{ApiError, Result},
    models::promo::PromoCode,
};
use anyhow::anyhow;
use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DbBackend, FromQueryResult, Statement};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

pub const EMPTY_CODE_MESSAGE: &str = "Please enter a promo code";
pub const LOOKUP_FAILED_MESSAGE: &str = "Error validating code";

/// One row returned by the `validate_promo_code` procedure
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct PromoLookupRow {
    pub valid: bool,
    pub discount_percentage: i32,
    pub message: String,
}

/// Trusted remote authority for promo codes
#[async_trait]
pub trait PromoAuthority: Send + Sync {
    /// Look up a normalized code; the first row is authoritative
    async fn lookup(&self, code: &str) -> Result<Vec<PromoLookupRow>>;
}

/// Calls `validate_promo_code(text)` on the data layer
pub struct SeaOrmPromoAuthority {
    db: DatabaseConnection,
}

impl SeaOrmPromoAuthority {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PromoAuthority for SeaOrmPromoAuthority {
    async fn lookup(&self, code: &str) -> Result<Vec<PromoLookupRow>> {
        let statement = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "SELECT valid, discount_percentage, message FROM validate_promo_code($1)",
            [code.into()],
        );

        let rows = PromoLookupRow::find_by_statement(statement)
            .all(&self.db)
            .await?;

        Ok(rows)
    }
}

pub struct PromoService {
    authority: Arc<dyn PromoAuthority>,
}

impl PromoService {
    pub fn new(authority: Arc<dyn PromoAuthority>) -> Self {
        Self { authority }
    }

    /// Trim and upper-case a user-entered code
    pub fn normalize(code: &str) -> String {
        code.trim().to_uppercase()
    }

    /// Validate a code against the authority.
    ///
    /// Empty input short-circuits without a lookup. Lookup failures never
    /// grant a discount.
    #[instrument(skip(self))]
    pub async fn validate(&self, code: &str) -> PromoCode {
        match self.lookup(code).await {
            Ok(promo) => promo,
            Err(e) => {
                warn!(error = ?e, "Promo code lookup failed");
                PromoCode::rejected(Self::normalize(code), LOOKUP_FAILED_MESSAGE)
            }
        }
    }

    /// Like [`PromoService::validate`], but an unreachable or misbehaving
    /// authority is an error instead of a rejected code.
    pub async fn lookup(&self, code: &str) -> Result<PromoCode> {
        let code = Self::normalize(code);
        if code.is_empty() {
            return Ok(PromoCode::rejected(code, EMPTY_CODE_MESSAGE));
        }

        let rows = self.authority.lookup(&code).await?;

        let Some(row) = rows.into_iter().next() else {
            return Err(ApiError::Internal(anyhow!(
                "Promo lookup for {} returned no rows",
                code
            )));
        };

        let discount_percentage = match u8::try_from(row.discount_percentage) {
            Ok(pct) if pct <= 100 => pct,
            _ => {
                return Err(ApiError::Internal(anyhow!(
                    "Promo authority returned discount {} for {}",
                    row.discount_percentage,
                    code
                )));
            }
        };

        debug!(code = %code, valid = row.valid, discount_percentage, "Promo code validated");

        if row.valid {
            Ok(PromoCode {
                code,
                valid: true,
                discount_percentage,
                message: row.message,
            })
        } else {
            Ok(PromoCode::rejected(code, row.message))
        }
    }
}

/// Promo state of one checkout: the last lookup (for display) and the
/// committed code.
#[derive(Debug, Clone, Default)]
pub struct PromoSelection {
    last_result: Option<PromoCode>,
    active: Option<PromoCode>,
}

impl PromoSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and remember the result without committing it
    pub async fn check(&mut self, service: &PromoService, code: &str) -> PromoCode {
        let result = service.validate(code).await;
        self.last_result = Some(result.clone());
        result
    }

    /// Validate and commit the code if valid. An invalid result leaves the
    /// previously active code in place; use [`PromoSelection::clear`] to drop it.
    pub async fn apply(&mut self, service: &PromoService, code: &str) -> PromoCode {
        let result = self.check(service, code).await;
        if result.valid {
            self.active = Some(result.clone());
        }
        result
    }

    pub fn clear(&mut self) {
        self.active = None;
    }

    pub fn active(&self) -> Option<&PromoCode> {
        self.active.as_ref()
    }

    pub fn last_result(&self) -> Option<&PromoCode> {
        self.last_result.as_ref()
    }

    pub fn active_discount(&self) -> u8 {
        self.active.as_ref().map_or(0, |promo| promo.discount_percentage)
    }
}
