//! User directory: the profile store holding each user's entitlement.

use crate::{
    error::{ApiError, Result},
    models::entitlement::UserEntitlement,
};
use async_trait::async_trait;
use anyhow::anyhow;
use entity::{
    applied_payments,
    prelude::{AppliedPayments, Profiles},
    profiles,
};
use sea_orm::{
    sea_query::OnConflict, ActiveModelTrait, DatabaseConnection, EntityTrait, Set,
    TransactionTrait,
};
use time::OffsetDateTime;
use tracing::{instrument, warn};
use uuid::Uuid;

/// A user's profile as far as this service is concerned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRecord {
    pub user_id: Uuid,
    pub entitlement: UserEntitlement,
    pub last_payment_id: Option<String>,
}

impl From<profiles::Model> for ProfileRecord {
    fn from(profile: profiles::Model) -> Self {
        Self {
            user_id: profile.id,
            entitlement: UserEntitlement::from(&profile),
            last_payment_id: profile.last_payment_id,
        }
    }
}

#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn fetch_profile(&self, user_id: Uuid) -> Result<Option<ProfileRecord>>;

    /// Account that consumed `payment_id`, if any
    async fn payment_owner(&self, payment_id: &str) -> Result<Option<Uuid>>;

    /// Write the entitlement fields and record `payment_id` as consumed by
    /// `user_id`, atomically. A missing profile is an error; a payment id
    /// already consumed by another account is `Conflict`.
    async fn update_entitlement(
        &self,
        user_id: Uuid,
        entitlement: &UserEntitlement,
        payment_id: &str,
        order_id: &str,
    ) -> Result<()>;
}

/// `profiles` table in Postgres
pub struct SeaOrmUserDirectory {
    db: DatabaseConnection,
}

impl SeaOrmUserDirectory {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserDirectory for SeaOrmUserDirectory {
    #[instrument(skip(self))]
    async fn fetch_profile(&self, user_id: Uuid) -> Result<Option<ProfileRecord>> {
        let profile = Profiles::find_by_id(user_id).one(&self.db).await?;
        Ok(profile.map(ProfileRecord::from))
    }

    #[instrument(skip(self))]
    async fn payment_owner(&self, payment_id: &str) -> Result<Option<Uuid>> {
        let applied = AppliedPayments::find_by_id(payment_id.to_string())
            .one(&self.db)
            .await?;
        Ok(applied.map(|payment| payment.user_id))
    }

    #[instrument(skip(self, entitlement))]
    async fn update_entitlement(
        &self,
        user_id: Uuid,
        entitlement: &UserEntitlement,
        payment_id: &str,
        order_id: &str,
    ) -> Result<()> {
        let txn = self.db.begin().await?;

        let profile = Profiles::find_by_id(user_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Profile {} not found", user_id)))?;

        let applied = applied_payments::ActiveModel {
            payment_id: Set(payment_id.to_string()),
            user_id: Set(user_id),
            order_id: Set(order_id.to_string()),
            applied_at: Set(OffsetDateTime::now_utc()),
        };

        // Insert the consumption record; if the payment id already exists, do nothing instead of erroring.
        let inserted = AppliedPayments::insert(applied)
            .on_conflict(
                OnConflict::column(applied_payments::Column::PaymentId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&txn)
            .await?;

        if inserted == 0 {
            let existing = AppliedPayments::find_by_id(payment_id.to_string())
                .one(&txn)
                .await?
                .ok_or_else(|| {
                    ApiError::Internal(anyhow!(
                        "Failed to read applied payment after insert for payment {}",
                        payment_id
                    ))
                })?;

            if existing.user_id != user_id {
                // Another account consumed this payment first
                txn.rollback().await?;
                warn!(
                    payment_id,
                    owner = %existing.user_id,
                    "Payment already applied to another account"
                );
                return Err(ApiError::Conflict("Payment already applied".to_string()));
            }
        }

        let mut profile_active: profiles::ActiveModel = profile.into();
        profile_active.has_active_subscription = Set(entitlement.has_active_subscription);
        profile_active.plan_tier = Set(entitlement.plan_tier);
        profile_active.plan_id = Set(entitlement.plan_id.clone());
        profile_active.plan_start_date = Set(entitlement.plan_start_date);
        profile_active.plan_end_date = Set(entitlement.plan_end_date);
        profile_active.last_payment_id = Set(Some(payment_id.to_string()));
        profile_active.update(&txn).await?;

        txn.commit().await?;

        Ok(())
    }
}
