pub use entity::sea_orm_active_enums::PlanTier;
use serde::Serialize;
use time::{Duration, OffsetDateTime};

/// Subscription fields of a user's profile record
///
/// `has_active_subscription == true` implies `plan_tier == Premium` and
/// `plan_end_date > plan_start_date`; the constructors are the only way this
/// service builds a premium value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserEntitlement {
    pub has_active_subscription: bool,
    pub plan_tier: PlanTier,
    pub plan_id: Option<String>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub plan_start_date: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub plan_end_date: Option<OffsetDateTime>,
}

impl UserEntitlement {
    pub fn free() -> Self {
        Self {
            has_active_subscription: false,
            plan_tier: PlanTier::Free,
            plan_id: None,
            plan_start_date: None,
            plan_end_date: None,
        }
    }

    /// Premium entitlement starting at `start` and lasting `duration`
    pub fn premium(plan_id: impl Into<String>, start: OffsetDateTime, duration: Duration) -> Self {
        Self {
            has_active_subscription: true,
            plan_tier: PlanTier::Premium,
            plan_id: Some(plan_id.into()),
            plan_start_date: Some(start),
            plan_end_date: Some(start + duration),
        }
    }

    /// Whether premium access applies at `now` (flag set and window not elapsed)
    pub fn is_active_at(&self, now: OffsetDateTime) -> bool {
        self.has_active_subscription
            && self.plan_tier == PlanTier::Premium
            && self.plan_end_date.is_some_and(|end| end > now)
    }
}

impl From<&entity::profiles::Model> for UserEntitlement {
    fn from(profile: &entity::profiles::Model) -> Self {
        Self {
            has_active_subscription: profile.has_active_subscription,
            plan_tier: profile.plan_tier,
            plan_id: profile.plan_id.clone(),
            plan_start_date: profile.plan_start_date,
            plan_end_date: profile.plan_end_date,
        }
    }
}

/// GET /api/v1/entitlement response
#[derive(Debug, Serialize)]
pub struct EntitlementResponse {
    pub success: bool,
    pub is_active: bool,
    pub entitlement: UserEntitlement,
}
