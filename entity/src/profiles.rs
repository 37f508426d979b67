//! `SeaORM` Entity for the `profiles` table (user directory)

use super::sea_orm_active_enums::PlanTier;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub email: Option<String>,
    pub has_active_subscription: bool,
    pub plan_tier: PlanTier,
    pub plan_id: Option<String>,
    pub plan_start_date: Option<TimeDateTimeWithTimeZone>,
    pub plan_end_date: Option<TimeDateTimeWithTimeZone>,
    pub last_payment_id: Option<String>,
    pub created_at: TimeDateTimeWithTimeZone,
    pub updated_at: TimeDateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
