//! `SeaORM` active enums

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "plan_tier")]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    #[sea_orm(string_value = "free")]
    Free,
    #[sea_orm(string_value = "premium")]
    Premium,
}
