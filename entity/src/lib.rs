//! `SeaORM` entities for the data layer

pub mod prelude;

pub mod applied_payments;
pub mod profiles;
pub mod sea_orm_active_enums;
