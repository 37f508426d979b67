//! `SeaORM` Entity prelude

pub use super::applied_payments::Entity as AppliedPayments;
pub use super::profiles::Entity as Profiles;
