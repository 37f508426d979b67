pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_profiles;
mod m20250301_000002_create_promo_codes;
mod m20250301_000003_create_applied_payments;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_profiles::Migration),
            Box::new(m20250301_000002_create_promo_codes::Migration),
            Box::new(m20250301_000003_create_applied_payments::Migration),
        ]
    }
}
