use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // One row per gateway payment that granted an entitlement; the
        // primary key makes a payment id consumable by one account only.
        manager
            .create_table(
                Table::create()
                    .table(AppliedPayments::Table)
                    .if_not_exists()
                    .col(string(AppliedPayments::PaymentId).primary_key())
                    .col(uuid(AppliedPayments::UserId).not_null())
                    .col(string(AppliedPayments::OrderId).not_null())
                    .col(
                        timestamp_with_time_zone(AppliedPayments::AppliedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_applied_payments_user_id")
                            .from(AppliedPayments::Table, AppliedPayments::UserId)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_applied_payments_user_id")
                    .table(AppliedPayments::Table)
                    .col(AppliedPayments::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AppliedPayments::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum AppliedPayments {
    Table,
    PaymentId,
    UserId,
    OrderId,
    AppliedAt,
}

#[derive(DeriveIden)]
enum Profiles {
    Table,
    Id,
}
