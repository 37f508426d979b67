use sea_orm_migration::sea_query::extension::postgres::Type;
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create plan_tier enum
        manager
            .create_type(
                Type::create()
                    .as_enum(PlanTier::Type)
                    .values([PlanTier::Free, PlanTier::Premium])
                    .to_owned(),
            )
            .await?;

        // Profiles are created by the identity provider on sign-up; this
        // service only updates the entitlement columns.
        manager
            .create_table(
                Table::create()
                    .table(Profiles::Table)
                    .if_not_exists()
                    .col(pk_uuid(Profiles::Id))
                    .col(string_null(Profiles::Email))
                    .col(
                        boolean(Profiles::HasActiveSubscription)
                            .default(false)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Profiles::PlanTier)
                            .custom(PlanTier::Type)
                            .not_null()
                            .default(SimpleExpr::Custom("'free'::plan_tier".to_string())),
                    )
                    .col(string_null(Profiles::PlanId))
                    .col(timestamp_with_time_zone_null(Profiles::PlanStartDate))
                    .col(timestamp_with_time_zone_null(Profiles::PlanEndDate))
                    .col(string_null(Profiles::LastPaymentId))
                    .col(
                        timestamp_with_time_zone(Profiles::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Profiles::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .check(
                        Expr::col(Profiles::HasActiveSubscription)
                            .eq(false)
                            .or(Expr::col(Profiles::PlanEndDate)
                                .gt(Expr::col(Profiles::PlanStartDate))),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE OR REPLACE FUNCTION update_profiles_updated_at()
                RETURNS TRIGGER AS $$
                BEGIN
                    NEW.updated_at = NOW();
                    RETURN NEW;
                END;
                $$ LANGUAGE plpgsql;

                CREATE TRIGGER update_profiles_updated_at
                BEFORE UPDATE ON profiles
                FOR EACH ROW
                EXECUTE FUNCTION update_profiles_updated_at();
                "#,
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_profiles_last_payment_id")
                    .table(Profiles::Table)
                    .col(Profiles::LastPaymentId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Profiles::Table).to_owned())
            .await?;

        manager
            .get_connection()
            .execute_unprepared("DROP FUNCTION IF EXISTS update_profiles_updated_at() CASCADE;")
            .await?;

        manager
            .drop_type(Type::drop().name(PlanTier::Type).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum PlanTier {
    #[sea_orm(iden = "plan_tier")]
    Type,
    Free,
    Premium,
}

#[derive(DeriveIden)]
enum Profiles {
    Table,
    Id,
    Email,
    HasActiveSubscription,
    PlanTier,
    PlanId,
    PlanStartDate,
    PlanEndDate,
    LastPaymentId,
    CreatedAt,
    UpdatedAt,
}
