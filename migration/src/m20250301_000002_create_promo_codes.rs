use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Codes are stored upper-cased; lookups normalize the same way
        manager
            .create_table(
                Table::create()
                    .table(PromoCodes::Table)
                    .if_not_exists()
                    .col(string(PromoCodes::Code).primary_key())
                    .col(
                        integer(PromoCodes::DiscountPercentage)
                            .not_null()
                            .check(
                                Expr::col(PromoCodes::DiscountPercentage)
                                    .between(0, 100),
                            ),
                    )
                    .col(boolean(PromoCodes::IsActive).default(true).not_null())
                    .col(timestamp_with_time_zone_null(PromoCodes::ValidUntil))
                    .col(
                        timestamp_with_time_zone(PromoCodes::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Remote procedure queried by the promo validator. Always returns
        // exactly one row.
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE OR REPLACE FUNCTION validate_promo_code(promo_code TEXT)
                RETURNS TABLE(valid BOOLEAN, discount_percentage INTEGER, message TEXT) AS $$
                BEGIN
                    RETURN QUERY
                    SELECT
                        TRUE,
                        p.discount_percentage,
                        format('Promo code applied: %s%% off', p.discount_percentage)
                    FROM promo_codes p
                    WHERE p.code = UPPER(TRIM(promo_code))
                      AND p.is_active
                      AND (p.valid_until IS NULL OR p.valid_until > NOW());

                    IF NOT FOUND THEN
                        RETURN QUERY SELECT FALSE, 0, 'Invalid or expired promo code'::TEXT;
                    END IF;
                END;
                $$ LANGUAGE plpgsql STABLE;
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP FUNCTION IF EXISTS validate_promo_code(TEXT);")
            .await?;

        manager
            .drop_table(Table::drop().table(PromoCodes::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum PromoCodes {
    Table,
    Code,
    DiscountPercentage,
    IsActive,
    ValidUntil,
    CreatedAt,
}
