use crate::{
    config::Config,
    services::{
        JWTService, OrderService, PaymentGateway, PaymentService, PromoAuthority, PromoService,
        SeaOrmPromoAuthority, SeaOrmUserDirectory, UserDirectory,
    },
};
use migration::{Migrator, MigratorTrait};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub jwt_service: Arc<JWTService>,
    pub promo_service: Arc<PromoService>,
    pub order_service: Arc<OrderService>,
    pub payment_service: Arc<PaymentService>,
    pub user_directory: Arc<dyn UserDirectory>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> Result<Self, anyhow::Error> {
        // Connect to database
        let db = sea_orm::Database::connect(&config.database.url).await?;

        if config.database.run_migrations {
            Migrator::up(&db, None).await?;
            tracing::info!("Applied pending migrations");
        }

        let promo_authority: Arc<dyn PromoAuthority> =
            Arc::new(SeaOrmPromoAuthority::new(db.clone()));
        let user_directory: Arc<dyn UserDirectory> = Arc::new(SeaOrmUserDirectory::new(db));

        Self::with_backends(config, promo_authority, user_directory)
    }

    /// Wire services over the given data-layer backends
    pub fn with_backends(
        config: Config,
        promo_authority: Arc<dyn PromoAuthority>,
        user_directory: Arc<dyn UserDirectory>,
    ) -> Result<Self, anyhow::Error> {
        let jwt_service = Arc::new(JWTService::new(Arc::new(config.auth.clone())));
        let promo_service = Arc::new(PromoService::new(promo_authority));
        let gateway = Arc::new(PaymentGateway::new(&config.gateway)?);
        let order_service = Arc::new(OrderService::new(gateway, promo_service.clone()));
        let payment_service = Arc::new(PaymentService::new(
            config.gateway.key_secret.clone(),
            config.payments.clone(),
            user_directory.clone(),
        ));

        Ok(Self {
            jwt_service,
            promo_service,
            order_service,
            payment_service,
            user_directory,
            config: Arc::new(config),
        })
    }
}
