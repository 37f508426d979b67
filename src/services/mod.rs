// Service modules
pub mod gateway;
pub mod jwt_service;
pub mod order_service;
pub mod payment_service;
pub mod promo_service;
pub mod user_directory;

pub use gateway::PaymentGateway;
pub use jwt_service::JWTService;
pub use order_service::{NewOrder, OrderService};
pub use payment_service::PaymentService;
pub use promo_service::{PromoAuthority, PromoSelection, PromoService, SeaOrmPromoAuthority};
pub use user_directory::{ProfileRecord, SeaOrmUserDirectory, UserDirectory};
