use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub payments: PaymentsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    /// Apply pending migrations on startup
    #[serde(default)]
    pub run_migrations: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared HS256 secret of the identity provider
    pub jwt_secret: String,
    /// Expected `aud` claim; audience is not checked when unset
    #[serde(default)]
    pub audience: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    pub api_base: String,
    /// Public key id, safe to hand to clients
    pub key_id: String,
    /// Server-side secret: basic-auth password and payment signing key
    pub key_secret: String,
    #[serde(default = "default_gateway_timeout_ms")]
    pub request_timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentsConfig {
    #[serde(default = "default_plan_id")]
    pub plan_id: String,
    #[serde(default = "default_plan_duration_days")]
    pub plan_duration_days: i64,
    #[serde(default)]
    pub reverification: ReverificationPolicy,
}

/// What to do when a payment that was already applied is verified again
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReverificationPolicy {
    /// Re-apply the entitlement with a fresh `now + duration` window
    #[default]
    ExtendFromNow,
    /// Refuse a payment id that matches the profile's last applied payment
    RejectReplayed,
}

impl Default for PaymentsConfig {
    fn default() -> Self {
        Self {
            plan_id: default_plan_id(),
            plan_duration_days: default_plan_duration_days(),
            reverification: ReverificationPolicy::default(),
        }
    }
}

fn default_gateway_timeout_ms() -> u64 {
    15_000
}

fn default_plan_id() -> String {
    "premium_yearly".to_string()
}

fn default_plan_duration_days() -> i64 {
    365
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        // Load .env file if it exists (for environment variable overrides)
        dotenvy::dotenv().ok();

        let config_path = env::var("CHECKOUT_CONFIG").unwrap_or_else(|_| "config".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name(&config_path).required(true))
            // e.g. CHECKOUT__GATEWAY__KEY_SECRET
            .add_source(
                config::Environment::with_prefix("CHECKOUT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
