use premium_checkout::{routes::create_router, AppState, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,premium_checkout=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting premium checkout service");

    let config = Config::load()?;

    tracing::info!(
        "Loaded configuration - Server: {}:{}, reverification policy: {:?}",
        config.server.host,
        config.server.port,
        config.payments.reverification
    );

    let state = AppState::new(config.clone()).await?;

    tracing::info!("Initialized application state");

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
