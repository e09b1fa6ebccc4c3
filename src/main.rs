use daily_usage_api::{clients::MeterClient, routes, services::UsageService, Config};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, Level};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded");

    // Initialize meter client and service
    let client = MeterClient::new(&config.meter_api)?;
    let service = UsageService::new(Arc::new(client));

    // Create router
    let app = routes::create_router(service);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
