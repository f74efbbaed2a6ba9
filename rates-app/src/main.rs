//! # Exchange Rate Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the storage adapter
//! - Create the rate service
//! - Start the HTTP server

mod config;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rates_hex::{RateService, inbound::HttpServer};
use rates_repo::build_store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,rates_app=debug,rates_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = config::Config::from_env()?;

    tracing::info!("Starting exchange rate api on port {}", config.port);

    // Build store (handles connection and migration)
    let store = build_store(&config.database_url).await?;

    // Create the rate service
    let service = RateService::new(store);

    // Create and run the HTTP server
    let server = HttpServer::new(service);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    Ok(())
}
