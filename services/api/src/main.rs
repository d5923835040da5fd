use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use api::{config::ServerConfig, routes, state};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting marketplace API service");

    let config = ServerConfig::from_env();

    // Build the store and seed the course catalog
    let app_state = state::bootstrap(&config).await?;

    info!("Marketplace API initialized successfully");

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!(
        "Marketplace API listening on {}:{}",
        config.host, config.port
    );

    axum::serve(listener, app).await?;

    Ok(())
}
