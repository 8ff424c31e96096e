// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use anyhow::Context;
use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::EnvFilter;

use crate::application::fetch_controller::FetchController;
use crate::application::price_service::PriceService;
use crate::infrastructure::config::load_oracle_config;
use crate::infrastructure::http_provider::HttpPriceProvider;
use crate::presentation::app_state::AppState;
use crate::presentation::router::build_router;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_oracle_config().context("Failed to load configuration")?;

    // Create provider (infrastructure layer)
    let provider = Arc::new(HttpPriceProvider::new(&config.provider)?);
    tracing::info!("Price provider: {}", provider.url());

    // Create services (application layer)
    let controller = FetchController::new(provider);
    let price_service = PriceService::new(controller, config.display.label_format()?);

    // Initial fetch, guarded like any user refresh
    price_service.refresh();

    let state = Arc::new(AppState {
        title: format!("{} Price Oracle", config.provider.pair),
        price_service,
    });

    // Build router (presentation layer)
    let router = build_router(state);

    // Start server
    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.bind))?;
    tracing::info!("Starting price-oracle-dashboard on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
