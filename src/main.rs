// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::application::entry_service::EntryService;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::openweather_client::OpenWeatherClient;
use crate::infrastructure::sqlite_repository::SqliteEntryRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::routes::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let app_config = load_app_config()?;

    // Create adapters (infrastructure layer)
    let repository = Arc::new(SqliteEntryRepository::connect(&app_config.database.url).await?);
    let openweather = Arc::new(OpenWeatherClient::new(&app_config.openweather));

    // Create services (application layer)
    let entry_service = EntryService::new(repository, openweather.clone(), openweather);

    // Create application state
    let state = Arc::new(AppState { entry_service });

    // Build router (presentation layer)
    let router = build_router(state);

    // Start server
    let addr: SocketAddr = app_config
        .server
        .bind_addr
        .parse()
        .with_context(|| format!("Invalid bind address: {}", app_config.server.bind_addr))?;
    tracing::info!("Starting weather-entries service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
