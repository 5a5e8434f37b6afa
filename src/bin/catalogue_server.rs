// Catalogue Server Binary Entry Point
//
// Purpose: Serve the plant catalogue page, fragments, and JSON API
// Usage: cargo run --features web --bin catalogue_server

use plant_catalogue::client::CatalogueSource;
use plant_catalogue::server::{create_router, AppState};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                // Default log level: info for our crate, warn for others
                "plant_catalogue=info,tower_http=debug,axum=debug,warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting catalogue server...");

    // Configuration from environment variables
    // CATALOGUE_FILE takes precedence for offline serving of a bundle;
    // otherwise records come from the remote catalogue service.
    let source = match std::env::var("CATALOGUE_FILE") {
        Ok(path) => CatalogueSource::File(path.into()),
        Err(_) => {
            let url = std::env::var("CATALOGUE_URL")
                .unwrap_or_else(|_| "http://localhost:8001".to_string());
            CatalogueSource::Remote(url)
        }
    };

    let api_base_url =
        std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:8001".to_string());

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);

    tracing::info!("Configuration:");
    tracing::info!("  CATALOGUE SOURCE: {:?}", source);
    tracing::info!("  API_BASE_URL: {}", api_base_url);
    tracing::info!("  PORT: {}", port);

    // Initialize application state (fetches the catalogue once)
    let state = AppState::new(source, &api_base_url).await?;
    tracing::info!("Application state initialized successfully");

    // Create router with all endpoints and middleware
    let app = create_router(state);

    // Bind to address
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
