use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tracing::info;

mod config;
mod error;
mod fixtures;
mod rest;

use config::GatewayConfig;
use fixtures::FixtureStore;
use rest::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = GatewayConfig::from_env()?;

    info!("Loading fixtures from {}", config.fixtures_path.display());
    let fixtures = FixtureStore::load(&config.fixtures_path)?;
    info!(
        "Loaded {} tours and expenses for {} tours",
        fixtures.tours.len(),
        fixtures.expenses.len()
    );

    // CORS setup to allow the dashboard to call the gateway
    let cors = CorsLayer::new()
        .allow_origin(config.cors_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    // Unknown paths fall through to the built dashboard so client routes reload
    let dashboard = ServeDir::new(&config.static_dir)
        .fallback(ServeFile::new(config.static_dir.join("index.html")));

    let app = rest::router(AppState::new(fixtures))
        .fallback_service(dashboard)
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!("Gateway listening on {}", config.addr);

    axum::serve(listener, app).await?;

    Ok(())
}
