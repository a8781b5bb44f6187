//! MemeDoc HTTP Server
//!
//! Axum-based JSON API around the MemeDoc scoring core. The server owns
//! all mutable state (the token cache); every request carries its own
//! inputs.

mod app;
mod config;
mod handlers;
mod state;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    let state = AppState::from_config(&config)?;

    if config.offline {
        tracing::warn!("⚠ Offline mode - serving demo token data only");
    } else {
        tracing::info!("✓ Market data from {}", config.dexscreener.base_url);
    }
    tracing::info!(
        "Token cache TTL: {}s, up to {} entries",
        config.cache_ttl.as_secs(),
        config.cache_max_entries
    );

    let app = app::router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🧠 memedoc server running on http://{}", config.bind_addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health               - Health check");
    tracing::info!("  GET  /api/token/{{address}}  - Token market data");
    tracing::info!("  GET  /api/series           - Synthetic price series");
    tracing::info!("  GET  /api/axes             - Slider level descriptions");
    tracing::info!("  POST /api/diagnose         - Risk diagnosis report (JSON or text/plain)");
    tracing::info!("");
    tracing::info!("{}", memedoc_core::DISCLAIMER);

    axum::serve(listener, app).await?;

    Ok(())
}
