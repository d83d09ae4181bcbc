mod config;
mod errors;
mod export;
mod models;
mod optimize;
mod providers;
mod render;
mod routes;
mod state;
mod validation;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::optimize::patterns::PatternTable;
use crate::providers::create_provider;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ResumeForge API v{}", env!("CARGO_PKG_VERSION"));

    // Select the AI provider (openai or local) from configuration
    let ai = create_provider(&config)?;
    info!(
        "AI provider initialized: {} (model: {})",
        ai.provider_name(),
        ai.model_name()
    );

    // Compile the keyword pattern tables once; shared read-only across handlers
    let patterns = Arc::new(PatternTable::builtin());
    info!("Keyword pattern table compiled");

    let state = AppState {
        config: config.clone(),
        ai,
        patterns,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
