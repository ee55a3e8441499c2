mod accounts;
mod auth;
mod config;
mod content;
mod db;
mod errors;
mod generation;
mod inventory;
mod llm_client;
mod models;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, DEFAULT_ADMIN_PASSWORD};
use crate::db::create_pool;
use crate::llm_client::provider_from_config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting AutoContent API v{}", env!("CARGO_PKG_VERSION"));

    if config.admin_password == DEFAULT_ADMIN_PASSWORD {
        warn!("ADMIN_PASSWORD is the insecure default; override it in production");
    }

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize the completion provider (backend chosen by LLM_BACKEND)
    let provider = provider_from_config(&config);
    info!(
        "Completion provider initialized (backend: {}, model: {})",
        config.llm_backend.as_str(),
        provider.model()
    );

    // Build app state
    let state = AppState {
        db,
        provider,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
