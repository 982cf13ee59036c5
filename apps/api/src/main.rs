mod analysis;
mod catalog;
mod config;
mod errors;
mod intake;
mod notice;
mod routes;
mod state;
mod wizard;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::build_analyzer;
use crate::catalog::Catalog;
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;
use crate::wizard::{spawn_sweeper, SessionStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; malformed values abort startup
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SkillMatch API v{}", env!("CARGO_PKG_VERSION"));

    // Learning-resource catalog (built-in unless CATALOG_PATH is set)
    let catalog = Catalog::load(config.catalog_path.as_deref())?;
    if catalog.is_empty() {
        warn!("Catalog is empty; every lookup will fall back to platform suggestions");
    } else {
        info!("Catalog loaded ({} resources)", catalog.len());
    }

    let analyzer = build_analyzer(&config);
    info!("Analyzer backend: {}", analyzer.backend());

    // Sessions live in memory and expire after SESSION_TTL_SECS of inactivity
    let sessions = SessionStore::new();
    spawn_sweeper(
        sessions.clone(),
        config.session_ttl,
        config.session_sweep_interval,
    );

    let state = AppState {
        config: config.clone(),
        sessions,
        analyzer,
        catalog: Arc::new(catalog),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
