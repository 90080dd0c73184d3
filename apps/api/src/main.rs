mod config;
mod errors;
mod export;
mod flags;
mod listing;
mod models;
mod notify;
mod routes;
mod screening;
mod seed;
mod settings;
mod shutdown;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::flags::InMemoryFlagStore;
use crate::notify::LogNotifier;
use crate::routes::build_router;
use crate::screening::SimulatedScorer;
use crate::shutdown::install_shutdown_handler;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Configuration first; malformed values abort startup
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting hireboard v{}", env!("CARGO_PKG_VERSION"));

    let shutdown = install_shutdown_handler()?;

    // Simulated scorer stands in for the remote screening service
    let scorer = Arc::new(SimulatedScorer::new(
        Duration::from_millis(config.screen_delay_ms),
        Duration::from_millis(config.bulk_screen_delay_ms),
    ));
    info!(
        single_ms = config.screen_delay_ms,
        bulk_ms = config.bulk_screen_delay_ms,
        "Simulated scorer initialized"
    );

    let state = AppState::seeded(
        &config,
        scorer,
        Arc::new(InMemoryFlagStore::new()),
        Arc::new(LogNotifier),
        &shutdown,
    );
    info!(
        applications = config.applications_page_size,
        jobs = config.jobs_page_size,
        exams = config.exams_page_size,
        users = config.users_page_size,
        "Boards seeded (page sizes)"
    );

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled_owned().await })
        .await?;

    info!("Shutdown complete");
    Ok(())
}
