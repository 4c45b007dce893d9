//! WorkWave API server
//!
//! Run with: cargo run -p workwave-web

use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use workwave_db::Database;
use workwave_web::{config::Config, router::build_router, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("workwave=debug,info")),
        )
        .init();

    info!("WorkWave starting up...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = Config::load()?;
    info!(
        bind = %config.server.bind,
        mail = ?config.mail.provider,
        origins = config.server.cors_origins.len(),
        "configuration loaded"
    );

    let db = Database::connect(&config.database.url, config.database.max_connections).await?;
    db.initialize().await?;
    let stats = db.stats().await?;
    info!(
        users = stats.users,
        businesses = stats.businesses,
        bookings = stats.bookings,
        "database ready"
    );

    let state = AppState::from_config(Arc::new(db), &config)?;
    let app = build_router(state, &config.server.cors_origins);

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("WorkWave stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}
