//! pulse-server - Team Pulse backend server
//!
//! Serves the `/ask` endpoint and the chat page.

use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod routes;
mod state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive("pulse_server=info".parse()?)
                .add_directive("pulse_core=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .init();

    info!("pulse-server v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = config::Config::from_env()?;
    let addr = config.listen_addr();

    let state = state::AppState::from_config(config)?;
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down...");
    Ok(())
}

/// Resolve on Ctrl-C
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
