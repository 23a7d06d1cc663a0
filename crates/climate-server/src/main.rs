//! Climate server - housing suitability scoring backend

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use climate_server::api;
use climate_server::config::Config;
use climate_server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("climate_server=debug".parse()?)
            .add_directive("climate_core=info".parse()?))
        .init();

    tracing::info!("Starting climate server...");

    let config = Config::from_env();
    let port = config.server_port;

    // Datasets must be loaded before the listener is bound.
    let state = Arc::new(AppState::from_config(&config)?);

    let app = api::routes().with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
