use std::path::PathBuf;

use signup::config::Configuration;
use signup::error::Result;
use signup::{app, initialize_state, telemetry};

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::setup_logging();

    let path = std::env::var("CONFIG_PATH").map(PathBuf::from).unwrap_or_default();
    let config = Configuration::default().path(path).read()?;

    let metrics = match telemetry::setup_metrics_recorder() {
        Ok(handle) => Some(handle),
        Err(err) => {
            tracing::warn!(error = %err, "metrics recorder not installed");
            None
        },
    };

    let port = config.port;
    let state = initialize_state(config, metrics)?;

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!(port, version = env!("CARGO_PKG_VERSION"), "server started");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "cannot listen for shutdown signal");
    }

    tracing::info!("shutting down");
}
