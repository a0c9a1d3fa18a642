//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Initialize logging, then metrics
//! - Bind the loopback listener and serve until shutdown

use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{load_config, ConfigError, ObservabilityConfig};
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::{logging, metrics};
use crate::security::AllowList;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("logging: {0}")]
    Logging(#[from] logging::LoggingError),

    #[error("metrics: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("listener.host `{0}` is not an IP address")]
    Address(String),

    #[error("observability.metrics_address `{0}` is not a socket address")]
    MetricsAddress(String),

    #[error("server: {0}")]
    Io(#[from] std::io::Error),
}

/// Run the service to completion.
pub async fn start(config_path: Option<&Path>) -> Result<(), StartupError> {
    let config = load_config(config_path)?;
    logging::init_logging(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        host = %config.listener.host,
        port = config.listener.port,
        max_upload_bytes = ?config.limits.max_upload_bytes,
        "Configuration loaded"
    );

    if let Some(addr) = metrics_address(&config.observability)? {
        metrics::init_metrics(addr)?;
    }

    let addr = config
        .listener
        .socket_addr()
        .ok_or_else(|| StartupError::Address(config.listener.host.clone()))?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());

    let server = HttpServer::new(config, AllowList::loopback());
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Exporter address, or `None` when metrics are disabled.
fn metrics_address(config: &ObservabilityConfig) -> Result<Option<SocketAddr>, StartupError> {
    if !config.metrics_enabled {
        return Ok(None);
    }
    config
        .metrics_address
        .parse()
        .map(Some)
        .map_err(|_| StartupError::MetricsAddress(config.metrics_address.clone()))
}
