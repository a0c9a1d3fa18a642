//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once at startup
//! - Apply the configured filter

use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log filter `{filter}`: {source}")]
    Filter {
        filter: String,
        source: tracing_subscriber::filter::ParseError,
    },

    #[error("failed to install subscriber: {0}")]
    Install(#[from] tracing_subscriber::util::TryInitError),
}

/// Build the filter for the configured level.
pub fn filter(config: &ObservabilityConfig) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(&config.log_level).map_err(|source| LoggingError::Filter {
        filter: config.log_level.clone(),
        source,
    })
}

/// Install the global subscriber.
pub fn init_logging(config: &ObservabilityConfig) -> Result<(), LoggingError> {
    tracing_subscriber::registry()
        .with(filter(config)?)
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;
    Ok(())
}
