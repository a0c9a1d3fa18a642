//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Keep the listener on loopback
//! - Validate value ranges and parseable strings
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>

use std::net::{IpAddr, SocketAddr};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::schema::ServiceConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.host `{0}` is not an IP address")]
    InvalidHost(String),

    #[error("listener.host `{0}` is not a loopback address")]
    NonLoopbackHost(String),

    #[error("limits.max_upload_bytes must be greater than zero")]
    ZeroUploadLimit,

    #[error("observability.log_level `{0}` is not a valid filter")]
    InvalidLogLevel(String),

    #[error("observability.metrics_address `{0}` is not a socket address")]
    InvalidMetricsAddress(String),
}

pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match config.listener.host.parse::<IpAddr>() {
        Ok(ip) if !ip.is_loopback() => {
            errors.push(ValidationError::NonLoopbackHost(config.listener.host.clone()));
        }
        Ok(_) => {}
        Err(_) => errors.push(ValidationError::InvalidHost(config.listener.host.clone())),
    }

    if config.limits.max_upload_bytes == Some(0) {
        errors.push(ValidationError::ZeroUploadLimit);
    }

    if EnvFilter::try_new(&config.observability.log_level).is_err() {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
