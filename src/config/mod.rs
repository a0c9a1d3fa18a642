//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional config file (TOML, --config)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (PY_API_PORT overrides listener.port)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//!     → handed to HttpServer::new at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload
//! - All fields have defaults to allow running with no file at all
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError, PORT_ENV};
pub use schema::{ListenerConfig, LimitsConfig, ObservabilityConfig, ServiceConfig};
pub use validation::{validate_config, ValidationError};
