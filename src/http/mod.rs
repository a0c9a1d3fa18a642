//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection (loopback only)
//!     → server.rs (Axum setup, request ID, tracing)
//!     → security::access_control (allow-list gate)
//!     → upload.rs (multipart, MIME check, extraction)
//!     → response.rs (JSON body or {"error": ...})
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;
pub mod upload;

pub use request::{XLSX_MIME, X_REQUEST_ID};
pub use response::ApiError;
pub use server::{build_router, HttpServer};
pub use upload::{FILE_FIELD, PARSE_BORDERS_PATH};
