//! XLSX border extraction service library.

pub mod borders;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use borders::{BorderFlags, DocumentBorders, WorksheetBorders};
pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use security::AllowList;
