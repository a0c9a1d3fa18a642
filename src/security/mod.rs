//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → access_control.rs (remote address against the allow-list)
//!     → Pass to routing
//! ```
//!
//! # Design Decisions
//! - Runs before routing; unknown paths are gated too
//! - Fail closed: any address not on the list is rejected
//! - The list is a source-level constant, handed to the server at construction

pub mod access_control;

pub use access_control::{access_gate, AllowList, ALLOWED_ADDRESSES};
