//! XLSX border extraction service.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client (loopback)          ┌────────────────────────────────────────────────┐
//!     ───────────────────────────┼─▶ request id → trace → access gate → router    │
//!                                │                                   │            │
//!                                │                                   ▼            │
//!                                │                       upload handler (multipart│
//!                                │                        + MIME check)           │
//!                                │                                   │            │
//!                                │                                   ▼            │
//!                                │                  borders: decode (blocking     │
//!                                │                  pool) → walk sheets/rows/cells│
//!     ◀──────────────────────────┼── JSON grid or {"error": ...}                  │
//!                                └────────────────────────────────────────────────┘
//! ```
//!
//! The port comes from `PY_API_PORT`; everything else has defaults and may be
//! overridden with `--config <file.toml>`.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "xlsx-border-api")]
#[command(about = "Reports which cell edges carry borders in uploaded XLSX workbooks", long_about = None)]
struct Cli {
    /// Optional TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    xlsx_border_api::lifecycle::start(cli.config.as_deref()).await?;
    Ok(())
}
