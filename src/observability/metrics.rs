//! Metrics collection and exposition.
//!
//! # Metrics
//! - `border_api_requests_total` (counter): uploads by outcome
//! - `border_api_access_denied_total` (counter): requests stopped by the gate
//! - `border_api_extract_duration_seconds` (histogram): time spent decoding and walking a workbook
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; calls are no-ops until an exporter is installed
//! - Prometheus exporter is opt-in and binds its own listener

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

pub const REQUESTS_TOTAL: &str = "border_api_requests_total";
pub const ACCESS_DENIED_TOTAL: &str = "border_api_access_denied_total";
pub const EXTRACT_DURATION: &str = "border_api_extract_duration_seconds";

/// Install the Prometheus exporter, serving scrapes on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record one handled upload, whatever its outcome.
pub fn record_upload(outcome: &'static str) {
    counter!(REQUESTS_TOTAL, "outcome" => outcome).increment(1);
}

/// Record one extraction run. Only uploads that reached the extractor count.
pub fn record_extraction(outcome: &'static str, start: Instant) {
    histogram!(EXTRACT_DURATION, "outcome" => outcome).record(start.elapsed().as_secs_f64());
}

pub fn record_access_denied() {
    counter!(ACCESS_DENIED_TOTAL).increment(1);
}
