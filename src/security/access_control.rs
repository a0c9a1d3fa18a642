//! Access Control Middleware.
//! Rejects every client whose address is not on the allow-list.

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::collections::HashSet;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use crate::http::response::ApiError;
use crate::observability::metrics;

/// Addresses allowed to reach the service.
pub const ALLOWED_ADDRESSES: [&str; 3] = ["127.0.0.1", "localhost", "::1"];

/// Immutable set of permitted remote addresses.
///
/// Membership is textual: the client IP is rendered and looked up as-is, so
/// `::ffff:127.0.0.1` is not the same client as `127.0.0.1`.
#[derive(Debug, Clone)]
pub struct AllowList {
    addresses: Arc<HashSet<String>>,
}

impl AllowList {
    /// The loopback-only list the service ships with.
    pub fn loopback() -> Self {
        Self::from_addresses(ALLOWED_ADDRESSES)
    }

    pub fn from_addresses<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            addresses: Arc::new(addresses.into_iter().map(Into::into).collect()),
        }
    }

    pub fn permits(&self, ip: IpAddr) -> bool {
        self.addresses.contains(&ip.to_string())
    }
}

impl Default for AllowList {
    fn default() -> Self {
        Self::loopback()
    }
}

pub async fn access_gate(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(allow_list): State<AllowList>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if allow_list.permits(addr.ip()) {
        return next.run(req).await;
    }

    tracing::warn!(
        client = %addr.ip(),
        method = %req.method(),
        path = %req.uri().path(),
        "Access denied"
    );
    metrics::record_access_denied();
    ApiError::AccessDenied.into_response()
}
