//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the upload handler
//! - Wire up middleware (request ID, tracing, access gate, body limit)
//! - Bind server to listener with connect info
//! - Drain in-flight requests on shutdown

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::post,
    Router,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::ServiceConfig;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::http::response::ApiError;
use crate::http::upload::{parse_xlsx_borders, PARSE_BORDERS_PATH};
use crate::security::{access_gate, AllowList};

/// HTTP server for the border extraction API.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server. The allow-list is fixed for the server's lifetime.
    pub fn new(config: ServiceConfig, allow_list: AllowList) -> Self {
        let router = build_router(&config, allow_list);
        Self { router, config }
    }

    /// Run the server, accepting connections on the given listener until a
    /// shutdown signal arrives.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            max_upload_bytes = ?self.config.limits.max_upload_bytes,
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
///
/// The gate is layered after the fallback is registered so unknown paths are
/// gated as well.
pub fn build_router(config: &ServiceConfig, allow_list: AllowList) -> Router {
    Router::new()
        .route(PARSE_BORDERS_PATH, post(parse_xlsx_borders))
        .fallback(not_found)
        .layer(body_limit(config.limits.max_upload_bytes))
        .layer(middleware::from_fn_with_state(allow_list, access_gate))
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id_layer())
        .layer(set_request_id_layer())
}

/// Uploads are unbounded unless a limit is configured.
fn body_limit(max_upload_bytes: Option<usize>) -> DefaultBodyLimit {
    match max_upload_bytes {
        Some(limit) => DefaultBodyLimit::max(limit),
        None => DefaultBodyLimit::disable(),
    }
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}
