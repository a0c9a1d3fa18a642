//! Request identification and upload inspection helpers.
//!
//! # Responsibilities
//! - Generate a UUID request ID as early as possible and echo it back
//! - Normalize declared media types before comparison
//!
//! # Design Decisions
//! - Request ID layers come from tower-http; the header name is shared with logging

use axum::http::{HeaderMap, HeaderName};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

/// Header carrying the per-request identifier.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// MIME type a workbook upload must declare.
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Layer that assigns a fresh UUID to requests arriving without one.
pub fn set_request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid)
}

/// Layer that copies the request ID onto the response.
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(X_REQUEST_ID)
}

/// Request ID for logging, `"unknown"` if the header is absent or not UTF-8.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Media type of a `Content-Type` value: parameters dropped, lowercased.
pub fn media_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Whether a declared content type names an XLSX workbook.
pub fn is_xlsx(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| media_type(ct) == XLSX_MIME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn media_type_strips_parameters() {
        assert_eq!(media_type("text/plain; charset=utf-8"), "text/plain");
        assert_eq!(media_type("  Application/JSON "), "application/json");
        assert_eq!(media_type(""), "");
    }

    #[test]
    fn xlsx_detection() {
        assert!(is_xlsx(Some(XLSX_MIME)));
        assert!(is_xlsx(Some(
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet; name=a.xlsx"
        )));
        assert!(!is_xlsx(Some("application/vnd.ms-excel")));
        assert!(!is_xlsx(Some("application/octet-stream")));
        assert!(!is_xlsx(None));
    }

    #[test]
    fn request_id_fallback() {
        let mut headers = HeaderMap::new();
        assert_eq!(request_id(&headers), "unknown");

        headers.insert(X_REQUEST_ID, HeaderValue::from_static("abc-123"));
        assert_eq!(request_id(&headers), "abc-123");
    }
}
