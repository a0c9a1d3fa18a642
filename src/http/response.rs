//! Response handling.
//!
//! # Responsibilities
//! - Map every failure to a status code and a `{"error": "..."}` body
//! - Keep the client-visible messages in one place
//!
//! # Design Decisions
//! - Access and request-shape errors are detected before any decoding work
//! - Extraction failures all collapse to 500; no partial results are returned

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::borders::ExtractError;

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Failures surfaced to HTTP clients.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Access denied.")]
    AccessDenied,

    #[error("No file provided.")]
    NoFile,

    #[error("Invalid file format. Expected XLSX file.")]
    InvalidFormat,

    #[error("Error processing file: {0}")]
    Processing(#[from] ExtractError),

    /// The upload body could not be read (truncated stream, size limit).
    #[error("{}", .0.body_text())]
    Upload(#[from] MultipartError),

    #[error("Not found.")]
    NotFound,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::AccessDenied => StatusCode::FORBIDDEN,
            ApiError::NoFile | ApiError::InvalidFormat => StatusCode::BAD_REQUEST,
            ApiError::Processing(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Upload(e) => e.status(),
            ApiError::NotFound => StatusCode::NOT_FOUND,
        }
    }

    /// Label used for the request outcome metric.
    pub fn outcome(&self) -> &'static str {
        match self {
            ApiError::AccessDenied => "access_denied",
            ApiError::NoFile => "no_file",
            ApiError::InvalidFormat => "invalid_format",
            ApiError::Processing(_) => "processing_failed",
            ApiError::Upload(_) => "upload_failed",
            ApiError::NotFound => "not_found",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody { error: self.to_string() };
        (status, Json(body)).into_response()
    }
}
