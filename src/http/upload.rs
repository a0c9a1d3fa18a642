//! Workbook upload handler.
//!
//! Accepts a multipart body, picks out the `file` part, checks its declared
//! type, and answers with the border grid of every worksheet.

use axum::{
    extract::{multipart::MultipartRejection, Multipart},
    http::HeaderMap,
    Json,
};
use std::time::Instant;

use crate::borders::{extract_document_borders, DocumentBorders};
use crate::http::request::{is_xlsx, request_id};
use crate::http::response::ApiError;
use crate::observability::metrics;

/// Path the upload handler is mounted on.
pub const PARSE_BORDERS_PATH: &str = "/udec-bot/api/parse-xlsx-borders";

/// Name of the multipart part carrying the workbook.
pub const FILE_FIELD: &str = "file";

pub async fn parse_xlsx_borders(
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<DocumentBorders>, ApiError> {
    let start = Instant::now();
    let request_id = request_id(&headers).to_string();

    match handle_upload(multipart).await {
        Ok((doc, size)) => {
            tracing::info!(
                request_id = %request_id,
                bytes = size,
                sheets = doc.sheet_count(),
                cells = doc.cell_count(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Borders extracted"
            );
            metrics::record_upload("ok");
            Ok(Json(doc))
        }
        Err(err) => {
            if err.status().is_server_error() {
                tracing::error!(request_id = %request_id, error = %err, "Upload failed");
            } else {
                tracing::debug!(request_id = %request_id, error = %err, "Upload rejected");
            }
            metrics::record_upload(err.outcome());
            Err(err)
        }
    }
}

async fn handle_upload(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(DocumentBorders, usize), ApiError> {
    // A body that isn't multipart has no files in it.
    let Ok(mut multipart) = multipart else {
        return Err(ApiError::NoFile);
    };

    while let Some(field) = multipart.next_field().await? {
        // Parts without a filename are plain form values.
        if field.name() != Some(FILE_FIELD) || field.file_name().is_none() {
            continue;
        }

        if !is_xlsx(field.content_type()) {
            return Err(ApiError::InvalidFormat);
        }

        let bytes = field.bytes().await?;
        let size = bytes.len();

        let started = Instant::now();
        let result = extract_document_borders(bytes).await;
        let outcome = if result.is_ok() { "ok" } else { "processing_failed" };
        metrics::record_extraction(outcome, started);

        return Ok((result?, size));
    }

    Err(ApiError::NoFile)
}
