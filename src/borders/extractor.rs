//! Workbook decoding and border traversal.

use tracing::debug;

use crate::borders::error::ExtractError;
use crate::borders::model::{BorderFlags, DocumentBorders, WorksheetBorders};
use crate::borders::package::{read_workbook, Workbook};
use crate::borders::sheet::Worksheet;
use crate::borders::styles::{BorderDef, EdgeLine, StyleTable};

/// Decode an XLSX container held in memory.
///
/// Every worksheet is deserialized eagerly; the traversal needs all of them.
pub fn decode_workbook(bytes: &[u8]) -> Result<Workbook, ExtractError> {
    read_workbook(bytes)
}

/// Walk a decoded workbook and record which edges of every cell carry a line.
pub fn extract_borders(book: &Workbook) -> DocumentBorders {
    DocumentBorders(
        book.sheets
            .iter()
            .map(|sheet| worksheet_borders(sheet, &book.styles))
            .collect(),
    )
}

/// Decode and extract in one step.
pub fn parse_xlsx_borders(bytes: &[u8]) -> Result<DocumentBorders, ExtractError> {
    let book = decode_workbook(bytes)?;
    Ok(extract_borders(&book))
}

/// Run [`parse_xlsx_borders`] on the blocking pool.
///
/// A panic inside the decoder surfaces as [`ExtractError::Aborted`].
pub async fn extract_document_borders<B>(bytes: B) -> Result<DocumentBorders, ExtractError>
where
    B: AsRef<[u8]> + Send + 'static,
{
    match tokio::task::spawn_blocking(move || parse_xlsx_borders(bytes.as_ref())).await {
        Ok(result) => result,
        Err(err) if err.is_panic() => {
            let payload = err.into_panic();
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "workbook decoder panicked".to_string());
            Err(ExtractError::aborted(message))
        }
        Err(err) => Err(ExtractError::aborted(err.to_string())),
    }
}

/// Rows run over the dense used range starting at A1, so gaps inside the
/// range produce the default border rather than shorter rows.
fn worksheet_borders(sheet: &Worksheet, styles: &StyleTable) -> WorksheetBorders {
    let (max_row, max_col) = sheet.dimensions();
    debug!(sheet = %sheet.name, max_row, max_col, "Walking worksheet");

    if max_row == 0 || max_col == 0 {
        return WorksheetBorders::default();
    }

    let rows = (1..=max_row)
        .map(|row| {
            (1..=max_col)
                .map(|col| {
                    let border = match sheet.style_at(row, col) {
                        Some(style) => styles.border_for(style),
                        None => styles.default_border(),
                    };
                    cell_flags(border)
                })
                .collect()
        })
        .collect();

    WorksheetBorders(rows)
}

fn cell_flags(border: Option<&BorderDef>) -> BorderFlags {
    BorderFlags {
        top: edge_present(border.and_then(|b| b.top.as_ref())),
        bottom: edge_present(border.and_then(|b| b.bottom.as_ref())),
        left: edge_present(border.and_then(|b| b.left.as_ref())),
        right: edge_present(border.and_then(|b| b.right.as_ref())),
    }
}

/// An edge declared without a line style (or with `none`) counts as absent.
fn edge_present(edge: Option<&EdgeLine>) -> bool {
    edge.and_then(|e| e.style.as_deref()).is_some()
}
