//! Border presence model.
//!
//! Built once per request and dropped after serialization.

use serde::Serialize;

/// Which edges of a single cell carry a drawn line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BorderFlags {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl BorderFlags {
    /// True when no edge has a line.
    pub fn is_empty(&self) -> bool {
        !(self.top || self.bottom || self.left || self.right)
    }
}

/// Rows of one worksheet, each row holding one [`BorderFlags`] per column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WorksheetBorders(pub Vec<Vec<BorderFlags>>);

impl WorksheetBorders {
    pub fn rows(&self) -> &[Vec<BorderFlags>] {
        &self.0
    }

    pub fn row_count(&self) -> usize {
        self.0.len()
    }
}

/// One [`WorksheetBorders`] per worksheet, in workbook order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DocumentBorders(pub Vec<WorksheetBorders>);

impl DocumentBorders {
    pub fn sheet_count(&self) -> usize {
        self.0.len()
    }

    /// Total number of cell records across all worksheets.
    pub fn cell_count(&self) -> usize {
        self.0
            .iter()
            .flat_map(|sheet| sheet.rows())
            .map(Vec::len)
            .sum()
    }
}
