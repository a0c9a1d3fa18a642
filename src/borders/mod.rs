//! Border extraction subsystem.
//!
//! # Data Flow
//! ```text
//! uploaded bytes
//!     → package.rs (zip container, workbook + relationships)
//!     → styles.rs (border table, cellXfs → borderId)
//!     → sheet.rs (cell positions and style indices)
//!     → extractor.rs (dense rows → cells → edge flags)
//!     → model.rs (DocumentBorders, serialized as nested JSON arrays)
//! ```
//!
//! # Design Decisions
//! - Only the parts that bear on borders are read; cell values are never decoded
//! - A cell's border is the one its xf's `borderId` points at, whatever `applyBorder` says
//! - The walk is a pure map over the decoded tables; nothing is cached between requests
//! - Decoding runs on the blocking pool so a slow or panicking decode never stalls the runtime

pub mod error;
pub mod extractor;
pub mod model;
pub mod package;
pub mod sheet;
pub mod styles;

pub use error::ExtractError;
pub use extractor::{decode_workbook, extract_borders, extract_document_borders, parse_xlsx_borders};
pub use model::{BorderFlags, DocumentBorders, WorksheetBorders};
pub use package::Workbook;
