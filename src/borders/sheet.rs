//! Cell positions and style indices from a worksheet part.

use std::collections::BTreeMap;
use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::borders::error::ExtractError;
use crate::borders::package::attr_value;

/// The cells of one worksheet, keyed by 1-based `(row, column)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Worksheet {
    pub name: String,
    cells: BTreeMap<(u32, u32), u32>,
    max_row: u32,
    max_col: u32,
}

impl Worksheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Record a cell element at `(row, col)` with style index `style`.
    pub fn insert_cell(&mut self, row: u32, col: u32, style: u32) {
        self.cells.insert((row, col), style);
        self.max_row = self.max_row.max(row);
        self.max_col = self.max_col.max(col);
    }

    /// `(max_row, max_col)` over every cell element, `(0, 0)` when there are none.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.max_row, self.max_col)
    }

    /// Style index of the cell at `(row, col)`, `None` if no element exists there.
    pub fn style_at(&self, row: u32, col: u32) -> Option<u32> {
        self.cells.get(&(row, col)).copied()
    }
}

/// Parse `A1`-style references into 1-based `(row, column)`.
pub fn parse_cell_ref(reference: &str) -> Option<(u32, u32)> {
    let split = reference.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = reference.split_at(split);
    if letters.is_empty() {
        return None;
    }

    let mut col: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let value = (c.to_ascii_uppercase() as u32) - ('A' as u32) + 1;
        col = col.checked_mul(26)?.checked_add(value)?;
    }

    let row: u32 = digits.parse().ok()?;
    if row == 0 {
        return None;
    }
    Some((row, col))
}

#[derive(Default)]
struct SheetCursor {
    row: u32,
    col: u32,
}

impl SheetCursor {
    fn enter_row(&mut self, e: &BytesStart) -> Result<(), ExtractError> {
        self.row = match attr_value(e, b"r")? {
            Some(r) => r
                .parse()
                .map_err(|_| ExtractError::decode(format!("Invalid row number: {}", r)))?,
            None => self.row + 1,
        };
        self.col = 0;
        Ok(())
    }

    fn cell(&mut self, e: &BytesStart) -> Result<(u32, u32, u32), ExtractError> {
        let (row, col) = match attr_value(e, b"r")? {
            Some(r) => parse_cell_ref(&r)
                .ok_or_else(|| ExtractError::decode(format!("Invalid cell reference: {}", r)))?,
            None => (self.row.max(1), self.col + 1),
        };
        self.col = col;

        let style = attr_value(e, b"s")?
            .and_then(|s| s.parse().ok())
            .unwrap_or(0);
        Ok((row, col, style))
    }
}

/// Parse a worksheet part, recording every `<c>` element and its style index.
pub fn parse_worksheet<R: BufRead>(name: &str, reader: R) -> Result<Worksheet, ExtractError> {
    let mut xml = Reader::from_reader(reader);
    xml.trim_text(true);

    let mut buf = Vec::new();
    let mut sheet = Worksheet::new(name);
    let mut cursor = SheetCursor::default();

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) | Event::Empty(ref e) => match e.local_name().as_ref() {
                b"row" => cursor.enter_row(e)?,
                b"c" => {
                    let (row, col, style) = cursor.cell(e)?;
                    sheet.insert_cell(row, col, style);
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(sheet)
}
