//! Border and cell-format tables from `xl/styles.xml`.
//!
//! Only `<borders>` and `<cellXfs>` are read. Borders inside `<dxfs>` belong to
//! conditional formats, and `<cellStyleXfs>` entries are not addressed by a
//! cell's `s` attribute, so both are skipped.

use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::borders::error::ExtractError;
use crate::borders::package::attr_value;

/// One edge element of a `<border>` (`<top style="thin"/>`, `<top/>`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeLine {
    /// Line style, `None` when the attribute is absent or `none`.
    pub style: Option<String>,
}

impl EdgeLine {
    fn from_element(e: &BytesStart) -> Result<Self, ExtractError> {
        let style = attr_value(e, b"style")?.filter(|s| s != "none");
        Ok(Self { style })
    }
}

/// A `<border>` entry. An edge element missing from the XML is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BorderDef {
    pub top: Option<EdgeLine>,
    pub bottom: Option<EdgeLine>,
    pub left: Option<EdgeLine>,
    pub right: Option<EdgeLine>,
}

/// Borders and the `borderId` of every cell format, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleTable {
    borders: Vec<BorderDef>,
    cell_xf_borders: Vec<u32>,
}

impl StyleTable {
    pub fn push_border(&mut self, border: BorderDef) {
        self.borders.push(border);
    }

    pub fn push_cell_xf(&mut self, border_id: u32) {
        self.cell_xf_borders.push(border_id);
    }

    /// Border drawn for a cell with style index `style_id`.
    ///
    /// `applyBorder` is not consulted: the xf's `borderId` is what gets rendered.
    pub fn border_for(&self, style_id: u32) -> Option<&BorderDef> {
        let border_id = *self.cell_xf_borders.get(style_id as usize)?;
        self.borders.get(border_id as usize)
    }

    /// Border of a coordinate holding no cell element.
    pub fn default_border(&self) -> Option<&BorderDef> {
        self.borders.first()
    }
}

#[derive(Default)]
struct StylesParser {
    table: StyleTable,
    in_borders: bool,
    in_cell_xfs: bool,
    current: Option<BorderDef>,
}

impl StylesParser {
    fn open(&mut self, e: &BytesStart, empty: bool) -> Result<(), ExtractError> {
        match e.local_name().as_ref() {
            b"borders" if !empty => self.in_borders = true,
            b"cellXfs" if !empty => self.in_cell_xfs = true,
            b"border" if self.in_borders => {
                if empty {
                    self.table.push_border(BorderDef::default());
                } else {
                    self.current = Some(BorderDef::default());
                }
            }
            b"xf" if self.in_cell_xfs => {
                let border_id = attr_value(e, b"borderId")?
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(0);
                self.table.push_cell_xf(border_id);
            }
            name => {
                if let Some(border) = self.current.as_mut() {
                    let slot = match name {
                        b"top" => &mut border.top,
                        b"bottom" => &mut border.bottom,
                        b"left" => &mut border.left,
                        b"right" => &mut border.right,
                        _ => return Ok(()),
                    };
                    *slot = Some(EdgeLine::from_element(e)?);
                }
            }
        }
        Ok(())
    }

    fn close(&mut self, name: &[u8]) {
        match name {
            b"borders" => self.in_borders = false,
            b"cellXfs" => self.in_cell_xfs = false,
            b"border" => {
                if let Some(border) = self.current.take() {
                    self.table.push_border(border);
                }
            }
            _ => {}
        }
    }
}

/// Parse the border and cell-format tables of a stylesheet.
pub fn parse_styles<R: BufRead>(reader: R) -> Result<StyleTable, ExtractError> {
    let mut xml = Reader::from_reader(reader);
    xml.trim_text(true);

    let mut buf = Vec::new();
    let mut parser = StylesParser::default();

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(e) => parser.open(&e, false)?,
            Event::Empty(e) => parser.open(&e, true)?,
            Event::End(e) => parser.close(e.local_name().as_ref()),
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(parser.table)
}
