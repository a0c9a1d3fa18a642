//! XLSX package reading.
//!
//! The container is opened with `zip`, then the parts that matter for borders
//! are streamed through `quick-xml`:
//!
//! ```text
//! [Content_Types].xml          presence check
//! xl/workbook.xml              sheet names and relationship ids, in tab order
//! xl/_rels/workbook.xml.rels   relationship id → worksheet part
//! xl/styles.xml                border table + cellXfs (optional part)
//! xl/worksheets/*.xml          cell positions and style indices
//! ```

use std::collections::HashMap;
use std::io::{BufReader, Cursor, Read, Seek};

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use zip::ZipArchive;

use crate::borders::error::ExtractError;
use crate::borders::sheet::{parse_worksheet, Worksheet};
use crate::borders::styles::{parse_styles, StyleTable};

const CONTENT_TYPES: &str = "[Content_Types].xml";
const WORKBOOK_PART: &str = "xl/workbook.xml";
const WORKBOOK_RELS: &str = "xl/_rels/workbook.xml.rels";
const STYLES_PART: &str = "xl/styles.xml";

/// The decoded pieces of a workbook needed to resolve cell borders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workbook {
    /// Worksheets in workbook order.
    pub sheets: Vec<Worksheet>,
    pub styles: StyleTable,
}

/// Value of the attribute whose local name is `local_name`, unescaped.
pub(crate) fn attr_value(e: &BytesStart, local_name: &[u8]) -> Result<Option<String>, ExtractError> {
    for attr in e.attributes().flatten() {
        if attr.key.local_name().as_ref() == local_name {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Decode an XLSX package held in memory.
pub fn read_workbook(bytes: &[u8]) -> Result<Workbook, ExtractError> {
    read_package(Cursor::new(bytes))
}

fn read_package<R: Read + Seek>(reader: R) -> Result<Workbook, ExtractError> {
    let mut archive = ZipArchive::new(reader)?;

    if archive.by_name(CONTENT_TYPES).is_err() {
        return Err(ExtractError::missing_part(CONTENT_TYPES));
    }

    let sheet_refs = read_sheet_refs(&mut archive)?;
    let targets = read_worksheet_targets(&mut archive)?;
    let styles = read_styles(&mut archive)?;

    let mut sheets = Vec::with_capacity(sheet_refs.len());
    for (name, rel_id) in sheet_refs {
        // Chartsheets and dialog sheets have no worksheet relationship.
        let Some(path) = targets.get(&rel_id) else {
            continue;
        };
        let part = archive
            .by_name(path)
            .map_err(|_| ExtractError::missing_part(path))?;
        sheets.push(parse_worksheet(&name, BufReader::new(part))?);
    }

    Ok(Workbook { sheets, styles })
}

fn read_sheet_refs<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
) -> Result<Vec<(String, String)>, ExtractError> {
    let part = archive
        .by_name(WORKBOOK_PART)
        .map_err(|_| ExtractError::missing_part(WORKBOOK_PART))?;

    let mut xml = Reader::from_reader(BufReader::new(part));
    xml.trim_text(true);

    let mut buf = Vec::new();
    let mut sheets = Vec::new();

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) | Event::Empty(ref e) if e.local_name().as_ref() == b"sheet" => {
                if let (Some(name), Some(rel_id)) = (attr_value(e, b"name")?, attr_value(e, b"id")?) {
                    sheets.push((name, rel_id));
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(sheets)
}

fn read_worksheet_targets<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
) -> Result<HashMap<String, String>, ExtractError> {
    let part = archive
        .by_name(WORKBOOK_RELS)
        .map_err(|_| ExtractError::missing_part(WORKBOOK_RELS))?;

    let mut xml = Reader::from_reader(BufReader::new(part));
    xml.trim_text(true);

    let mut buf = Vec::new();
    let mut targets = HashMap::new();

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) | Event::Empty(ref e)
                if e.local_name().as_ref() == b"Relationship" =>
            {
                let id = attr_value(e, b"Id")?;
                let target = attr_value(e, b"Target")?;
                let rel_type = attr_value(e, b"Type")?;

                if let (Some(id), Some(target), Some(rel_type)) = (id, target, rel_type) {
                    if rel_type.ends_with("/worksheet") {
                        targets.insert(id, resolve_target(&target));
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(targets)
}

fn read_styles<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<StyleTable, ExtractError> {
    match archive.by_name(STYLES_PART) {
        Ok(part) => parse_styles(BufReader::new(part)),
        Err(_) => Ok(StyleTable::default()),
    }
}

/// Archive path of a relationship target declared in `xl/_rels/workbook.xml.rels`.
fn resolve_target(target: &str) -> String {
    let joined = match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("xl/{}", target),
    };

    let mut segments: Vec<&str> = Vec::new();
    for segment in joined.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}
