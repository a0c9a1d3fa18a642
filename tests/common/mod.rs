//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::net::SocketAddr;

use reqwest::multipart::{Form, Part};
use tokio::net::TcpListener;
use xlsx_border_api::config::ServiceConfig;
use xlsx_border_api::http::{HttpServer, PARSE_BORDERS_PATH, XLSX_MIME};
use xlsx_border_api::lifecycle::Shutdown;
use xlsx_border_api::security::AllowList;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// A server running on an ephemeral loopback port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
}

impl TestServer {
    pub fn upload_url(&self) -> String {
        format!("http://{}{}", self.addr, PARSE_BORDERS_PATH)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

pub async fn start_server() -> TestServer {
    start_server_with(ServiceConfig::default()).await
}

pub async fn start_server_with(config: ServiceConfig) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, AllowList::loopback());
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    TestServer { addr, shutdown }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// Multipart form with `bytes` as the `file` part.
pub fn file_form(bytes: Vec<u8>, mime: &str) -> Form {
    let part = Part::bytes(bytes)
        .file_name("upload.xlsx")
        .mime_str(mime)
        .unwrap();
    Form::new().part("file", part)
}

pub fn xlsx_form(bytes: Vec<u8>) -> Form {
    file_form(bytes, XLSX_MIME)
}

const SHEET_REL_TYPE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet";

/// Hand-assembled XLSX package.
///
/// Border 0 and cell format 0 are the empty defaults every workbook carries;
/// `border` and `cell_xf` append from index 1. The stylesheet also holds
/// `cellStyleXfs` and `dxfs` entries that must never influence cell borders.
pub struct XlsxFixture {
    borders: Vec<String>,
    cell_xfs: Vec<String>,
    sheets: Vec<(String, String)>,
}

impl XlsxFixture {
    pub fn new() -> Self {
        Self {
            borders: vec!["<border><left/><right/><top/><bottom/><diagonal/></border>".to_string()],
            cell_xfs: vec![r#"<xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/>"#.to_string()],
            sheets: Vec::new(),
        }
    }

    /// Append a `<border>` element.
    pub fn border(mut self, xml: &str) -> Self {
        self.borders.push(xml.to_string());
        self
    }

    /// Append an `<xf>` element to `cellXfs`.
    pub fn cell_xf(mut self, xml: &str) -> Self {
        self.cell_xfs.push(xml.to_string());
        self
    }

    /// Append a worksheet whose `<sheetData>` holds `sheet_data`.
    pub fn sheet(mut self, name: &str, sheet_data: &str) -> Self {
        self.sheets.push((name.to_string(), sheet_data.to_string()));
        self
    }

    fn styles_xml(&self) -> String {
        format!(
            concat!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
                r#"<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
                r#"<fonts count="1"><font><sz val="11"/><name val="Calibri"/></font></fonts>"#,
                r#"<fills count="1"><fill><patternFill patternType="none"/></fill></fills>"#,
                r#"<borders count="{}">{}</borders>"#,
                r#"<cellStyleXfs count="2"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/>"#,
                r#"<xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>"#,
                r#"<cellXfs count="{}">{}</cellXfs>"#,
                r#"<cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles>"#,
                r#"<dxfs count="1"><dxf><border><left style="thick"/><top style="thick"/></border></dxf></dxfs>"#,
                r#"</styleSheet>"#
            ),
            self.borders.len(),
            self.borders.concat(),
            self.cell_xfs.len(),
            self.cell_xfs.concat(),
        )
    }

    pub fn build(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let mut zip = ZipWriter::new(Cursor::new(&mut buf));

            put_part(
                &mut zip,
                "[Content_Types].xml",
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/></Types>"#,
            );
            put_part(
                &mut zip,
                "_rels/.rels",
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#,
            );

            let mut sheet_entries = String::new();
            let mut rels = String::new();
            for (idx, (name, _)) in self.sheets.iter().enumerate() {
                let n = idx + 1;
                sheet_entries.push_str(&format!(
                    r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                    name, n, n
                ));
                rels.push_str(&format!(
                    r#"<Relationship Id="rId{}" Type="{}" Target="worksheets/sheet{}.xml"/>"#,
                    n, SHEET_REL_TYPE, n
                ));
            }
            let styles_rel = self.sheets.len() + 1;
            rels.push_str(&format!(
                r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
                styles_rel
            ));

            put_part(
                &mut zip,
                "xl/workbook.xml",
                &format!(
                    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>{}</sheets></workbook>"#,
                    sheet_entries
                ),
            );
            put_part(
                &mut zip,
                "xl/_rels/workbook.xml.rels",
                &format!(
                    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{}</Relationships>"#,
                    rels
                ),
            );
            put_part(&mut zip, "xl/styles.xml", &self.styles_xml());

            for (idx, (_, sheet_data)) in self.sheets.iter().enumerate() {
                put_part(
                    &mut zip,
                    &format!("xl/worksheets/sheet{}.xml", idx + 1),
                    &format!(
                        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{}</sheetData></worksheet>"#,
                        sheet_data
                    ),
                );
            }

            zip.finish().unwrap();
        }
        buf
    }
}

fn put_part<W: Write + std::io::Seek>(zip: &mut ZipWriter<W>, name: &str, content: &str) {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    zip.start_file(name, options).unwrap();
    zip.write_all(content.as_bytes()).unwrap();
}

/// A `<c>` element holding an inline string.
pub fn text_cell(reference: &str, text: &str, style: u32) -> String {
    format!(
        r#"<c r="{}" s="{}" t="inlineStr"><is><t>{}</t></is></c>"#,
        reference, style, text
    )
}

/// One sheet, A1 holding a value and no border formatting.
pub fn plain_cell_workbook() -> Vec<u8> {
    XlsxFixture::new()
        .sheet("Sheet1", &format!(r#"<row r="1">{}</row>"#, text_cell("A1", "plain", 0)))
        .build()
}

/// One sheet, A1 with a thin top border only.
pub fn top_border_workbook() -> Vec<u8> {
    XlsxFixture::new()
        .border(r#"<border><left/><right/><top style="thin"><color indexed="64"/></top><bottom/><diagonal/></border>"#)
        .cell_xf(r#"<xf numFmtId="0" fontId="0" fillId="0" borderId="1" xfId="0" applyBorder="1"/>"#)
        .sheet("Sheet1", &format!(r#"<row r="1">{}</row>"#, text_cell("A1", "header", 1)))
        .build()
}

/// Two sheets, each with a single row of two cells. Only the second sheet's
/// B1 has a border (right edge).
pub fn two_sheet_workbook() -> Vec<u8> {
    XlsxFixture::new()
        .border(r#"<border><left/><right style="medium"><color indexed="64"/></right><top/><bottom/><diagonal/></border>"#)
        .cell_xf(r#"<xf numFmtId="0" fontId="0" fillId="0" borderId="1" xfId="0" applyBorder="1"/>"#)
        .sheet(
            "Sheet1",
            &format!(r#"<row r="1">{}{}</row>"#, text_cell("A1", "a", 0), text_cell("B1", "b", 0)),
        )
        .sheet(
            "Sheet2",
            &format!(r#"<row r="1">{}{}</row>"#, text_cell("A1", "c", 0), text_cell("B1", "d", 1)),
        )
        .build()
}
