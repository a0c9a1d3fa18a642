use clap::Parser;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use std::path::PathBuf;
use xlsx_border_api::http::{FILE_FIELD, PARSE_BORDERS_PATH, XLSX_MIME};

#[derive(Parser)]
#[command(name = "borders-cli")]
#[command(about = "Upload a workbook to the border extraction service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://127.0.0.1:5000")]
    url: String,

    /// Workbook to upload.
    file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let bytes = tokio::fs::read(&cli.file).await?;
    let file_name = cli
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload.xlsx".to_string());

    let part = Part::bytes(bytes).file_name(file_name).mime_str(XLSX_MIME)?;
    let form = Form::new().part(FILE_FIELD, part);

    let res = reqwest::Client::new()
        .post(format!("{}{}", cli.url.trim_end_matches('/'), PARSE_BORDERS_PATH))
        .multipart(form)
        .send()
        .await?;

    let status = res.status();
    let body: Value = res.json().await?;

    if status.is_success() {
        println!("{}", serde_json::to_string_pretty(&body)?);
        Ok(())
    } else {
        let message = body
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        Err(format!("{}: {}", status, message).into())
    }
}
