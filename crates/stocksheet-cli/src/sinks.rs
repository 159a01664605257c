//! Row sinks and OCR wiring used by the commands.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, info, warn};

use stocksheet_core::models::config::{OcrConfig, SheetsConfig};
use stocksheet_core::sheets::worksheet_of;
use stocksheet_core::{
    AppendOutcome, OcrError, PureOcrRecognizer, RowSink, SheetError, TextRecognizer,
};

/// Appends through the Google Sheets `values.append` endpoint.
pub struct GoogleSheetsSink {
    client: reqwest::Client,
    api_base: String,
    access_token: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppendResponse {
    #[serde(default)]
    updates: AppendUpdates,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppendUpdates {
    #[serde(default)]
    updated_rows: usize,
    #[serde(default)]
    updated_cells: usize,
}

impl GoogleSheetsSink {
    pub fn from_config(config: &SheetsConfig) -> Result<Self, SheetError> {
        let access_token = config.access_token.clone().ok_or_else(|| {
            SheetError::MissingCredentials("GOOGLE_ACCESS_TOKEN not set".to_string())
        })?;

        let client = reqwest::Client::builder()
            .user_agent(concat!("stocksheet-cli/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .map_err(|e| SheetError::Write(e.to_string()))?;

        Ok(Self {
            client,
            api_base: config.api_base.clone(),
            access_token,
        })
    }
}

/// `{base}/spreadsheets/{id}/values/{range}:append?valueInputOption=USER_ENTERED`
fn append_url(api_base: &str, sheet_id: &str, range: &str) -> Result<Url, SheetError> {
    let target = format!("{}:append", range);
    let mut url =
        Url::parse(api_base).map_err(|e| SheetError::Write(format!("bad API base: {}", e)))?;
    url.path_segments_mut()
        .map_err(|_| SheetError::Write(format!("bad API base: {}", api_base)))?
        .pop_if_empty()
        .extend(["spreadsheets", sheet_id, "values", target.as_str()]);
    url.query_pairs_mut()
        .append_pair("valueInputOption", "USER_ENTERED");
    Ok(url)
}

#[async_trait]
impl RowSink for GoogleSheetsSink {
    async fn append_rows(
        &self,
        sheet_id: &str,
        range: &str,
        rows: &[Vec<String>],
    ) -> Result<AppendOutcome, SheetError> {
        if sheet_id.trim().is_empty() {
            return Err(SheetError::MissingSpreadsheetId);
        }

        let url = append_url(&self.api_base, sheet_id, range)?;
        debug!("POST {}", url);

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.access_token)
            .json(&serde_json::json!({ "values": rows }))
            .send()
            .await
            .map_err(|e| SheetError::Write(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Sheets append to {} failed with {}", range, status);
            return Err(SheetError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: AppendResponse = response
            .json()
            .await
            .map_err(|e| SheetError::Write(format!("unexpected response: {}", e)))?;

        Ok(AppendOutcome {
            updated_rows: parsed.updates.updated_rows,
            updated_cells: parsed.updates.updated_cells,
        })
    }
}

/// Appends rows to `<dir>/<worksheet>.csv`.
pub struct CsvSheetSink {
    dir: PathBuf,
}

impl CsvSheetSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File backing the worksheet named in `range`.
    pub fn path_for(&self, range: &str) -> PathBuf {
        let name: String = worksheet_of(range)
            .trim()
            .chars()
            .map(|c| if matches!(c, '/' | '\\' | ':') { '_' } else { c })
            .collect();
        self.dir.join(format!("{}.csv", name))
    }

    fn write(&self, path: &Path, rows: &[Vec<String>]) -> Result<(), SheetError> {
        fs::create_dir_all(&self.dir).map_err(|e| SheetError::Write(e.to_string()))?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| SheetError::Write(e.to_string()))?;

        let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(file);
        for row in rows {
            wtr.write_record(row).map_err(|e| SheetError::Write(e.to_string()))?;
        }
        wtr.flush().map_err(|e| SheetError::Write(e.to_string()))
    }
}

#[async_trait]
impl RowSink for CsvSheetSink {
    async fn append_rows(
        &self,
        sheet_id: &str,
        range: &str,
        rows: &[Vec<String>],
    ) -> Result<AppendOutcome, SheetError> {
        let path = self.path_for(range);
        self.write(&path, rows)?;
        info!("Appended {} rows to {} (sheet {})", rows.len(), path.display(), sheet_id);

        Ok(AppendOutcome {
            updated_rows: rows.len(),
            updated_cells: rows.iter().map(Vec::len).sum(),
        })
    }
}

/// Sink chosen on the command line.
pub enum Sink {
    Google(GoogleSheetsSink),
    Csv(CsvSheetSink),
}

#[async_trait]
impl RowSink for Sink {
    async fn append_rows(
        &self,
        sheet_id: &str,
        range: &str,
        rows: &[Vec<String>],
    ) -> Result<AppendOutcome, SheetError> {
        match self {
            Sink::Google(sink) => sink.append_rows(sheet_id, range, rows).await,
            Sink::Csv(sink) => sink.append_rows(sheet_id, range, rows).await,
        }
    }
}

/// OCR engine, or the reason it could not be loaded.
///
/// Loading failures only surface when an image actually needs OCR, so
/// text input keeps working without model files.
pub enum Recognizer {
    Ready(PureOcrRecognizer),
    Unavailable(String),
}

impl Recognizer {
    pub fn load(config: &OcrConfig) -> Self {
        match PureOcrRecognizer::from_config(config) {
            Ok(engine) => Recognizer::Ready(engine),
            Err(e) => {
                debug!("OCR engine unavailable: {}", e);
                Recognizer::Unavailable(e.to_string())
            }
        }
    }
}

impl TextRecognizer for Recognizer {
    fn recognize(&self, image_bytes: &[u8]) -> Result<String, OcrError> {
        match self {
            Recognizer::Ready(engine) => engine.recognize(image_bytes),
            Recognizer::Unavailable(reason) => Err(OcrError::ModelLoad(reason.clone())),
        }
    }
}
