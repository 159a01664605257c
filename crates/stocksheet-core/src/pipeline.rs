//! Request-level pipeline: OCR, extraction, append.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{InputError, Result};
use crate::extract::{Extractor, SchemaKind};
use crate::models::table::ResultTable;
use crate::ocr::TextRecognizer;
use crate::sheets::{append_range, AppendOutcome, RowSink};

/// One upload: an image or already-recognized text, and where it goes.
#[derive(Debug, Clone, Default)]
pub struct IngestRequest {
    /// Photographed list.
    pub image: Option<Vec<u8>>,
    /// Text to parse instead of running OCR.
    pub text: Option<String>,
    /// Destination worksheet; also selects the schema.
    pub sheet_name: Option<String>,
}

impl IngestRequest {
    pub fn from_image(image: Vec<u8>, sheet_name: impl Into<String>) -> Self {
        Self {
            image: Some(image),
            text: None,
            sheet_name: Some(sheet_name.into()),
        }
    }

    pub fn from_text(text: impl Into<String>, sheet_name: impl Into<String>) -> Self {
        Self {
            image: None,
            text: Some(text.into()),
            sheet_name: Some(sheet_name.into()),
        }
    }

    /// Check the request before any work is done.
    pub fn validate(&self) -> std::result::Result<&str, InputError> {
        let sheet_name = self
            .sheet_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(InputError::MissingSheetName)?;

        let has_text = self.text.as_deref().is_some_and(|t| !t.trim().is_empty());
        match &self.image {
            _ if has_text => Ok(sheet_name),
            Some(image) if image.is_empty() => Err(InputError::EmptyImage),
            Some(_) => Ok(sheet_name),
            None => Err(InputError::MissingInput),
        }
    }
}

/// Outcome of one ingest.
#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    pub sheet_name: String,
    pub schema: SchemaKind,
    pub table: ResultTable,
    pub extracted_text: String,
    /// `None` when nothing was appended (no rows, or a dry run).
    pub append: Option<AppendOutcome>,
    pub processed_at: DateTime<Utc>,
}

/// Runs OCR, extraction and the append for ingest requests.
pub struct IngestPipeline<R, S> {
    extractor: Extractor,
    recognizer: R,
    sink: S,
    spreadsheet_id: String,
    include_header: bool,
    dry_run: bool,
}

impl<R: TextRecognizer, S: RowSink> IngestPipeline<R, S> {
    pub fn new(
        extractor: Extractor,
        recognizer: R,
        sink: S,
        spreadsheet_id: impl Into<String>,
    ) -> Self {
        Self {
            extractor,
            recognizer,
            sink,
            spreadsheet_id: spreadsheet_id.into(),
            include_header: false,
            dry_run: false,
        }
    }

    /// Send the header row(s) ahead of the data.
    pub fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Extract but do not append.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Process one request. OCR and sink failures are returned, never swallowed.
    pub async fn ingest(&self, request: &IngestRequest) -> Result<IngestReport> {
        let sheet_name = request.validate()?.to_string();
        let schema = SchemaKind::from_sheet_name(&sheet_name);

        let extracted_text = match (&request.text, &request.image) {
            (Some(text), _) if !text.trim().is_empty() => text.clone(),
            (_, Some(image)) => {
                debug!("Running OCR on {} bytes", image.len());
                self.recognizer.recognize(image)?
            }
            _ => return Err(InputError::MissingInput.into()),
        };

        if extracted_text.trim().is_empty() {
            warn!("OCR returned no text");
        }

        let table = self.extractor.extract_rows(&extracted_text, schema);

        let append = if table.rows.is_empty() || self.dry_run {
            None
        } else {
            let mut payload = Vec::with_capacity(table.rows.len() + table.columns.len());
            if self.include_header {
                payload.extend(table.columns.iter().cloned());
            }
            payload.extend(table.rows.iter().cloned());

            let range = append_range(&sheet_name);
            let outcome = self
                .sink
                .append_rows(&self.spreadsheet_id, &range, &payload)
                .await?;
            info!(
                "Appended {} rows ({} cells) to {}",
                outcome.updated_rows, outcome.updated_cells, range
            );
            Some(outcome)
        };

        Ok(IngestReport {
            sheet_name,
            schema,
            table,
            extracted_text,
            append,
            processed_at: Utc::now(),
        })
    }
}
