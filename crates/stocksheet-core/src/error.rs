//! Error types for the stocksheet-core library.

use thiserror::Error;

/// Main error type for the stocksheet library.
///
/// Line parsing itself never fails; these errors come from request
/// validation and from the OCR and spreadsheet collaborators.
#[derive(Error, Debug)]
pub enum StocksheetError {
    /// The request was missing something the pipeline needs.
    #[error("invalid request: {0}")]
    Input(#[from] InputError),

    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Spreadsheet append error.
    #[error("sheet error: {0}")]
    Sheet(#[from] SheetError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Client-side request errors, reported before any parsing happens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Neither an image nor text was supplied.
    #[error("no image or text found in the request")]
    MissingInput,

    /// The image payload was present but empty.
    #[error("image payload is empty")]
    EmptyImage,

    /// No destination sheet name was supplied.
    #[error("no destination sheet name supplied")]
    MissingSheetName,
}

/// Errors related to OCR processing.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// The image bytes could not be decoded.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),
}

/// Errors raised by a row sink while appending to a spreadsheet.
#[derive(Error, Debug)]
pub enum SheetError {
    /// No spreadsheet identifier is configured.
    #[error("spreadsheet id not set")]
    MissingSpreadsheetId,

    /// No credentials are available for the remote API.
    #[error("credentials not found: {0}")]
    MissingCredentials(String),

    /// The remote API rejected the append.
    #[error("append rejected ({status}): {body}")]
    Rejected { status: u16, body: String },

    /// Transport or local write failure.
    #[error("append failed: {0}")]
    Write(String),
}

/// Result type for the stocksheet library.
pub type Result<T> = std::result::Result<T, StocksheetError>;
