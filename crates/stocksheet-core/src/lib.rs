//! Core library for turning photographed stock lists into spreadsheet rows.
//!
//! This crate provides:
//! - Catalog matching and quantity/unit extraction over OCR text
//! - Schema selection for demand, purchase and inventory sheets
//! - OCR and spreadsheet collaborator traits, with a pure Rust OCR engine
//! - An ingest pipeline tying OCR, extraction and append together

pub mod error;
pub mod extract;
pub mod models;
pub mod ocr;
pub mod pipeline;
pub mod sheets;

pub use error::{InputError, OcrError, Result, SheetError, StocksheetError};
pub use extract::{extract_rows, ExtractionResult, Extractor, SchemaKind};
pub use models::config::StocksheetConfig;
pub use models::table::{ParsedRow, ResultTable};
pub use ocr::TextRecognizer;
#[cfg(feature = "native")]
pub use ocr::PureOcrRecognizer;
pub use pipeline::{IngestPipeline, IngestReport, IngestRequest};
pub use sheets::{AppendOutcome, RowSink};
