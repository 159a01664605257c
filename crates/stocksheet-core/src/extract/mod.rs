//! Stock row extraction from OCR text.
//!
//! Each line goes through the [`rules::LineNormalizer`], the
//! [`rules::ItemMatcher`] and the [`rules::QuantityExtractor`]; matched lines
//! become numbered rows, everything else is dropped.

mod parser;
pub mod rules;
mod schema;

pub use parser::{extract_rows, ExtractionResult, Extractor};
pub use schema::SchemaKind;
