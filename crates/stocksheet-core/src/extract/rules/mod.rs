//! Rule-based stages of line extraction.

pub mod catalog;
pub mod matcher;
pub mod normalizer;
pub mod patterns;
pub mod quantity;
pub mod units;

pub use catalog::Catalog;
pub use matcher::ItemMatcher;
pub use normalizer::{LineNormalizer, ParsedLine};
pub use quantity::{trailing_numbers, Quantity, QuantityExtractor};
pub use units::UnitVocabulary;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the first occurrence of the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.extract(text).into_iter().collect()
    }
}

/// A value found in a piece of text, with its byte span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte span `(start, end)` in the searched text.
    pub position: (usize, usize),
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, start: usize, end: usize, source: impl Into<String>) -> Self {
        Self {
            value,
            position: (start, end),
            source: source.into(),
        }
    }

    /// Byte offset just past the match.
    pub fn end(&self) -> usize {
        self.position.1
    }
}
