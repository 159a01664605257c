//! Line-by-line extraction of stock rows from OCR text.

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use serde::Serialize;
use tracing::{debug, info, trace};

use crate::models::config::StocksheetConfig;
use crate::models::table::{ParsedRow, ResultTable};

use super::rules::{
    trailing_numbers, Catalog, FieldExtractor, ItemMatcher, LineNormalizer, Quantity,
    QuantityExtractor, UnitVocabulary,
};
use super::schema::SchemaKind;

lazy_static! {
    static ref DEFAULT_EXTRACTOR: Extractor = Extractor::from_config(&StocksheetConfig::default());
}

/// Extract rows using the built-in catalog and unit vocabulary.
pub fn extract_rows(text: &str, schema: SchemaKind) -> ResultTable {
    DEFAULT_EXTRACTOR.extract_rows(text, schema)
}

/// Result of parsing one OCR text.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    /// Schema the table was built for.
    pub schema: SchemaKind,
    /// Table to append (structured or fallback).
    pub table: ResultTable,
    /// Structured rows before flattening.
    pub rows: Vec<ParsedRow>,
    /// Blank, blacklisted or serial-only lines.
    pub skipped_lines: usize,
    /// Lines without a catalog item or without a number after it.
    pub unmatched_lines: usize,
}

/// Matches OCR lines against a catalog and pulls out quantities and units.
///
/// Holds only immutable data, so one extractor can serve any number of
/// calls and threads. Every call starts its serial numbers at 1.
#[derive(Debug, Clone)]
pub struct Extractor {
    catalog: Catalog,
    units: UnitVocabulary,
    normalizers: BTreeMap<SchemaKind, LineNormalizer>,
}

impl Extractor {
    /// Create an extractor with the built-in blacklists.
    pub fn new(catalog: Catalog, units: UnitVocabulary) -> Self {
        let normalizers = SchemaKind::ALL
            .into_iter()
            .map(|kind| (kind, LineNormalizer::new(kind.default_blacklist())))
            .collect();

        Self {
            catalog,
            units,
            normalizers,
        }
    }

    /// Create an extractor from configuration.
    pub fn from_config(config: &StocksheetConfig) -> Self {
        let mut extractor = Self::new(
            Catalog::new(&config.catalog.items),
            UnitVocabulary::new(&config.units.tokens),
        );
        for (kind, keywords) in &config.extraction.blacklist_overrides {
            extractor = extractor.with_blacklist(*kind, keywords);
        }
        extractor
    }

    /// Replace the header/noise keywords for one schema kind.
    pub fn with_blacklist<I, S>(mut self, kind: SchemaKind, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.normalizers.insert(kind, LineNormalizer::new(keywords));
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn units(&self) -> &UnitVocabulary {
        &self.units
    }

    fn normalizer(&self, schema: SchemaKind) -> LineNormalizer {
        self.normalizers
            .get(&schema)
            .cloned()
            .unwrap_or_else(|| LineNormalizer::new(schema.default_blacklist()))
    }

    /// Build the table for `text`. Never fails; worst case is the fallback table.
    pub fn extract_rows(&self, text: &str, schema: SchemaKind) -> ResultTable {
        self.parse(text, schema).table
    }

    /// Parse `text` and report what happened to each line.
    pub fn parse(&self, text: &str, schema: SchemaKind) -> ExtractionResult {
        let normalizer = self.normalizer(schema);
        let mut rows: Vec<ParsedRow> = Vec::new();
        let mut skipped_lines = 0;
        let mut unmatched_lines = 0;

        info!(
            "Parsing {} characters of text for {} schema",
            text.len(),
            schema
        );

        for raw in text.lines() {
            let Some(line) = normalizer.normalize(raw) else {
                trace!("Skipped line {:?}", raw);
                skipped_lines += 1;
                continue;
            };

            match self.match_line(line.normalized, schema) {
                Some((item, quantity, extras)) => {
                    rows.push(ParsedRow {
                        serial: rows.len() + 1,
                        item,
                        unit: quantity.unit.unwrap_or_default(),
                        quantity: quantity.amount,
                        extras,
                    });
                }
                None => {
                    debug!("No row for line {:?}", line.raw);
                    unmatched_lines += 1;
                }
            }
        }

        let header = schema.header();
        let table = if rows.is_empty() && !text.trim().is_empty() {
            debug!("No structured rows, falling back to unparsed text");
            ResultTable::fallback(text)
        } else {
            let mut table = ResultTable::empty(header);
            table.rows = rows
                .iter()
                .cloned()
                .map(|row| row.into_cells(header.len()))
                .collect();
            table
        };

        info!(
            "Extracted {} rows ({} skipped, {} unmatched lines)",
            rows.len(),
            skipped_lines,
            unmatched_lines
        );

        ExtractionResult {
            schema,
            table,
            rows,
            skipped_lines,
            unmatched_lines,
        }
    }

    /// Item, quantity and schema extras for one normalized line.
    fn match_line(
        &self,
        line: &str,
        schema: SchemaKind,
    ) -> Option<(String, Quantity, Vec<String>)> {
        let item = ItemMatcher::new(&self.catalog).extract(line)?;
        let remainder = &line[item.end()..];

        let Some(quantity) = QuantityExtractor::new(&self.units).extract(remainder) else {
            debug!("Item {:?} has no quantity", item.value);
            return None;
        };

        let extras = match schema.extra_columns() {
            0 => Vec::new(),
            n => trailing_numbers(&remainder[quantity.end()..], n),
        };

        Some((item.value, quantity.value, extras))
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::from_config(&StocksheetConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn extractor(items: &[&str], units: &[&str]) -> Extractor {
        Extractor::new(Catalog::new(items), UnitVocabulary::new(units))
    }

    fn cells(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_demand_sheet_scenario() {
        let ex = extractor(&["Sugar", "Milk"], &["kg", "ltr"]);
        let text = "1. Sugar 5 kg\n2. Milk 2 ltr\nDate: 24/09";
        let table = ex.extract_rows(text, SchemaKind::Generic);

        assert_eq!(table.rows, cells(&[&["1", "Sugar", "kg", "5"], &["2", "Milk", "ltr", "2"]]));
        assert_eq!(table.columns, cells(&[SchemaKind::Generic.header()]));
    }

    #[test]
    fn test_specific_item_wins() {
        let ex = extractor(&["Filter Coffee", "Filter Coffee Glass"], &["pcs"]);
        let table = ex.extract_rows("Filter Coffee Glass 2 pcs", SchemaKind::StoreDemand);

        assert_eq!(table.rows, cells(&[&["1", "Filter Coffee Glass", "pcs", "2"]]));
    }

    #[test]
    fn test_word_quantity_is_not_a_row() {
        let ex = extractor(&["Paneer", "Milk"], &["kg", "ltr"]);
        let result = ex.parse("Paneer two fifty\nMilk 3 ltr", SchemaKind::Generic);

        assert_eq!(result.table.rows, cells(&[&["1", "Milk", "ltr", "3"]]));
        assert_eq!(result.unmatched_lines, 1);
    }

    #[test]
    fn test_serials_dense_across_dropped_lines() {
        let ex = extractor(&["Sugar", "Milk", "Curd"], &["kg", "ltr"]);
        let text = "Sugar 5 kg\nrandom scribble 42\nMilk\nCurd kg 2";
        let table = ex.extract_rows(text, SchemaKind::Generic);

        assert_eq!(table.rows, cells(&[&["1", "Sugar", "kg", "5"], &["2", "Curd", "kg", "2"]]));
    }

    #[test]
    fn test_missing_unit_and_decimal_quantity() {
        let ex = extractor(&["Butter"], &["kg"]);
        let table = ex.extract_rows("Butter 1.25", SchemaKind::Generic);

        assert_eq!(table.rows, cells(&[&["1", "Butter", "", "1.25"]]));
    }

    #[test]
    fn test_blacklisted_lines_never_produce_rows() {
        let ex = extractor(&["Sugar"], &["kg"]);
        let result = ex.parse("Sugar quantity 5 kg\nOutlet sugar 4 kg", SchemaKind::Generic);

        assert!(result.rows.is_empty());
        assert_eq!(result.skipped_lines, 2);
        // Nothing structured, so the fallback table carries the text.
        assert!(result.table.is_fallback());
    }

    #[test]
    fn test_fallback_table() {
        let ex = extractor(&["Sugar"], &["kg"]);
        let table = ex.extract_rows("Bread 4\n\n  Eggs 12 \n", SchemaKind::StoreDemand);

        assert_eq!(table.columns, cells(&[&["Extracted Text"]]));
        assert_eq!(table.rows, cells(&[&["Bread 4"], &["Eggs 12"]]));
    }

    #[test]
    fn test_empty_text_gives_schema_columns() {
        let ex = extractor(&["Sugar"], &["kg"]);

        for text in ["", "  \n \n"] {
            let table = ex.extract_rows(text, SchemaKind::Inventory);
            assert!(table.rows.is_empty());
            assert_eq!(table.header().unwrap()[3], "Stock Quantity");
        }
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let ex = extractor(&["Sugar", "Milk"], &["kg", "ltr"]);
        let text = "Sugar 5 kg\nMilk 2 ltr";

        let first = ex.extract_rows(text, SchemaKind::Generic);
        let second = ex.extract_rows(text, SchemaKind::Generic);
        assert_eq!(first, second);
        assert_eq!(second.rows[0][0], "1");
    }

    #[test]
    fn test_purchases_extras() {
        let ex = extractor(&["Sugar", "Milk"], &["kg", "ltr"]);
        let table = ex.extract_rows("Sugar 5 kg 42 210\nMilk 2 ltr 56", SchemaKind::Purchases);

        assert_eq!(
            table.rows,
            cells(&[&["1", "Sugar", "kg", "5", "42", "210"], &["2", "Milk", "ltr", "2", "56", ""]])
        );
    }

    #[test]
    fn test_purchases_labelled_rate_and_amount() {
        let ex = extractor(&["Sugar", "Milk"], &["kg", "ltr"]);
        let table = ex.extract_rows("Sugar 5 kg rate 42 amount 210", SchemaKind::Purchases);

        assert_eq!(table.rows, cells(&[&["1", "Sugar", "kg", "5", "42", "210"]]));
    }

    #[test]
    fn test_non_ascii_digits_and_comma_decimals_give_no_row() {
        let ex = extractor(&["Sugar", "Milk"], &["kg", "ltr"]);
        let text = "Sugar \u{096B} kg\nMilk 1,5 ltr\nMilk 2 ltr";
        let result = ex.parse(text, SchemaKind::Generic);

        assert_eq!(result.table.rows, cells(&[&["1", "Milk", "ltr", "2"]]));
        assert_eq!(result.unmatched_lines, 2);
    }

    #[test]
    fn test_purchases_blacklist_skips_totals() {
        let ex = extractor(&["Sugar"], &["kg"]);
        let table = ex.extract_rows("Sugar 5 kg 42 210\nTotal sugar 210", SchemaKind::Purchases);

        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn test_blacklist_override() {
        let ex = extractor(&["Sugar"], &["kg"]).with_blacklist(SchemaKind::Generic, ["sugar"]);
        let table = ex.extract_rows("Sugar 5 kg", SchemaKind::Generic);

        assert!(table.is_fallback());
    }

    #[test]
    fn test_unit_before_number_and_noise_after_item() {
        let ex = extractor(&["Tomato"], &["kg"]);
        let table = ex.extract_rows("3- tomato  kg 7 (urgent)", SchemaKind::Generic);

        assert_eq!(table.rows, cells(&[&["1", "Tomato", "kg", "7"]]));
    }

    #[test]
    fn test_default_catalog() {
        let table = extract_rows("1. Filter Coffee Powder 2 kg", SchemaKind::StoreDemand);

        assert_eq!(table.rows, cells(&[&["1", "Filter Coffee Powder", "kg", "2"]]));
    }
}
