//! Row and table models produced by line extraction.

use serde::{Deserialize, Serialize};

/// Header of the fallback table used when no line could be parsed.
pub const FALLBACK_COLUMN: &str = "Extracted Text";

/// One structured row recovered from a line of OCR text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedRow {
    /// Running serial number, starting at 1.
    pub serial: usize,

    /// Canonical catalog name.
    pub item: String,

    /// Unit token, or empty when none was recognized.
    pub unit: String,

    /// Quantity exactly as written (digits with an optional decimal part).
    pub quantity: String,

    /// Schema-specific trailing fields (e.g. rate and amount).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extras: Vec<String>,
}

impl ParsedRow {
    /// Flatten into spreadsheet cells, padded with empty cells to `width`.
    pub fn into_cells(self, width: usize) -> Vec<String> {
        let mut cells = vec![self.serial.to_string(), self.item, self.unit, self.quantity];
        cells.extend(self.extras);
        if cells.len() < width {
            cells.resize(width, String::new());
        }
        cells
    }
}

/// Table handed to the spreadsheet collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultTable {
    /// Header rows.
    pub columns: Vec<Vec<String>>,

    /// Data rows.
    pub rows: Vec<Vec<String>>,
}

impl ResultTable {
    /// Table with a header and no rows.
    pub fn empty(header: &[&str]) -> Self {
        Self {
            columns: vec![header.iter().map(|c| c.to_string()).collect()],
            rows: Vec::new(),
        }
    }

    /// Single-column table holding every non-blank line of `text`.
    pub fn fallback(text: &str) -> Self {
        Self {
            columns: vec![vec![FALLBACK_COLUMN.to_string()]],
            rows: text
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(|l| vec![l.to_string()])
                .collect(),
        }
    }

    /// Whether this is the unparsed-text fallback table.
    pub fn is_fallback(&self) -> bool {
        matches!(
            self.columns.as_slice(),
            [header] if header.len() == 1 && header[0] == FALLBACK_COLUMN
        )
    }

    /// First header row, if any.
    pub fn header(&self) -> Option<&[String]> {
        self.columns.first().map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_row_cells_padded_to_width() {
        let row = ParsedRow {
            serial: 3,
            item: "Sugar".to_string(),
            unit: String::new(),
            quantity: "2.5".to_string(),
            extras: vec!["40".to_string()],
        };

        assert_eq!(row.into_cells(6), vec!["3", "Sugar", "", "2.5", "40", ""]);
    }

    #[test]
    fn test_fallback_keeps_non_blank_lines_in_order() {
        let table = ResultTable::fallback("  first \n\n   \nsecond\n");

        assert!(table.is_fallback());
        assert_eq!(table.rows, vec![vec!["first".to_string()], vec!["second".to_string()]]);
    }
}
