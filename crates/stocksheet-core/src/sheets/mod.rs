//! Spreadsheet collaborator: append-only row sink.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::SheetError;

/// What the destination reported after an append.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppendOutcome {
    pub updated_rows: usize,
    pub updated_cells: usize,
}

/// Destination for extracted rows.
///
/// Appends only: no deduplication and no transaction beyond what the
/// destination itself offers.
#[async_trait]
pub trait RowSink: Send + Sync {
    async fn append_rows(
        &self,
        sheet_id: &str,
        range: &str,
        rows: &[Vec<String>],
    ) -> Result<AppendOutcome, SheetError>;
}

/// A1 range anchoring an append at the top of a worksheet.
pub fn append_range(sheet_name: &str) -> String {
    format!("{}!A1", sheet_name.trim())
}

/// Worksheet part of an A1 range ("Sheet1!A1" -> "Sheet1").
pub fn worksheet_of(range: &str) -> &str {
    range.split_once('!').map_or(range, |(sheet, _)| sheet)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges() {
        assert_eq!(append_range(" StoreDemand "), "StoreDemand!A1");
        assert_eq!(worksheet_of("StoreDemand!A1"), "StoreDemand");
        assert_eq!(worksheet_of("Sheet1"), "Sheet1");
    }
}
