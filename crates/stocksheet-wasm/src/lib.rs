//! WASM bindings for stock list row extraction.
//!
//! OCR runs on the JavaScript side; these bindings take the recognized
//! text and return the rows for a sheet.

use wasm_bindgen::prelude::*;

use stocksheet_core::ocr::{boxes_to_text, sort_by_reading_order, TextBox};
use stocksheet_core::{Extractor, SchemaKind, StocksheetConfig};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Extract the result table (`{ columns, rows }`) for `sheet_name` from OCR text.
#[wasm_bindgen]
pub fn extract_rows(text: &str, sheet_name: &str) -> Result<JsValue, JsValue> {
    let table = stocksheet_core::extract_rows(text, SchemaKind::from_sheet_name(sheet_name));
    to_js(&table)
}

/// Schema selected for a sheet name: "store_demand", "purchases", "inventory" or "generic".
#[wasm_bindgen]
pub fn schema_for_sheet(sheet_name: &str) -> String {
    SchemaKind::from_sheet_name(sheet_name).as_str().to_string()
}

/// Header row used for a sheet name.
#[wasm_bindgen]
pub fn schema_header(sheet_name: &str) -> Vec<String> {
    SchemaKind::from_sheet_name(sheet_name)
        .header()
        .iter()
        .map(|c| c.to_string())
        .collect()
}

/// Extractor with a custom catalog, units and blacklists.
#[wasm_bindgen]
pub struct RowExtractor {
    extractor: Extractor,
}

#[wasm_bindgen]
impl RowExtractor {
    /// Create an extractor with the built-in catalog and units.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            extractor: Extractor::default(),
        }
    }

    /// Create an extractor from a JSON configuration document.
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(config_json: &str) -> Result<RowExtractor, JsValue> {
        let config: StocksheetConfig =
            serde_json::from_str(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self {
            extractor: Extractor::from_config(&config),
        })
    }

    /// Number of catalog items.
    #[wasm_bindgen(getter, js_name = catalogSize)]
    pub fn catalog_size(&self) -> usize {
        self.extractor.catalog().len()
    }

    /// Extract the result table for `sheet_name`.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str, sheet_name: &str) -> Result<JsValue, JsValue> {
        let table = self
            .extractor
            .extract_rows(text, SchemaKind::from_sheet_name(sheet_name));
        to_js(&table)
    }

    /// Extraction result with parsed rows and line counts.
    #[wasm_bindgen(js_name = extractWithMetadata)]
    pub fn extract_with_metadata(&self, text: &str, sheet_name: &str) -> Result<JsValue, JsValue> {
        let result = self
            .extractor
            .parse(text, SchemaKind::from_sheet_name(sheet_name));
        to_js(&result)
    }
}

impl Default for RowExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Text boxes from browser-side OCR, assembled into reading-order lines.
#[wasm_bindgen]
pub struct OcrLines {
    boxes: Vec<TextBox>,
}

#[wasm_bindgen]
impl OcrLines {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self { boxes: Vec::new() }
    }

    /// Add a detected box (quadrilateral corners, clockwise from top-left).
    #[wasm_bindgen(js_name = addBox)]
    #[allow(clippy::too_many_arguments)]
    pub fn add_box(
        &mut self,
        text: &str,
        x1: f32, y1: f32,
        x2: f32, y2: f32,
        x3: f32, y3: f32,
        x4: f32, y4: f32,
        confidence: f32,
    ) {
        self.boxes.push(TextBox {
            bbox: [x1, y1, x2, y2, x3, y3, x4, y4],
            text: text.to_string(),
            confidence,
        });
    }

    /// Boxes on the same band joined left to right, one line per band.
    #[wasm_bindgen]
    pub fn text(&self) -> String {
        let mut boxes = self.boxes.clone();
        sort_by_reading_order(&mut boxes);
        boxes_to_text(&boxes)
    }

    /// Extract the result table for `sheet_name` from the assembled lines.
    #[wasm_bindgen]
    pub fn extract(&self, sheet_name: &str) -> Result<JsValue, JsValue> {
        extract_rows(&self.text(), sheet_name)
    }
}

impl Default for OcrLines {
    fn default() -> Self {
        Self::new()
    }
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_schema_for_sheet() {
        assert_eq!(schema_for_sheet("Store Demand"), "store_demand");
        assert_eq!(schema_for_sheet("Purchase Invoices"), "purchases");
        assert_eq!(schema_for_sheet("Misc"), "generic");
    }

    #[wasm_bindgen_test]
    fn test_schema_header() {
        assert_eq!(schema_header("inventory")[3], "Stock Quantity");
    }

    #[wasm_bindgen_test]
    fn test_custom_catalog() {
        let extractor = RowExtractor::from_config(r#"{"catalog":{"items":["Jaggery"]}}"#)
            .unwrap();
        assert_eq!(extractor.catalog_size(), 1);
    }

    #[wasm_bindgen_test]
    fn test_ocr_lines_join_same_band() {
        let mut lines = OcrLines::new();
        lines.add_box("5 kg", 120.0, 12.0, 160.0, 12.0, 160.0, 30.0, 120.0, 30.0, 0.9);
        lines.add_box("Sugar", 10.0, 10.0, 80.0, 10.0, 80.0, 30.0, 10.0, 30.0, 0.9);
        lines.add_box("Milk 2 ltr", 10.0, 60.0, 90.0, 60.0, 90.0, 80.0, 10.0, 80.0, 0.9);
        assert_eq!(lines.text(), "Sugar 5 kg\nMilk 2 ltr");
    }
}
