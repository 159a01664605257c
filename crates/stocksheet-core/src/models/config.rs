//! Configuration structures for the stocksheet pipeline.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::extract::SchemaKind;

/// Environment variable overriding `sheets.spreadsheet_id`.
pub const SPREADSHEET_ID_ENV: &str = "SPREADSHEET_ID";

/// Environment variable overriding `sheets.access_token`.
pub const ACCESS_TOKEN_ENV: &str = "GOOGLE_ACCESS_TOKEN";

/// Main configuration for the stocksheet pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StocksheetConfig {
    /// Known item names.
    pub catalog: CatalogConfig,

    /// Recognized unit tokens.
    pub units: UnitConfig,

    /// Line extraction configuration.
    pub extraction: ExtractionConfig,

    /// OCR model configuration.
    pub ocr: OcrConfig,

    /// Destination spreadsheet configuration.
    pub sheets: SheetsConfig,
}

/// Catalog of stocked items.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Canonical item names. Order and duplicates do not matter.
    pub items: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            items: [
                "Filter Coffee",
                "Filter Coffee Glass",
                "Filter Coffee Powder",
                "Filter Coffee Packaging",
                "Tea Powder",
                "Sugar",
                "Milk",
                "Paneer",
                "Curd",
                "Butter",
                "Ghee",
                "Rice",
                "Toor Dal",
                "Urad Dal",
                "Wheat Flour",
                "Maida",
                "Sunflower Oil",
                "Salt",
                "Onion",
                "Tomato",
                "Potato",
                "Green Chilli",
                "Coriander",
                "Coconut",
                "Paper Cups",
                "Tissue Paper",
                "Parcel Cover",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

/// Unit vocabulary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitConfig {
    /// Unit tokens, matched case-insensitively.
    pub tokens: Vec<String>,
}

impl Default for UnitConfig {
    fn default() -> Self {
        Self {
            tokens: [
                "kg", "kgs", "g", "gm", "gms", "gram", "grams", "ltr", "ltrs", "litre", "litres",
                "l", "ml", "pcs", "pc", "piece", "pieces", "nos", "no", "box", "boxes", "pkt",
                "pkts", "packet", "packets", "dozen", "doz", "bottle", "bottles", "tin", "tins",
                "can", "cans", "bag", "bags", "bundle", "bundles", "tray", "trays",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

/// Line extraction configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Replacement header/noise keyword lists, per schema kind.
    /// Kinds without an entry use the built-in list.
    pub blacklist_overrides: BTreeMap<SchemaKind, Vec<String>>,
}

/// OCR model configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Directory containing model files.
    pub model_dir: PathBuf,

    /// Text detection model file name.
    pub detection_model: String,

    /// Text recognition model file name.
    pub recognition_model: String,

    /// Character dictionary file name.
    pub dictionary: String,

    /// Keep `[UNK]` placeholders in recognized text.
    pub keep_unk: bool,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            detection_model: "det.onnx".to_string(),
            recognition_model: "latin_rec.onnx".to_string(),
            dictionary: "latin_dict.txt".to_string(),
            keep_unk: false,
        }
    }
}

impl OcrConfig {
    /// Get full path to a model file.
    pub fn model_path(&self, file_name: &str) -> PathBuf {
        self.model_dir.join(file_name)
    }

    /// Whether the detection and recognition models are on disk.
    pub fn models_present(&self) -> bool {
        self.model_path(&self.detection_model).exists()
            && self.model_path(&self.recognition_model).exists()
            && self.model_path(&self.dictionary).exists()
    }
}

/// Destination spreadsheet configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetsConfig {
    /// Google spreadsheet id.
    pub spreadsheet_id: Option<String>,

    /// OAuth access token for the Sheets API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// Sheets API base URL.
    pub api_base: String,

    /// Directory for the local CSV sink.
    pub csv_dir: PathBuf,
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: None,
            access_token: None,
            api_base: "https://sheets.googleapis.com/v4".to_string(),
            csv_dir: PathBuf::from("sheets"),
        }
    }
}

impl StocksheetConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Apply `SPREADSHEET_ID` and `GOOGLE_ACCESS_TOKEN` from the environment.
    pub fn with_env_overrides(mut self) -> Self {
        self.apply_overrides(
            std::env::var(SPREADSHEET_ID_ENV).ok(),
            std::env::var(ACCESS_TOKEN_ENV).ok(),
        );
        self
    }

    fn apply_overrides(&mut self, spreadsheet_id: Option<String>, access_token: Option<String>) {
        if let Some(id) = spreadsheet_id.filter(|v| !v.trim().is_empty()) {
            self.sheets.spreadsheet_id = Some(id);
        }
        if let Some(token) = access_token.filter(|v| !v.trim().is_empty()) {
            self.sheets.access_token = Some(token);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: StocksheetConfig =
            serde_json::from_str(r#"{"catalog": {"items": ["Sugar"]}}"#).unwrap();

        assert_eq!(config.catalog.items, vec!["Sugar".to_string()]);
        assert!(config.units.tokens.contains(&"kg".to_string()));
        assert_eq!(config.ocr.detection_model, "det.onnx");
    }

    #[test]
    fn test_blacklist_overrides_keyed_by_schema() {
        let config: StocksheetConfig = serde_json::from_str(
            r#"{"extraction": {"blacklist_overrides": {"purchases": ["total"]}}}"#,
        )
        .unwrap();

        assert_eq!(
            config.extraction.blacklist_overrides.get(&SchemaKind::Purchases),
            Some(&vec!["total".to_string()])
        );
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = StocksheetConfig::default();
        config.sheets.spreadsheet_id = Some("abc123".to_string());
        config.save(&path).unwrap();

        let loaded = StocksheetConfig::from_file(&path).unwrap();
        assert_eq!(loaded.sheets.spreadsheet_id.as_deref(), Some("abc123"));
        assert_eq!(loaded.catalog.items.len(), config.catalog.items.len());
    }

    #[test]
    fn test_blank_overrides_ignored() {
        let mut config = StocksheetConfig::default();
        config.apply_overrides(Some("  ".to_string()), Some("token".to_string()));

        assert_eq!(config.sheets.spreadsheet_id, None);
        assert_eq!(config.sheets.access_token.as_deref(), Some("token"));
    }
}
