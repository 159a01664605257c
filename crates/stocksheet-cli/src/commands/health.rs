//! Health command - report whether everything needed for an ingest is in place.

use clap::Args;
use console::style;
use serde::Serialize;

use stocksheet_core::{Extractor, StocksheetConfig};

use super::load_config;

/// Arguments for the health command.
#[derive(Args)]
pub struct HealthArgs {
    /// Print the status as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct HealthStatus {
    status: &'static str,
    message: String,
    version: &'static str,
    catalog_items: usize,
    unit_tokens: usize,
    ocr_models: bool,
    spreadsheet_id: bool,
    access_token: bool,
}

impl HealthStatus {
    fn collect(config: &StocksheetConfig) -> Self {
        let extractor = Extractor::from_config(config);
        let ocr_models = config.ocr.models_present();
        let spreadsheet_id = config.sheets.spreadsheet_id.is_some();
        let access_token = config.sheets.access_token.is_some();

        let (status, message) = if extractor.catalog().is_empty() {
            ("degraded", "Catalog is empty; every upload will fall back to raw text.".to_string())
        } else if !ocr_models {
            (
                "degraded",
                format!("OCR models missing in {}.", config.ocr.model_dir.display()),
            )
        } else {
            ("ok", "Ready for OCR!".to_string())
        };

        Self {
            status,
            message,
            version: env!("CARGO_PKG_VERSION"),
            catalog_items: extractor.catalog().len(),
            unit_tokens: extractor.units().len(),
            ocr_models,
            spreadsheet_id,
            access_token,
        }
    }
}

pub async fn run(args: HealthArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let health = HealthStatus::collect(&config);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&health)?);
        return Ok(());
    }

    let mark = |ok: bool| if ok { style("✓").green() } else { style("✗").red() };

    println!("{} {}", style(health.status).bold(), health.message);
    println!("  version:        {}", health.version);
    println!("  catalog items:  {}", health.catalog_items);
    println!("  unit tokens:    {}", health.unit_tokens);
    println!("  {} OCR models", mark(health.ocr_models));
    println!("  {} spreadsheet id", mark(health.spreadsheet_id));
    println!("  {} access token", mark(health.access_token));

    Ok(())
}
