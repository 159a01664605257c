//! CLI subcommands and the helpers they share.

pub mod batch;
pub mod config;
pub mod extract;
pub mod health;
pub mod ingest;

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use tracing::debug;

use stocksheet_core::{ResultTable, StocksheetConfig};

use crate::sinks::{CsvSheetSink, GoogleSheetsSink, Sink};

/// Output format for tables and reports.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text table
    Text,
}

/// Where extracted rows are appended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SinkKind {
    /// Google Sheets API (needs SPREADSHEET_ID and GOOGLE_ACCESS_TOKEN)
    Google,
    /// Local CSV file per worksheet
    Csv,
}

/// Load the config file (explicit path, then the default location), then apply env overrides.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<StocksheetConfig> {
    let config = match config_path {
        Some(path) => StocksheetConfig::from_file(Path::new(path))?,
        None => {
            let default_path = config::default_config_path();
            if default_path.exists() {
                debug!("Using config from {}", default_path.display());
                StocksheetConfig::from_file(&default_path)?
            } else {
                StocksheetConfig::default()
            }
        }
    };

    Ok(config.with_env_overrides())
}

/// Build the sink and the spreadsheet id to append to.
pub fn build_sink(
    kind: SinkKind,
    config: &StocksheetConfig,
    csv_dir: Option<PathBuf>,
) -> anyhow::Result<(Sink, String)> {
    match kind {
        SinkKind::Google => {
            let Some(spreadsheet_id) = config.sheets.spreadsheet_id.clone() else {
                anyhow::bail!("SPREADSHEET_ID environment variable not set.");
            };
            let sink = GoogleSheetsSink::from_config(&config.sheets)?;
            Ok((Sink::Google(sink), spreadsheet_id))
        }
        SinkKind::Csv => {
            let dir = csv_dir.unwrap_or_else(|| config.sheets.csv_dir.clone());
            let spreadsheet_id = config
                .sheets
                .spreadsheet_id
                .clone()
                .unwrap_or_else(|| "local".to_string());
            Ok((Sink::Csv(CsvSheetSink::new(dir)), spreadsheet_id))
        }
    }
}

/// Header rows followed by data rows, as CSV.
pub fn format_table_csv(table: &ResultTable) -> anyhow::Result<String> {
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(vec![]);

    for row in table.columns.iter().chain(&table.rows) {
        wtr.write_record(row)?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

/// Column-aligned plain text rendering.
pub fn format_table_text(table: &ResultTable) -> String {
    let all_rows: Vec<&Vec<String>> = table.columns.iter().chain(&table.rows).collect();
    let width = all_rows.iter().map(|r| r.len()).max().unwrap_or(0);

    let mut col_widths = vec![0usize; width];
    for row in &all_rows {
        for (i, cell) in row.iter().enumerate() {
            col_widths[i] = col_widths[i].max(cell.chars().count());
        }
    }

    let mut output = String::new();
    for (n, row) in all_rows.iter().enumerate() {
        let line: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{:<w$}", cell, w = col_widths[i]))
            .collect();
        output.push_str(line.join("  ").trim_end());
        output.push('\n');

        if n + 1 == table.columns.len() {
            let rule: Vec<String> = col_widths.iter().map(|w| "-".repeat(*w)).collect();
            output.push_str(&rule.join("  "));
            output.push('\n');
        }
    }

    output
}
