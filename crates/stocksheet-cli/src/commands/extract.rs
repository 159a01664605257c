//! Extract command - turn a text file into sheet rows without OCR or upload.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use stocksheet_core::{Extractor, SchemaKind};

use super::{format_table_csv, format_table_text, load_config, OutputFormat};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Text file with OCR output ("-" for stdin)
    #[arg(required = true)]
    input: PathBuf,

    /// Destination sheet name (selects the column schema)
    #[arg(short, long)]
    sheet: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Report skipped and unmatched line counts on stderr
    #[arg(long)]
    stats: bool,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let text = if args.input.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        if !args.input.exists() {
            anyhow::bail!("Input file not found: {}", args.input.display());
        }
        fs::read_to_string(&args.input)?
    };

    let schema = SchemaKind::from_sheet_name(&args.sheet);
    info!("Extracting rows for sheet {:?} ({} schema)", args.sheet, schema);

    let extractor = Extractor::from_config(&config);
    let result = extractor.parse(&text, schema);

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&result.table)?,
        OutputFormat::Csv => format_table_csv(&result.table)?,
        OutputFormat::Text => format_table_text(&result.table),
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.stats {
        eprintln!(
            "{} {} rows, {} lines skipped, {} lines unmatched{}",
            style("ℹ").blue(),
            result.rows.len(),
            result.skipped_lines,
            result.unmatched_lines,
            if result.table.is_fallback() { " (fallback table)" } else { "" }
        );
    }

    Ok(())
}
