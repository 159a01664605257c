//! Ingest command - OCR a photographed list and append the rows to a sheet.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use stocksheet_core::{Extractor, IngestPipeline, IngestReport, IngestRequest};

use super::{build_sink, format_table_text, load_config, SinkKind};
use crate::sinks::{Recognizer, Sink};

/// Arguments for the ingest command.
#[derive(Args)]
pub struct IngestArgs {
    /// Image of the list (or a .txt file with already recognized text)
    #[arg(required = true)]
    input: PathBuf,

    /// Destination worksheet name (selects the column schema)
    #[arg(short, long)]
    sheet: String,

    #[command(flatten)]
    target: TargetArgs,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

/// Options shared by ingest and batch.
#[derive(Args)]
pub struct TargetArgs {
    /// Where to append rows
    #[arg(long, value_enum, default_value = "google")]
    pub sink: SinkKind,

    /// Directory for the CSV sink
    #[arg(long)]
    pub csv_dir: Option<PathBuf>,

    /// OCR model directory
    #[arg(short, long)]
    pub model_dir: Option<PathBuf>,

    /// Send the header row before the data
    #[arg(long)]
    pub with_header: bool,

    /// Extract only, do not append
    #[arg(long)]
    pub dry_run: bool,
}

/// Assemble the pipeline described by the config and target options.
pub fn build_pipeline(
    target: &TargetArgs,
    config_path: Option<&str>,
) -> anyhow::Result<IngestPipeline<Recognizer, Sink>> {
    let mut config = load_config(config_path)?;
    if let Some(model_dir) = &target.model_dir {
        config.ocr.model_dir = model_dir.clone();
    }

    let (sink, spreadsheet_id) = if target.dry_run {
        // Nothing is appended, so credentials are not required.
        build_sink(SinkKind::Csv, &config, target.csv_dir.clone())?
    } else {
        build_sink(target.sink, &config, target.csv_dir.clone())?
    };

    let pipeline = IngestPipeline::new(
        Extractor::from_config(&config),
        Recognizer::load(&config.ocr),
        sink,
        spreadsheet_id,
    )
    .with_header(target.with_header)
    .with_dry_run(target.dry_run);

    Ok(pipeline)
}

/// Read an input file into a request.
pub fn request_for(path: &Path, sheet: &str) -> anyhow::Result<IngestRequest> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "txt" => Ok(IngestRequest::from_text(fs::read_to_string(path)?, sheet)),
        "png" | "jpg" | "jpeg" | "webp" | "tiff" | "tif" | "bmp" => {
            Ok(IngestRequest::from_image(fs::read(path)?, sheet))
        }
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    }
}

pub async fn run(args: IngestArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);

    pb.set_message("Loading OCR engine...");
    let pipeline = build_pipeline(&args.target, config_path)?;

    pb.set_message("Extracting rows...");
    let request = request_for(&args.input, &args.sheet)?;
    let report = pipeline.ingest(&request).await?;
    pb.finish_and_clear();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, args.target.dry_run);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn print_report(report: &IngestReport, dry_run: bool) {
    print!("{}", format_table_text(&report.table));
    println!();

    if report.table.is_fallback() {
        println!(
            "{} No catalog items recognized; returning the raw text for review.",
            style("!").yellow()
        );
    }

    match report.append {
        Some(outcome) => println!(
            "{} Appended {} rows ({} cells) to {}",
            style("✓").green(),
            outcome.updated_rows,
            outcome.updated_cells,
            report.sheet_name
        ),
        None if dry_run => println!("{} Dry run, nothing appended.", style("ℹ").blue()),
        None => println!("{} Nothing to append.", style("ℹ").blue()),
    }
}
