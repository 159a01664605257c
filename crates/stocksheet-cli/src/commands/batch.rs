//! Batch command - ingest many photographed lists into one sheet.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, warn};

use stocksheet_core::IngestReport;

use super::ingest::{build_pipeline, request_for, TargetArgs};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern for input files
    #[arg(required = true)]
    input: String,

    /// Destination worksheet name (selects the column schema)
    #[arg(short, long)]
    sheet: String,

    #[command(flatten)]
    target: TargetArgs,

    /// Write a per-file summary CSV to this path
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of ingesting a single file.
struct FileResult {
    path: PathBuf,
    report: Option<IngestReport>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(
                ext.to_lowercase().as_str(),
                "txt" | "png" | "jpg" | "jpeg" | "webp" | "tiff" | "tif" | "bmp"
            )
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to ingest into {}",
        style("ℹ").blue(),
        files.len(),
        args.sheet
    );

    let pipeline = build_pipeline(&args.target, config_path)?;

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    // Sequential so rows land in the sheet in file order.
    let mut results = Vec::with_capacity(files.len());
    for path in files {
        let file_start = Instant::now();
        let outcome = match request_for(&path, &args.sheet) {
            Ok(request) => pipeline.ingest(&request).await.map_err(anyhow::Error::from),
            Err(e) => Err(e),
        };
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match outcome {
            Ok(report) => results.push(FileResult {
                path,
                report: Some(report),
                error: None,
                processing_time_ms,
            }),
            Err(e) => {
                let error_msg = e.to_string();
                if !args.continue_on_error {
                    error!("Failed to ingest {}: {}", path.display(), error_msg);
                    overall_pb.abandon();
                    anyhow::bail!("Ingest failed for {}: {}", path.display(), error_msg);
                }
                warn!("Failed to ingest {}: {}", path.display(), error_msg);
                results.push(FileResult {
                    path,
                    report: None,
                    error: Some(error_msg),
                    processing_time_ms,
                });
            }
        }

        overall_pb.inc(1);
    }

    overall_pb.finish_with_message("Complete");

    if let Some(summary_path) = &args.summary {
        write_summary(summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed: Vec<&FileResult> = results.iter().filter(|r| r.error.is_some()).collect();
    let rows: usize = results
        .iter()
        .filter_map(|r| r.report.as_ref())
        .filter(|r| !r.table.is_fallback())
        .map(|r| r.table.rows.len())
        .sum();

    println!();
    println!(
        "{} Processed {} files in {:?}: {} rows extracted",
        style("✓").green(),
        results.len(),
        start.elapsed(),
        rows
    );
    println!(
        "   {} successful, {} failed",
        style(results.len() - failed.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn write_summary(path: &Path, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "schema",
        "rows",
        "fallback",
        "updated_cells",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result.path.file_name().and_then(|s| s.to_str()).unwrap_or("");
        let time = result.processing_time_ms.to_string();

        match &result.report {
            Some(report) => wtr.write_record([
                filename,
                "success",
                report.schema.as_str(),
                &report.table.rows.len().to_string(),
                &report.table.is_fallback().to_string(),
                &report.append.map(|a| a.updated_cells).unwrap_or(0).to_string(),
                &time,
                "",
            ])?,
            None => wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                "",
                &time,
                result.error.as_deref().unwrap_or(""),
            ])?,
        }
    }

    wtr.flush()?;
    Ok(())
}
