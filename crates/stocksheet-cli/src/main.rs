//! CLI for turning photographed stock lists into spreadsheet rows.

mod commands;
mod sinks;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, config, extract, health, ingest};

/// stocksheet - OCR handwritten or printed stock lists into Google Sheets
#[derive(Parser)]
#[command(name = "stocksheet")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract rows from already recognized text
    Extract(extract::ExtractArgs),

    /// OCR one list and append its rows to a sheet
    Ingest(ingest::IngestArgs),

    /// Ingest many lists into one sheet
    Batch(batch::BatchArgs),

    /// Check catalog, OCR models and sheet credentials
    Health(health::HealthArgs),

    /// Manage configuration and the item catalog
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Extract(args) => extract::run(args, config_path).await,
        Commands::Ingest(args) => ingest::run(args, config_path).await,
        Commands::Batch(args) => batch::run(args, config_path).await,
        Commands::Health(args) => health::run(args, config_path).await,
        Commands::Config(args) => config::run(args, config_path).await,
    }
}
