//! Config command - manage the configuration file and the item catalog.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;

use stocksheet_core::extract::rules::Catalog;
use stocksheet_core::StocksheetConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Write a configuration file with the built-in catalog and units
    Init {
        /// Output path for configuration file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },

    /// Get a configuration value (e.g. "sheets.csv_dir")
    Get { key: String },

    /// Set a configuration value (JSON or bare string)
    Set { key: String, value: String },

    /// List catalog items in match order
    Items,

    /// Add items to the catalog
    AddItem {
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Remove items from the catalog (case-insensitive)
    RemoveItem {
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Show configuration file path
    Path,
}

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let path = config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);

    match args.command {
        ConfigCommand::Show => {
            println!("{}", serde_json::to_string_pretty(&read_or_default(&path)?)?);
            Ok(())
        }
        ConfigCommand::Init { output, force } => init_config(output.unwrap_or(path), force),
        ConfigCommand::Get { key } => {
            let json = serde_json::to_value(read_or_default(&path)?)?;
            let value = lookup(&json, &key)
                .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;
            println!("{}", serde_json::to_string_pretty(value)?);
            Ok(())
        }
        ConfigCommand::Set { key, value } => set_config(&path, &key, &value),
        ConfigCommand::Items => {
            let config = read_or_default(&path)?;
            for name in Catalog::new(&config.catalog.items).names() {
                println!("{}", name);
            }
            Ok(())
        }
        ConfigCommand::AddItem { names } => update_items(&path, |items| {
            for name in names {
                let name = name.trim().to_string();
                if !name.is_empty() && !items.iter().any(|i| i.eq_ignore_ascii_case(&name)) {
                    items.push(name);
                }
            }
        }),
        ConfigCommand::RemoveItem { names } => update_items(&path, |items| {
            items.retain(|i| !names.iter().any(|n| n.trim().eq_ignore_ascii_case(i)));
        }),
        ConfigCommand::Path => {
            println!("Configuration file: {}", path.display());
            if path.exists() {
                println!("Status: {}", style("exists").green());
            } else {
                println!("Status: {}", style("not created").yellow());
                println!();
                println!("Run 'stocksheet config init' to create a configuration file.");
            }
            Ok(())
        }
    }
}

/// `<config dir>/stocksheet/config.json`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("stocksheet")
        .join("config.json")
}

fn read_or_default(path: &Path) -> anyhow::Result<StocksheetConfig> {
    if path.exists() {
        Ok(StocksheetConfig::from_file(path)?)
    } else {
        Ok(StocksheetConfig::default())
    }
}

fn write(path: &Path, config: &StocksheetConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    config.save(path)?;
    Ok(())
}

fn init_config(path: PathBuf, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    write(&path, &StocksheetConfig::default())?;
    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        path.display()
    );
    Ok(())
}

fn lookup<'a>(json: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(json, |node, part| node.get(part))
}

fn set_config(path: &Path, key: &str, value: &str) -> anyhow::Result<()> {
    let parsed: Value =
        serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));

    let mut json = serde_json::to_value(read_or_default(path)?)?;
    let (parent_key, field) = match key.rsplit_once('.') {
        Some((parent, field)) => (Some(parent), field),
        None => (None, key),
    };

    let mut parent = &mut json;
    for part in parent_key.into_iter().flat_map(|p| p.split('.')) {
        parent = parent
            .get_mut(part)
            .ok_or_else(|| anyhow::anyhow!("Configuration path not found: {}", key))?;
    }
    let Some(object) = parent.as_object_mut() else {
        anyhow::bail!("Cannot set value at non-object path: {}", key);
    };
    object.insert(field.to_string(), parsed.clone());

    // Round-trip through the typed config so bad values are rejected.
    let config: StocksheetConfig = serde_json::from_value(json)?;
    write(path, &config)?;

    println!(
        "{} Set {} = {}",
        style("✓").green(),
        key,
        serde_json::to_string(&parsed)?
    );
    Ok(())
}

fn update_items(path: &Path, edit: impl FnOnce(&mut Vec<String>)) -> anyhow::Result<()> {
    let mut config = read_or_default(path)?;
    let before = config.catalog.items.len();
    edit(&mut config.catalog.items);
    write(path, &config)?;

    println!(
        "{} Catalog now has {} items (was {})",
        style("✓").green(),
        config.catalog.items.len(),
        before
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_and_add_items() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        set_config(&path, "sheets.spreadsheet_id", "abc123").unwrap();
        update_items(&path, |items| items.push("Jaggery".to_string())).unwrap();

        let config = StocksheetConfig::from_file(&path).unwrap();
        assert_eq!(config.sheets.spreadsheet_id.as_deref(), Some("abc123"));
        assert!(config.catalog.items.contains(&"Jaggery".to_string()));
    }

    #[test]
    fn test_set_rejects_bad_types() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        assert!(set_config(&path, "ocr.keep_unk", "\"yes\"").is_err());
        assert!(set_config(&path, "nope.field", "1").is_err());
    }

    #[test]
    fn test_lookup() {
        let json = serde_json::to_value(StocksheetConfig::default()).unwrap();
        assert_eq!(lookup(&json, "ocr.detection_model"), Some(&Value::from("det.onnx")));
        assert_eq!(lookup(&json, "ocr.missing"), None);
    }
}
