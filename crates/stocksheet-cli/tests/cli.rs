use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn stocksheet(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("stocksheet").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("SPREADSHEET_ID")
        .env_remove("GOOGLE_ACCESS_TOKEN");
    cmd
}

#[test]
fn extract_writes_store_demand_csv() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("list.txt");
    fs::write(&input, "Date: 24/09\n1. Sugar 5 kg\n2. Milk 2 ltr\n").unwrap();

    stocksheet(&home)
        .args(["extract", input.to_str().unwrap(), "--sheet", "StoreDemand", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("S.No,Item Name,Unit,Demand Quantity\n"))
        .stdout(predicate::str::contains("1,Sugar,kg,5\n2,Milk,ltr,2\n"));
}

#[test]
fn extract_falls_back_to_raw_text() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("list.txt");
    fs::write(&input, "Bread 4\nEggs 12\n").unwrap();

    stocksheet(&home)
        .args(["extract", input.to_str().unwrap(), "-s", "Inventory", "-f", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Extracted Text\nBread 4\nEggs 12\n"));
}

#[test]
fn ingest_text_into_csv_sheet() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("demand.txt");
    let out = home.path().join("sheets");
    fs::write(&input, "Paneer 3 kg\n").unwrap();

    stocksheet(&home)
        .args(["ingest", input.to_str().unwrap(), "--sheet", "StoreDemand", "--sink", "csv"])
        .args(["--csv-dir", out.to_str().unwrap(), "--with-header"])
        .assert()
        .success();

    let written = fs::read_to_string(out.join("StoreDemand.csv")).unwrap();
    assert_eq!(written, "S.No,Item Name,Unit,Demand Quantity\n1,Paneer,kg,3\n");
}

#[test]
fn ingest_to_google_needs_spreadsheet_id() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("demand.txt");
    fs::write(&input, "Paneer 3 kg\n").unwrap();

    stocksheet(&home)
        .args(["ingest", input.to_str().unwrap(), "--sheet", "StoreDemand"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("SPREADSHEET_ID environment variable not set."));
}

#[test]
fn health_reports_json() {
    let home = TempDir::new().unwrap();

    stocksheet(&home)
        .args(["health", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"catalog_items\""));
}

#[test]
fn config_init_then_add_item() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("config.json");
    let path = path.to_str().unwrap();

    stocksheet(&home).args(["-c", path, "config", "init"]).assert().success();
    stocksheet(&home)
        .args(["-c", path, "config", "add-item", "Jaggery"])
        .assert()
        .success();
    stocksheet(&home)
        .args(["-c", path, "config", "items"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Jaggery"));
}
