//! End-to-end tests for the `cashplan` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cashplan(config_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("cashplan").unwrap();
    cmd.env("CASHPLAN_CONFIG_DIR", config_dir)
        .env_remove("CASHPLAN_TODAY")
        .env_remove("RUST_LOG")
        .args(["--today", "2025-10-19"]);
    cmd
}

#[test]
fn test_split_prints_first_and_base() {
    let dir = TempDir::new().unwrap();
    cashplan(dir.path())
        .args(["split", "100.01", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("First:     R$33.35"))
        .stdout(predicate::str::contains("Remaining: 2 x R$33.33"));
}

#[test]
fn test_installments_json_schedule() {
    let dir = TempDir::new().unwrap();
    let output = cashplan(dir.path())
        .args(["--json", "installments", "Sofa", "1.234,56", "3", "--start", "2024-01-31"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let schedule: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let items = schedule.as_array().unwrap();
    assert_eq!(items.len(), 3);

    let total: i64 = items.iter().map(|i| i["amountCents"].as_i64().unwrap()).sum();
    assert_eq!(total, 123456);
    assert_eq!(items[0]["amountCents"], 41152);
    assert_eq!(items[1]["occurredAt"], "2024-02-29");
    assert_eq!(items[2]["description"], "Sofa (3/3)");
    assert_eq!(items[0]["installmentGroupId"], items[2]["installmentGroupId"]);
}

#[test]
fn test_installments_rejects_bad_count() {
    let dir = TempDir::new().unwrap();
    cashplan(dir.path())
        .args(["installments", "TV", "1000", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Installment count must be between 1 and 72, got 0"));
}

#[test]
fn test_installments_csv_export() {
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("schedule.csv");

    cashplan(dir.path())
        .args(["installments", "TV", "300", "3", "--csv"])
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("TV (1/3)"));

    let contents = fs::read_to_string(&csv_path).unwrap();
    assert!(contents.starts_with("number,total,description,date,competence,amount"));
    assert_eq!(contents.lines().count(), 4);
    assert!(contents.contains("2025-12-19,2025-12,100.00"));
}

#[test]
fn test_goal_estimate() {
    let dir = TempDir::new().unwrap();
    cashplan(dir.path())
        .args(["goal", "estimate", "--target", "100", "--monthly", "30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Estimated completion: 2026-02-01"));

    cashplan(dir.path())
        .args(["goal", "estimate", "--target", "100", "--monthly", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No estimate"));
}

#[test]
fn test_goal_required() {
    let dir = TempDir::new().unwrap();
    cashplan(dir.path())
        .args([
            "goal", "required", "--target", "600.02", "--current", "0.01", "--by", "2026-04-10",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Required monthly contribution: R$100.01"));
}

#[test]
fn test_goal_health_grace_window() {
    let dir = TempDir::new().unwrap();
    cashplan(dir.path())
        .args(["goal", "health", "--target-date", "2026-06-01", "--estimated", "2026-07-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("At risk"));

    cashplan(dir.path())
        .args(["--json", "goal", "health", "--target-date", "2026-06-01", "--estimated", "2026-07-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"BEHIND\""));
}

#[test]
fn test_goals_file_analysis() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("goals.yaml");
    fs::write(
        &file,
        r#"goals:
  - id: house
    name: House
    targetCents: 10000000
    targetDate: 2026-01-01
    estimatedDate: 2026-09-01
    monthlyAllocation: 50000
  - id: trip
    name: Trip
    targetCents: 500000
    targetDate: 2026-03-01
"#,
    )
    .unwrap();

    cashplan(dir.path())
        .arg("goals")
        .arg(&file)
        .args(["--available", "400"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[BEHIND] House"))
        .stdout(predicate::str::contains("[AT_RISK] Trip"))
        .stdout(predicate::str::contains("exceeds the available balance"))
        .stdout(predicate::str::contains("Goal \"House\" may delay goal \"Trip\"."));
}

#[test]
fn test_budget_file_analysis() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("budget.json");
    fs::write(
        &file,
        r#"{"categories": [
            {"categoryId": "food", "categoryName": "Food", "budgetCents": 100000, "spentCents": 120000},
            {"categoryId": "fun", "categoryName": "Fun", "budgetCents": 50000, "spentCents": 5000}
        ]}"#,
    )
    .unwrap();

    cashplan(dir.path())
        .arg("budget")
        .arg(&file)
        .args(["--savings", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("EXCEEDED"))
        .stdout(predicate::str::contains("Remaining budget: R$450.00"))
        .stdout(predicate::str::contains("Food: R$1000.00 -> R$1320.00"))
        .stdout(predicate::str::contains("Fun: R$500.00 -> R$400.00"));
}

#[test]
fn test_project_with_csv() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("projection.json");
    fs::write(
        &file,
        r#"{
            "startingBalance": 10000,
            "averageIncome": 500000,
            "pendingExpenses": [{"amountCents": 120000, "competenceAt": "2025-11-01"}],
            "goals": [{"id": "car", "name": "Car", "targetCents": 3000000, "monthlyAllocation": 100000}]
        }"#,
    )
    .unwrap();
    let csv_path = dir.path().join("projection.csv");

    cashplan(dir.path())
        .arg("project")
        .arg(&file)
        .args(["--months", "3", "--csv"])
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("2025-12"))
        .stdout(predicate::str::contains("Goals by 2025-12"));

    let contents = fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[1], "2025-10,5000.00,0.00,5000.00,5100.00,0,1000.00");
    assert_eq!(lines[2], "2025-11,5000.00,1200.00,3800.00,8900.00,1,1000.00");
}

#[test]
fn test_project_rejects_long_horizon() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("projection.json");
    fs::write(&file, "{}").unwrap();

    cashplan(dir.path())
        .arg("project")
        .arg(&file)
        .args(["--months", "25"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Months ahead must be between 1 and 24"));
}

#[test]
fn test_unsupported_input_extension() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("goals.txt");
    fs::write(&file, "").unwrap();

    cashplan(dir.path())
        .arg("goals")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported input file"));
}

#[test]
fn test_init_then_config_uses_saved_settings() {
    let dir = TempDir::new().unwrap();

    cashplan(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Settings written to"));
    assert!(dir.path().join("config.json").exists());

    let settings = fs::read_to_string(dir.path().join("config.json")).unwrap();
    fs::write(
        dir.path().join("config.json"),
        settings.replace("\"R$\"", "\"€\""),
    )
    .unwrap();

    cashplan(dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Timezone:          America/Sao_Paulo"))
        .stdout(predicate::str::contains("Today:             2025-10-19"))
        .stdout(predicate::str::contains("Currency symbol:   €"));
}

#[test]
fn test_invalid_settings_file_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.json"), r#"{"timezone": "Nowhere/Special"}"#).unwrap();

    cashplan(dir.path())
        .args(["split", "10", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown timezone"));
}
