//! Runs the truckcare binary against the sample fixtures

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::tempdir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../tests/fixtures")
        .join(name)
}

/// Run with an isolated home so no user config is picked up
fn run(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_truckcare"))
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("XDG_DATA_HOME", home.join(".local/share"))
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("failed to run truckcare")
}

fn run_with_fixtures(home: &Path, args: &[&str]) -> Output {
    let dataset = fixture("sample_history.csv");
    let model = fixture("sample_model.json");
    let mut full = vec![
        "--dataset",
        dataset.to_str().unwrap(),
        "--model",
        model.to_str().unwrap(),
    ];
    full.extend_from_slice(args);
    run(home, &full)
}

#[test]
fn test_predict_json() {
    let home = tempdir().unwrap();
    let output = run_with_fixtures(
        home.path(),
        &[
            "-f",
            "json",
            "predict",
            "--plate",
            "MH12AB1234",
            "--set",
            "engine_temperature_c=145",
            "--set",
            "oil_life_percent=8",
        ],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let result: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["plate"], "MH12AB1234");
    assert_eq!(result["risk_bucket"], "Critical");
    assert_eq!(result["predicted_days"], 9.0);
    assert_eq!(result["sensor_badges"]["engine_temperature_c"], "Critical");
    assert_eq!(result["sensor_badges"]["oil_life_percent"], "Critical");
}

#[test]
fn test_history_unknown_plate_is_empty() {
    let home = tempdir().unwrap();
    let output = run_with_fixtures(home.path(), &["-f", "json", "history", "XYZ123"]);
    assert!(output.status.success());
    let rows: Vec<Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert!(rows.is_empty());
}

#[test]
fn test_history_table() {
    let home = tempdir().unwrap();
    let output = run_with_fixtures(home.path(), &["history", "mh12ab1234", "-n", "2"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("2 rows"));
    assert!(stdout.contains("R005"));
    assert!(!stdout.contains("R001"));
}

#[test]
fn test_records_page() {
    let home = tempdir().unwrap();
    let output = run_with_fixtures(home.path(), &["records", "--offset", "3", "-n", "2"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Records 4-5 of 6"));
    assert!(stdout.contains("DL05CX7788"));
    assert!(stdout.contains("R005"));
    assert!(!stdout.contains("R006"));

    let output = run_with_fixtures(home.path(), &["-f", "json", "records"]);
    let page: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(page["total"], 6);
    assert_eq!(page["records"].as_array().unwrap().len(), 6);
}

#[test]
fn test_predict_without_model_fails() {
    let home = tempdir().unwrap();
    let missing = home.path().join("missing.json");
    let dataset = fixture("sample_history.csv");
    let output = run(
        home.path(),
        &[
            "--dataset",
            dataset.to_str().unwrap(),
            "--model",
            missing.to_str().unwrap(),
            "predict",
            "--plate",
            "MH12AB1234",
        ],
    );
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Model unavailable"));
}

#[test]
fn test_dashboard_json() {
    let home = tempdir().unwrap();
    let output = run_with_fixtures(home.path(), &["-f", "json", "dashboard"]);
    assert!(output.status.success());
    let stats: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stats["record_count"], 6);
    assert_eq!(stats["distinct_plates"], 3);
    assert_eq!(stats["risk_distribution"]["Critical"], 1);
}

#[test]
fn test_config_set_and_show() {
    let home = tempdir().unwrap();
    let output = run(home.path(), &["config", "--set-output", "json"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Configuration updated"));

    let output = run(home.path(), &["config", "--show"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Output format:  json"));
}
