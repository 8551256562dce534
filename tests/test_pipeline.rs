//! End-to-end tests running the autoprice binary over a synthetic dataset

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[path = "common/mod.rs"]
mod common;

#[test]
fn test_full_pipeline_on_synthetic_data() {
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("autos.csv");
    common::write_synthetic_csv(&csv_path, 40).unwrap();

    Command::cargo_bin("autoprice")
        .unwrap()
        .arg("-i")
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Model Development"))
        .stdout(predicate::str::contains("Best alpha"))
        .stdout(predicate::str::contains("analysis complete"));
}

#[test]
fn test_pipeline_exports_json_report() {
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("autos.csv");
    let export_path = dir.path().join("report.json");
    common::write_synthetic_csv(&csv_path, 40).unwrap();

    Command::cargo_bin("autoprice")
        .unwrap()
        .arg("-i")
        .arg(&csv_path)
        .arg("--export")
        .arg(&export_path)
        .assert()
        .success();

    let raw = std::fs::read_to_string(&export_path).unwrap();
    let report: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(report["metadata"]["target_column"], "price");
    assert_eq!(report["metadata"]["seed"], 0);
    assert_eq!(report["models"].as_array().unwrap().len(), 3);

    // The simple OLS metrics must be finite and R² within [0, 1] for the
    // monotone synthetic relation.
    let r2 = report["models"][0]["r_squared"].as_f64().unwrap();
    assert!(r2.is_finite());
    assert!((0.0..=1.0).contains(&r2), "simple OLS R² out of range: {}", r2);

    let best_alpha = report["grid_search"]["best_alpha"].as_f64().unwrap();
    assert!(best_alpha > 0.0);

    // Imputation report: horsepower got a mean, doors got a mode.
    let means = report["cleaning"]["imputed_means"].as_array().unwrap();
    assert!(means.iter().any(|m| m[0] == "horsepower"));
    assert!(report["cleaning"]["imputed_mode"].is_string());
}

#[test]
fn test_missing_input_file_fails() {
    Command::cargo_bin("autoprice")
        .unwrap()
        .arg("-i")
        .arg("definitely-not-here.csv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open CSV file"));
}

#[test]
fn test_seeded_runs_are_identical() {
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("autos.csv");
    common::write_synthetic_csv(&csv_path, 40).unwrap();

    let export_a = dir.path().join("a.json");
    let export_b = dir.path().join("b.json");

    for export in [&export_a, &export_b] {
        Command::cargo_bin("autoprice")
            .unwrap()
            .arg("-i")
            .arg(&csv_path)
            .arg("--seed")
            .arg("42")
            .arg("--export")
            .arg(export)
            .assert()
            .success();
    }

    let a: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&export_a).unwrap()).unwrap();
    let b: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&export_b).unwrap()).unwrap();

    assert_eq!(a["holdout"], b["holdout"], "Same seed must give the same holdout result");
    assert_eq!(a["grid_search"], b["grid_search"]);
    assert_eq!(a["models"], b["models"]);
}
