//! Unit tests for CSV loading and the missing-value report

use autoprice::pipeline::{load_dataset, missing_value_counts};
use std::io::Write;
use tempfile::TempDir;

#[path = "common/mod.rs"]
mod common;

fn write_csv(content: &str) -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    (dir, path)
}

#[test]
fn test_question_mark_parsed_as_null() {
    let (_dir, path) = write_csv("horsepower,price\n100,13495\n?,16500\n120,17450\n");

    let df = load_dataset(&path, 100).unwrap();

    assert_eq!(df.height(), 3);
    assert_eq!(
        df.column("horsepower").unwrap().null_count(),
        1,
        "The '?' token should load as null"
    );
    assert_eq!(df.column("price").unwrap().null_count(), 0);
}

#[test]
fn test_missing_counts_sorted_descending() {
    let (_dir, path) = write_csv(
        "a,b,c\n1,?,?\n2,?,3\n3,4,5\n",
    );
    let df = load_dataset(&path, 100).unwrap();

    let counts = missing_value_counts(&df);

    assert_eq!(counts[0], ("b".to_string(), 2));
    assert_eq!(counts[1], ("c".to_string(), 1));
    assert_eq!(counts[2], ("a".to_string(), 0));
}

#[test]
fn test_missing_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    let result = load_dataset(&dir.path().join("nope.csv"), 100);
    assert!(result.is_err(), "A missing input file should abort the run");
}

#[test]
fn test_full_schema_synthetic_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("synthetic.csv");
    common::write_synthetic_csv(&path, 30).unwrap();

    let df = load_dataset(&path, 100).unwrap();

    common::assert_shape(&df, 30, 15);
    // Row 2's horsepower and row 5's doors are sentinels in the fixture.
    assert_eq!(df.column("horsepower").unwrap().null_count(), 1);
    assert_eq!(df.column("num-of-doors").unwrap().null_count(), 1);
}
