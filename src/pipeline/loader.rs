//! Dataset loader for the automobile CSV file.
//!
//! The source data encodes missing values as the literal token `"?"`, so the
//! CSV reader is configured to parse that token as null in every column.

use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::Path;

/// The token used for missing values in the raw dataset.
pub const MISSING_SENTINEL: &str = "?";

/// Load a dataset from a CSV file, treating `"?"` as null.
///
/// `infer_schema_length` controls how many rows polars scans for dtype
/// inference; 0 means a full table scan.
pub fn load_dataset(path: &Path, infer_schema_length: usize) -> Result<DataFrame> {
    let schema_length = if infer_schema_length == 0 {
        None
    } else {
        Some(infer_schema_length)
    };

    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(schema_length)
        .with_null_values(Some(NullValues::AllColumnsSingle(MISSING_SENTINEL.into())))
        .finish()
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?
        .collect()
        .with_context(|| format!("Failed to load CSV file: {}", path.display()))?;

    Ok(df)
}

/// Count missing values per column, sorted descending by count.
///
/// This is the raw-data missing report printed before imputation.
pub fn missing_value_counts(df: &DataFrame) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = df
        .get_columns()
        .iter()
        .map(|col| (col.name().to_string(), col.null_count()))
        .collect();

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Display initial statistics about the dataset
pub fn display_dataset_stats(df: &DataFrame) {
    let (rows, cols) = df.shape();

    println!("\n    📊 Dataset Statistics:");
    println!("      Rows: {}", rows);
    println!("      Columns: {}", cols);

    let memory_bytes: usize = df.estimated_size();
    let memory_mb = memory_bytes as f64 / (1024.0 * 1024.0);
    println!("      Estimated memory: {:.2} MB", memory_mb);
}
