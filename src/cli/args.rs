//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

/// Autoprice - exploratory analysis and regression modeling of automobile prices
#[derive(Parser, Debug)]
#[command(name = "autoprice")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input CSV file path. Missing values must be encoded as "?".
    #[arg(short, long)]
    pub input: PathBuf,

    /// Target column to predict
    #[arg(short, long, default_value = "price")]
    pub target: String,

    /// Fraction of rows held out as the test partition
    #[arg(long, default_value = "0.45", value_parser = validate_fraction)]
    pub test_fraction: f64,

    /// Seed for the train/test shuffle (same seed, same partitions)
    #[arg(long, default_value = "0")]
    pub seed: u64,

    /// Degree of the polynomial basis expansion
    #[arg(long, default_value = "2")]
    pub degree: usize,

    /// L2 penalty of the fixed-alpha ridge experiment
    #[arg(long, default_value = "0.1")]
    pub alpha: f64,

    /// Number of folds for the grid-search cross-validation
    #[arg(long, default_value = "4")]
    pub cv_folds: usize,

    /// Number of rows to use for schema inference.
    /// Use 0 for a full table scan (slow for large files).
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,

    /// Export the full run report (metrics, correlations, tuning) as JSON
    #[arg(long)]
    pub export: Option<PathBuf>,
}

/// Validator for the test_fraction parameter
fn validate_fraction(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if value <= 0.0 || value >= 1.0 {
        Err(format!(
            "test_fraction must be strictly between 0.0 and 1.0, got {}",
            value
        ))
    } else {
        Ok(value)
    }
}
