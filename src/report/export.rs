//! JSON export of the full run report

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{
    AnovaResult, CleanReport, CorrelationResult, GridSearchResult, Metrics,
};

/// Metadata about the analysis run
#[derive(Serialize)]
pub struct ReportMetadata {
    /// Timestamp of the run (ISO 8601 format)
    pub timestamp: String,
    /// Autoprice version
    pub autoprice_version: String,
    /// Input file path
    pub input_file: String,
    /// Target column name
    pub target_column: String,
    /// Seed of the train/test shuffle
    pub seed: u64,
    /// Fraction of rows held out as test data
    pub test_fraction: f64,
    /// Polynomial expansion degree
    pub degree: usize,
    /// Folds used by the grid-search cross-validation
    pub cv_folds: usize,
}

/// Metrics of one fitted model, with a few sample predictions
#[derive(Serialize)]
pub struct ModelEntry {
    pub name: String,
    #[serde(flatten)]
    pub metrics: Metrics,
    pub sample_predicted: Vec<f64>,
    pub sample_actual: Vec<f64>,
}

/// Holdout evaluation of the fixed-alpha ridge
#[derive(Serialize)]
pub struct HoldoutEntry {
    pub alpha: f64,
    pub test_r_squared: f64,
    pub sample_predicted: Vec<f64>,
    pub sample_actual: Vec<f64>,
}

/// Complete run report serialized by `--export`
#[derive(Serialize)]
pub struct RunReport {
    pub metadata: ReportMetadata,
    /// Per-column missing-value counts in the raw data
    pub missing_counts: Vec<(String, usize)>,
    pub cleaning: CleanReport,
    pub correlations: Vec<CorrelationResult>,
    pub anova: AnovaResult,
    pub models: Vec<ModelEntry>,
    pub holdout: HoldoutEntry,
    pub grid_search: GridSearchResult,
    /// Test-partition R-squared of the grid-search winner
    pub best_alpha_test_r_squared: f64,
}

impl RunReport {
    /// Build the metadata block with the current timestamp.
    pub fn metadata(
        input: &Path,
        target: &str,
        seed: u64,
        test_fraction: f64,
        degree: usize,
        cv_folds: usize,
    ) -> ReportMetadata {
        ReportMetadata {
            timestamp: Utc::now().to_rfc3339(),
            autoprice_version: env!("CARGO_PKG_VERSION").to_string(),
            input_file: input.display().to_string(),
            target_column: target.to_string(),
            seed,
            test_fraction,
            degree,
            cv_folds,
        }
    }

    /// Write the report as pretty-printed JSON.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create export file: {}", path.display()))?;
        serde_json::to_writer_pretty(file, self)
            .with_context(|| format!("Failed to write export file: {}", path.display()))?;
        Ok(())
    }
}
