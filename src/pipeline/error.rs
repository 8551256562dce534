//! Error types for the analysis pipeline.
//!
//! Every variant is terminal: the pipeline performs no retry or partial-result
//! recovery, so errors bubble up through `anyhow` and abort the run.

use thiserror::Error;

/// Errors raised while cleaning, analyzing, or modeling the dataset.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A column named in the fixed schema is absent from the dataset.
    #[error("column '{0}' not found in dataset")]
    MissingColumn(String),

    /// A column still holds nulls where the design matrix requires values.
    #[error("column '{column}' holds {nulls} null value(s) after cleaning")]
    NullsInColumn { column: String, nulls: usize },

    /// A categorical group named in the ANOVA has no rows.
    #[error("group '{group}' of column '{column}' has no rows")]
    EmptyGroup { column: String, group: String },

    /// Not enough rows for the requested statistic.
    #[error("need at least {needed} rows for {what}, got {got}")]
    TooFewRows {
        what: &'static str,
        needed: usize,
        got: usize,
    },

    /// The normal-equations system could not be factorized.
    #[error("ridge system is not positive definite (alpha = {alpha})")]
    SingularSystem { alpha: f64 },
}
