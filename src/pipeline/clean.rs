//! Cleaning stage: sentinel normalization, imputation, target-row dropping,
//! and dtype coercion.
//!
//! The imputation targets are fixed by the dataset schema: five numeric
//! columns are filled with their column mean, one categorical column with its
//! mode, and rows without a price label are removed entirely.

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::Serialize;

use super::error::PipelineError;
use super::loader::MISSING_SENTINEL;

/// The prediction target.
pub const TARGET_COLUMN: &str = "price";

/// Numeric columns imputed with their column mean.
pub const MEAN_IMPUTED_COLUMNS: [&str; 5] = [
    "normalized-losses",
    "bore",
    "stroke",
    "horsepower",
    "peak-rpm",
];

/// Categorical column imputed with its most frequent value.
pub const MODE_IMPUTED_COLUMN: &str = "num-of-doors";

/// Columns coerced to integers after imputation.
pub const INT_CAST_COLUMNS: [&str; 2] = ["normalized-losses", "horsepower"];

/// Columns coerced to floating point after imputation. The target column is
/// cast alongside these.
pub const FLOAT_CAST_COLUMNS: [&str; 3] = ["bore", "stroke", "peak-rpm"];

/// What the cleaning stage did, for reporting and export.
#[derive(Debug, Clone, Serialize)]
pub struct CleanReport {
    /// (column, imputed mean) for each mean-imputed column.
    pub imputed_means: Vec<(String, f64)>,
    /// The mode substituted into the categorical column.
    pub imputed_mode: String,
    /// Rows removed for lacking a target value.
    pub rows_dropped: usize,
}

/// Run the full cleaning stage and return the cleaned table with a report.
pub fn clean_dataset(df: DataFrame, target: &str) -> Result<(DataFrame, CleanReport)> {
    let df = normalize_missing(df)?;
    let (df, imputed_means) = impute_numeric_mean(df, &MEAN_IMPUTED_COLUMNS)?;
    let (df, imputed_mode) = impute_categorical_mode(df, MODE_IMPUTED_COLUMN)?;
    let (df, rows_dropped) = drop_missing_target(df, target)?;
    let df = cast_column_types(df, target)?;

    Ok((
        df,
        CleanReport {
            imputed_means,
            imputed_mode,
            rows_dropped,
        },
    ))
}

/// Replace the literal `"?"` sentinel with null in every string column.
///
/// The loader already parses the sentinel as null at the CSV level; this pass
/// covers tables built in memory and makes re-cleaning a no-op.
pub fn normalize_missing(df: DataFrame) -> Result<DataFrame> {
    let exprs: Vec<Expr> = df
        .get_columns()
        .iter()
        .filter(|column| column.dtype() == &DataType::String)
        .map(|column| {
            let name = column.name().clone();
            when(col(name.clone()).eq(lit(MISSING_SENTINEL)))
                .then(lit(NULL))
                .otherwise(col(name.clone()))
                .alias(name)
        })
        .collect();

    if exprs.is_empty() {
        return Ok(df);
    }

    df.lazy()
        .with_columns(exprs)
        .collect()
        .context("Failed to normalize missing-value sentinels")
}

/// Replace nulls in each named column with that column's mean.
///
/// The mean is computed over the non-missing values before any substitution,
/// so imputed rows never influence it. Columns are cast to Float64 in the
/// process; the later cast stage restores integer dtypes where required.
pub fn impute_numeric_mean(
    df: DataFrame,
    columns: &[&str],
) -> Result<(DataFrame, Vec<(String, f64)>)> {
    let mut means = Vec::with_capacity(columns.len());
    let mut exprs = Vec::with_capacity(columns.len());

    for &name in columns {
        let column = df
            .column(name)
            .map_err(|_| PipelineError::MissingColumn(name.to_string()))?;
        let mean = column
            .cast(&DataType::Float64)
            .with_context(|| format!("Column '{}' holds non-numeric values", name))?
            .f64()?
            .mean()
            .ok_or(PipelineError::TooFewRows {
                what: "column mean",
                needed: 1,
                got: 0,
            })?;

        means.push((name.to_string(), mean));
        // Strict: non-numeric residue in an imputed column aborts the run.
        exprs.push(
            col(name)
                .strict_cast(DataType::Float64)
                .fill_null(lit(mean))
                .alias(name),
        );
    }

    let df = df
        .lazy()
        .with_columns(exprs)
        .collect()
        .context("Failed to impute numeric columns")?;

    Ok((df, means))
}

/// Replace nulls in a categorical column with its most frequent value.
///
/// Ties break to the value first encountered in row order. This matches no
/// particular contract; it is simply deterministic.
pub fn impute_categorical_mode(df: DataFrame, name: &str) -> Result<(DataFrame, String)> {
    let mode = {
        let column = df
            .column(name)
            .map_err(|_| PipelineError::MissingColumn(name.to_string()))?;
        let ca = column
            .str()
            .with_context(|| format!("Column '{}' is not categorical", name))?;

        // Counts keep first-seen order; strict > keeps the first mode on ties.
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for value in ca.into_iter().flatten() {
            match counts.iter_mut().find(|(v, _)| *v == value) {
                Some((_, n)) => *n += 1,
                None => counts.push((value, 1)),
            }
        }

        counts
            .iter()
            .fold(None::<(&str, usize)>, |best, &(v, n)| match best {
                Some((_, bn)) if bn >= n => best,
                _ => Some((v, n)),
            })
            .ok_or(PipelineError::TooFewRows {
                what: "categorical mode",
                needed: 1,
                got: 0,
            })?
            .0
            .to_string()
    };

    let df = df
        .lazy()
        .with_column(col(name).fill_null(lit(mode.clone())).alias(name))
        .collect()
        .with_context(|| format!("Failed to impute column '{}'", name))?;

    Ok((df, mode))
}

/// Drop rows whose target value is missing and renumber the remainder.
pub fn drop_missing_target(df: DataFrame, target: &str) -> Result<(DataFrame, usize)> {
    if df.column(target).is_err() {
        return Err(PipelineError::MissingColumn(target.to_string()).into());
    }

    let before = df.height();
    let df = df
        .lazy()
        .filter(col(target).is_not_null())
        .collect()
        .with_context(|| format!("Failed to drop rows without '{}'", target))?;
    let dropped = before - df.height();

    Ok((df, dropped))
}

/// Coerce the schema's fixed columns (and the target) to their semantic
/// dtypes.
///
/// Strict casts: any non-numeric residue left in these columns aborts the run.
pub fn cast_column_types(df: DataFrame, target: &str) -> Result<DataFrame> {
    let mut exprs = Vec::with_capacity(INT_CAST_COLUMNS.len() + FLOAT_CAST_COLUMNS.len() + 1);
    for name in INT_CAST_COLUMNS {
        // These columns are Float64 after mean imputation; truncate toward
        // zero rather than round.
        exprs.push(col(name).cast(DataType::Int64));
    }
    for name in FLOAT_CAST_COLUMNS {
        exprs.push(col(name).strict_cast(DataType::Float64));
    }
    exprs.push(col(target).strict_cast(DataType::Float64));

    df.lazy()
        .with_columns(exprs)
        .collect()
        .context("Type coercion failed: non-numeric residue in a numeric column")
}
