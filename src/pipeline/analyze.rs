//! Analysis stage: Pearson correlation against the target and one-way ANOVA
//! across drive-wheel groups.
//!
//! Both statistics are diagnostic only. The feature set fed to the models is
//! fixed by hand from these numbers, not selected programmatically.

use anyhow::{anyhow, Result};
use polars::prelude::*;
use rayon::prelude::*;
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, FisherSnedecor, StudentsT};

use super::error::PipelineError;
use super::model::numeric_values;

/// Candidate features inspected against the target.
pub const CORRELATION_FEATURES: [&str; 9] = [
    "wheel-base",
    "horsepower",
    "length",
    "width",
    "curb-weight",
    "engine-size",
    "bore",
    "city-mpg",
    "highway-mpg",
];

/// Categorical column partitioned for the ANOVA.
pub const ANOVA_COLUMN: &str = "drive-wheels";

/// The three drive-wheel groups compared by the ANOVA.
pub const ANOVA_GROUPS: [&str; 3] = ["fwd", "rwd", "4wd"];

/// Pearson correlation of one feature against the target.
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationResult {
    pub feature: String,
    pub coefficient: f64,
    pub p_value: f64,
}

/// One-way ANOVA outcome.
#[derive(Debug, Clone, Serialize)]
pub struct AnovaResult {
    pub f_statistic: f64,
    pub p_value: f64,
}

/// Compute Pearson r and its two-tailed p-value for each (feature, target)
/// pair. Features are scanned in parallel; result order follows the input
/// feature list.
pub fn correlation_scan(
    df: &DataFrame,
    features: &[&str],
    target: &str,
) -> Result<Vec<CorrelationResult>> {
    let y = numeric_values(df, target)?;

    features
        .par_iter()
        .map(|&name| {
            let x = numeric_values(df, name)?;
            let (coefficient, p_value) = pearson_with_p_value(&x, &y)?;
            Ok(CorrelationResult {
                feature: name.to_string(),
                coefficient,
                p_value,
            })
        })
        .collect()
}

/// Pearson correlation coefficient with its two-tailed p-value under the null
/// hypothesis of no linear correlation.
///
/// The p-value comes from the Student-t transform
/// `t = r * sqrt((n - 2) / (1 - r^2))` with n - 2 degrees of freedom.
pub fn pearson_with_p_value(x: &[f64], y: &[f64]) -> Result<(f64, f64)> {
    let n = x.len();
    if n != y.len() || n < 3 {
        return Err(PipelineError::TooFewRows {
            what: "Pearson correlation",
            needed: 3,
            got: n.min(y.len()),
        }
        .into());
    }

    // Single-pass Welford accumulation for numerical stability.
    let mut mean_x = 0.0;
    let mut mean_y = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    let mut cov_xy = 0.0;

    for (i, (&xv, &yv)) in x.iter().zip(y.iter()).enumerate() {
        let k = (i + 1) as f64;
        let dx = xv - mean_x;
        let dy = yv - mean_y;
        mean_x += dx / k;
        mean_y += dy / k;
        var_x += dx * (xv - mean_x);
        var_y += dy * (yv - mean_y);
        cov_xy += dx * (yv - mean_y);
    }

    let nf = n as f64;
    let std_x = (var_x / nf).sqrt();
    let std_y = (var_y / nf).sqrt();
    if std_x == 0.0 || std_y == 0.0 {
        return Err(anyhow!("Pearson correlation undefined for a constant column"));
    }

    let r = (cov_xy / (nf * std_x * std_y)).clamp(-1.0, 1.0);

    let dof = (n - 2) as f64;
    let denom = 1.0 - r * r;
    let p_value = if denom <= f64::EPSILON {
        0.0
    } else {
        let t = r * (dof / denom).sqrt();
        let dist = StudentsT::new(0.0, 1.0, dof)
            .map_err(|e| anyhow!("invalid t-distribution (df = {}): {}", dof, e))?;
        2.0 * (1.0 - dist.cdf(t.abs()))
    };

    Ok((r, p_value))
}

/// Partition rows by the named groups of a categorical column and compare
/// target means with a one-way ANOVA.
///
/// A named group with no rows is a fatal error; no existence check happens
/// before the partition.
pub fn one_way_anova(
    df: &DataFrame,
    group_column: &str,
    groups: &[&str],
    target: &str,
) -> Result<AnovaResult> {
    if df.column(group_column).is_err() {
        return Err(PipelineError::MissingColumn(group_column.to_string()).into());
    }

    let mut samples = Vec::with_capacity(groups.len());
    for &group in groups {
        let filtered = df
            .clone()
            .lazy()
            .filter(col(group_column).eq(lit(group)))
            .select([col(target)])
            .collect()?;

        if filtered.height() == 0 {
            return Err(PipelineError::EmptyGroup {
                column: group_column.to_string(),
                group: group.to_string(),
            }
            .into());
        }
        samples.push(numeric_values(&filtered, target)?);
    }

    anova_f_statistic(&samples)
}

/// F statistic and p-value from between/within group sums of squares.
fn anova_f_statistic(groups: &[Vec<f64>]) -> Result<AnovaResult> {
    let k = groups.len();
    let n: usize = groups.iter().map(Vec::len).sum();
    if k < 2 || n <= k {
        return Err(PipelineError::TooFewRows {
            what: "one-way ANOVA",
            needed: k + 1,
            got: n,
        }
        .into());
    }

    let grand_mean = groups.iter().flatten().sum::<f64>() / n as f64;

    let mut ss_between = 0.0;
    let mut ss_within = 0.0;
    for group in groups {
        let mean = group.iter().sum::<f64>() / group.len() as f64;
        ss_between += group.len() as f64 * (mean - grand_mean).powi(2);
        ss_within += group.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
    }

    let df_between = (k - 1) as f64;
    let df_within = (n - k) as f64;
    let f_statistic = (ss_between / df_between) / (ss_within / df_within);

    let p_value = if f_statistic.is_finite() {
        let dist = FisherSnedecor::new(df_between, df_within)
            .map_err(|e| anyhow!("invalid F-distribution: {}", e))?;
        1.0 - dist.cdf(f_statistic)
    } else {
        // Zero within-group variance: the group means differ exactly.
        0.0
    };

    Ok(AnovaResult {
        f_statistic,
        p_value,
    })
}
