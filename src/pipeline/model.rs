//! Model development stage: design-matrix assembly, polynomial expansion, and
//! the OLS / ridge fits with their R-squared and MSE metrics.
//!
//! The numerics are delegated to faer: QR least squares for OLS, Cholesky on
//! the penalized normal equations for ridge. Both fits are deterministic.

use anyhow::{Context, Result};
use faer::prelude::*;
use faer::{Mat, Side};
use polars::prelude::*;
use serde::Serialize;

use super::error::PipelineError;

/// Feature of the simple one-variable regression.
pub const SIMPLE_FEATURE: &str = "horsepower";

/// Features of the multiple regression.
pub const MULTIPLE_FEATURES: [&str; 4] =
    ["horsepower", "curb-weight", "engine-size", "highway-mpg"];

/// Features expanded for the ridge and tuning experiments.
pub const TUNING_FEATURES: [&str; 6] = [
    "horsepower",
    "curb-weight",
    "engine-size",
    "highway-mpg",
    "wheel-base",
    "bore",
];

/// Degree of the polynomial basis expansion.
pub const POLY_DEGREE: usize = 2;

/// L2 penalty of the fixed-alpha ridge experiment.
pub const RIDGE_ALPHA: f64 = 0.1;

/// Fit-quality metric pair, computed post hoc from predictions and truth.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Metrics {
    pub r_squared: f64,
    pub mse: f64,
}

impl Metrics {
    /// Compute R-squared and mean squared error for predictions vs truth.
    pub fn compute(y_true: &[f64], y_pred: &[f64]) -> Self {
        let n = y_true.len() as f64;
        let mean = y_true.iter().sum::<f64>() / n;

        let ss_res: f64 = y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(t, p)| (t - p).powi(2))
            .sum();
        let ss_tot: f64 = y_true.iter().map(|t| (t - mean).powi(2)).sum();

        Metrics {
            r_squared: 1.0 - ss_res / ss_tot,
            mse: ss_res / n,
        }
    }
}

/// Extract a column as a dense f64 vector.
///
/// Any null left in the column at this point is a cleaning bug, so it is a
/// fatal error rather than a skip.
pub fn numeric_values(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let column = df
        .column(name)
        .map_err(|_| PipelineError::MissingColumn(name.to_string()))?;
    let casted = column
        .cast(&DataType::Float64)
        .with_context(|| format!("Column '{}' is not numeric", name))?;
    let ca = casted.f64()?;

    let nulls = ca.null_count();
    if nulls > 0 {
        return Err(PipelineError::NullsInColumn {
            column: name.to_string(),
            nulls,
        }
        .into());
    }

    Ok(ca.into_no_null_iter().collect())
}

/// Assemble a row-major design matrix from the named columns.
pub fn feature_matrix(df: &DataFrame, columns: &[&str]) -> Result<Mat<f64>> {
    let mut extracted = Vec::with_capacity(columns.len());
    for &name in columns {
        extracted.push(numeric_values(df, name)?);
    }

    let nrows = df.height();
    Ok(Mat::from_fn(nrows, columns.len(), |i, j| extracted[j][i]))
}

/// Extract the target column as a vector.
pub fn target_vector(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    numeric_values(df, name)
}

/// Select the given rows of a matrix, in order.
pub fn select_rows(x: &Mat<f64>, rows: &[usize]) -> Mat<f64> {
    Mat::from_fn(rows.len(), x.ncols(), |i, j| x[(rows[i], j)])
}

/// Expand features to a full polynomial basis of the given degree: all
/// monomials of total degree 1..=degree, cross terms included. For one
/// feature and degree 2 the columns are `[x, x^2]`; for six features and
/// degree 2 there are 27 columns. The constant term is carried by the model
/// intercept, not a bias column.
///
/// The expansion is stateless, so expanding two partitions independently is
/// identical to expanding their concatenation and splitting afterwards.
pub fn polynomial_features(x: &Mat<f64>, degree: usize) -> Mat<f64> {
    let n_features = x.ncols();
    let terms = monomial_exponents(n_features, degree);

    Mat::from_fn(x.nrows(), terms.len(), |i, t| {
        terms[t]
            .iter()
            .enumerate()
            .map(|(j, &e)| x[(i, j)].powi(e as i32))
            .product()
    })
}

/// Exponent tuples for all monomials of total degree 1..=degree, ordered by
/// degree then lexicographically by feature index.
fn monomial_exponents(n_features: usize, degree: usize) -> Vec<Vec<usize>> {
    let mut terms = Vec::new();
    let mut combo = Vec::new();
    for d in 1..=degree {
        combinations_with_replacement(n_features, d, 0, &mut combo, &mut terms);
    }
    terms
        .into_iter()
        .map(|indices: Vec<usize>| {
            let mut exponents = vec![0usize; n_features];
            for idx in indices {
                exponents[idx] += 1;
            }
            exponents
        })
        .collect()
}

fn combinations_with_replacement(
    n: usize,
    depth: usize,
    start: usize,
    combo: &mut Vec<usize>,
    out: &mut Vec<Vec<usize>>,
) {
    if depth == 0 {
        out.push(combo.clone());
        return;
    }
    for i in start..n {
        combo.push(i);
        combinations_with_replacement(n, depth - 1, i, combo, out);
        combo.pop();
    }
}

/// Ordinary least squares with an intercept.
///
/// Immutable once fit; refitting builds a fresh model.
#[derive(Debug, Clone)]
pub struct LinearModel {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl LinearModel {
    /// Fit by QR least squares on the intercept-augmented design matrix.
    pub fn fit(x: &Mat<f64>, y: &[f64]) -> Result<Self> {
        let n = x.nrows();
        let p = x.ncols();
        if n != y.len() || n <= p {
            return Err(PipelineError::TooFewRows {
                what: "least-squares fit",
                needed: p + 1,
                got: n.min(y.len()),
            }
            .into());
        }

        let augmented = Mat::from_fn(n, p + 1, |i, j| if j == 0 { 1.0 } else { x[(i, j - 1)] });
        let rhs = Mat::from_fn(n, 1, |i, _| y[i]);

        let beta = augmented.qr().solve_lstsq(&rhs);

        Ok(LinearModel {
            intercept: beta[(0, 0)],
            coefficients: (1..=p).map(|j| beta[(j, 0)]).collect(),
        })
    }

    pub fn predict(&self, x: &Mat<f64>) -> Vec<f64> {
        (0..x.nrows())
            .map(|i| {
                self.intercept
                    + self
                        .coefficients
                        .iter()
                        .enumerate()
                        .map(|(j, c)| c * x[(i, j)])
                        .sum::<f64>()
            })
            .collect()
    }
}

/// Ridge regression: OLS with an L2 penalty of strength `alpha` on the
/// coefficients. The intercept is not penalized; features and target are
/// centered before the solve and the intercept recovered from the means.
#[derive(Debug, Clone)]
pub struct RidgeModel {
    pub alpha: f64,
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl RidgeModel {
    /// Fit by Cholesky on the penalized normal equations
    /// `(Xc^T Xc + alpha I) w = Xc^T yc`.
    pub fn fit(x: &Mat<f64>, y: &[f64], alpha: f64) -> Result<Self> {
        let n = x.nrows();
        let p = x.ncols();
        if n != y.len() || n < 2 {
            return Err(PipelineError::TooFewRows {
                what: "ridge fit",
                needed: 2,
                got: n.min(y.len()),
            }
            .into());
        }

        let col_means: Vec<f64> =
            (0..p).map(|j| (0..n).map(|i| x[(i, j)]).sum::<f64>() / n as f64).collect();
        let y_mean = y.iter().sum::<f64>() / n as f64;

        let centered = Mat::from_fn(n, p, |i, j| x[(i, j)] - col_means[j]);
        let yc = Mat::from_fn(n, 1, |i, _| y[i] - y_mean);

        let mut gram = centered.transpose() * &centered;
        for j in 0..p {
            gram[(j, j)] += alpha;
        }
        let rhs = centered.transpose() * &yc;

        let chol = gram
            .cholesky(Side::Lower)
            .map_err(|_| PipelineError::SingularSystem { alpha })?;
        let w = chol.solve(&rhs);

        let coefficients: Vec<f64> = (0..p).map(|j| w[(j, 0)]).collect();
        let intercept = y_mean
            - coefficients
                .iter()
                .zip(col_means.iter())
                .map(|(c, m)| c * m)
                .sum::<f64>();

        Ok(RidgeModel {
            alpha,
            intercept,
            coefficients,
        })
    }

    pub fn predict(&self, x: &Mat<f64>) -> Vec<f64> {
        (0..x.nrows())
            .map(|i| {
                self.intercept
                    + self
                        .coefficients
                        .iter()
                        .enumerate()
                        .map(|(j, c)| c * x[(i, j)])
                        .sum::<f64>()
            })
            .collect()
    }

    /// R-squared of this model's predictions on the given data.
    pub fn score(&self, x: &Mat<f64>, y: &[f64]) -> f64 {
        Metrics::compute(y, &self.predict(x)).r_squared
    }
}
