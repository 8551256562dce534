//! Evaluation and refinement stage: seeded train/test split, holdout ridge
//! scoring, and grid search with k-fold cross-validation over the ridge
//! penalty.

use anyhow::Result;
use faer::Mat;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;

use super::error::PipelineError;
use super::model::{select_rows, RidgeModel};

/// Candidate regularization strengths for the grid search.
pub const ALPHA_GRID: [f64; 9] = [
    0.001, 0.01, 0.1, 1.0, 10.0, 100.0, 1000.0, 10000.0, 100000.0,
];

/// Split `n_rows` row indices into (train, test) partitions.
///
/// The shuffle is keyed by `seed` alone, so identical seed and fraction give
/// identical partitions across runs. The test partition takes the first
/// `ceil(n * test_fraction)` shuffled indices.
pub fn train_test_split(
    n_rows: usize,
    test_fraction: f64,
    seed: u64,
) -> Result<(Vec<usize>, Vec<usize>)> {
    if !(0.0..1.0).contains(&test_fraction) || test_fraction == 0.0 {
        anyhow::bail!(
            "test fraction must be in (0, 1), got {}",
            test_fraction
        );
    }
    if n_rows < 2 {
        return Err(PipelineError::TooFewRows {
            what: "train/test split",
            needed: 2,
            got: n_rows,
        }
        .into());
    }

    let mut indices: Vec<usize> = (0..n_rows).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let n_test = ((n_rows as f64) * test_fraction).ceil() as usize;
    let test = indices[..n_test].to_vec();
    let train = indices[n_test..].to_vec();

    Ok((train, test))
}

/// Contiguous k-fold partitions of `0..n_rows`, in row order.
///
/// The first `n_rows % k` folds hold one extra row, as in the usual k-fold
/// arrangement. Returns (train, held-out) index pairs.
pub fn kfold_indices(n_rows: usize, k: usize) -> Result<Vec<(Vec<usize>, Vec<usize>)>> {
    if k < 2 || n_rows < k {
        return Err(PipelineError::TooFewRows {
            what: "k-fold cross-validation",
            needed: k.max(2),
            got: n_rows,
        }
        .into());
    }

    let base = n_rows / k;
    let extra = n_rows % k;

    let mut folds = Vec::with_capacity(k);
    let mut start = 0;
    for fold in 0..k {
        let size = base + usize::from(fold < extra);
        let end = start + size;
        let held_out: Vec<usize> = (start..end).collect();
        let train: Vec<usize> = (0..start).chain(end..n_rows).collect();
        folds.push((train, held_out));
        start = end;
    }

    Ok(folds)
}

/// Mean held-out R-squared of a ridge fit at `alpha` across k folds.
pub fn cross_val_score(x: &Mat<f64>, y: &[f64], alpha: f64, k: usize) -> Result<f64> {
    let folds = kfold_indices(x.nrows(), k)?;
    let mut total = 0.0;

    for (train, held_out) in &folds {
        let x_train = select_rows(x, train);
        let y_train: Vec<f64> = train.iter().map(|&i| y[i]).collect();
        let x_val = select_rows(x, held_out);
        let y_val: Vec<f64> = held_out.iter().map(|&i| y[i]).collect();

        let model = RidgeModel::fit(&x_train, &y_train, alpha)?;
        total += model.score(&x_val, &y_val);
    }

    Ok(total / folds.len() as f64)
}

/// One grid-search candidate with its cross-validated score.
#[derive(Debug, Clone, Serialize)]
pub struct AlphaScore {
    pub alpha: f64,
    pub mean_cv_r_squared: f64,
}

/// Outcome of the grid search: the scored candidates and the winner.
#[derive(Debug, Clone, Serialize)]
pub struct GridSearchResult {
    pub scores: Vec<AlphaScore>,
    pub best_alpha: f64,
}

/// Exhaustive search over `alphas`, scoring each by k-fold cross-validation
/// on the full dataset and keeping the candidate with the greatest mean
/// held-out R-squared (ties keep the earlier, smaller candidate).
pub fn grid_search_ridge(
    x: &Mat<f64>,
    y: &[f64],
    alphas: &[f64],
    k: usize,
) -> Result<GridSearchResult> {
    if alphas.is_empty() {
        anyhow::bail!("grid search needs at least one candidate alpha");
    }

    let mut scores = Vec::with_capacity(alphas.len());
    for &alpha in alphas {
        let mean_cv_r_squared = cross_val_score(x, y, alpha, k)?;
        scores.push(AlphaScore {
            alpha,
            mean_cv_r_squared,
        });
    }

    let best_alpha = scores
        .iter()
        .fold(None::<&AlphaScore>, |best, candidate| match best {
            Some(b) if b.mean_cv_r_squared >= candidate.mean_cv_r_squared => best,
            _ => Some(candidate),
        })
        .map(|s| s.alpha)
        .unwrap_or(alphas[0]);

    Ok(GridSearchResult { scores, best_alpha })
}
