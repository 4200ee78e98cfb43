//! Cross-validated hyperparameter grid search

use crate::error::{ForecastError, Result};
use crate::features::EncodedSample;
use crate::split::Fold;
use crate::svr::{self, FittedSvr, Kernel, SvrConfig};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Candidate values for each hyperparameter knob.
///
/// The grid is the Cartesian product of the three lists, iterated
/// c-major (then gamma, then kernel). The default mirrors the classic
/// SVR search: C in {1, 10, 100}, gamma in {0.001, 0.01, 0.1}, RBF only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SvrGrid {
    pub c: Vec<f64>,
    pub gamma: Vec<f64>,
    pub kernel: Vec<Kernel>,
}

impl Default for SvrGrid {
    fn default() -> Self {
        Self {
            c: vec![1.0, 10.0, 100.0],
            gamma: vec![0.001, 0.01, 0.1],
            kernel: vec![Kernel::Rbf],
        }
    }
}

impl SvrGrid {
    /// Expand the grid into concrete configurations, in iteration order.
    ///
    /// Fails with `EmptyGrid` when any candidate list is empty and with
    /// `InvalidParameter` when a candidate value is out of domain.
    pub fn configs(&self) -> Result<Vec<SvrConfig>> {
        let mut configs = Vec::with_capacity(self.c.len() * self.gamma.len() * self.kernel.len());
        for &c in &self.c {
            for &gamma in &self.gamma {
                for &kernel in &self.kernel {
                    configs.push(SvrConfig::new(c, gamma, kernel)?);
                }
            }
        }
        if configs.is_empty() {
            return Err(ForecastError::EmptyGrid);
        }
        Ok(configs)
    }
}

/// Outcome of a grid search: the winning configuration and its scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    /// The minimum-mean-error configuration.
    pub best_config: SvrConfig,
    /// Mean squared error of `best_config`, averaged over its folds.
    pub best_score: f64,
    /// Per-fold MSE of `best_config`, in fold order (failed folds omitted).
    pub per_fold_scores: Vec<f64>,
}

/// Evaluate every (config, fold) pair and select the best configuration.
///
/// Pairs are independent, so they are evaluated in parallel; results are
/// merged back by pair identity before aggregation, which keeps the
/// outcome identical to a sequential run. A configuration that fails to
/// fit on one fold is excluded from that fold only; one that fails on
/// every fold is discarded. Ties on mean error go to the configuration
/// seen first in grid order.
pub fn grid_search(
    samples: &[EncodedSample],
    grid: &SvrGrid,
    folds: &[Fold],
) -> Result<SearchResult> {
    let configs = grid.configs()?;
    if folds.is_empty() {
        return Err(ForecastError::InsufficientData(
            "no folds supplied to grid search".to_string(),
        ));
    }

    let pairs: Vec<(usize, usize)> = (0..configs.len())
        .flat_map(|c| (0..folds.len()).map(move |f| (c, f)))
        .collect();

    debug!(
        configs = configs.len(),
        folds = folds.len(),
        pairs = pairs.len(),
        "evaluating hyperparameter grid"
    );

    // Each evaluation reads only its own slice of the samples; a failed
    // fit is recorded as None rather than aborting the search.
    let scored: Vec<((usize, usize), Option<f64>)> = pairs
        .par_iter()
        .map(|&(config_idx, fold_idx)| {
            let fold = &folds[fold_idx];
            let score = evaluate_fold(&configs[config_idx], samples, fold);
            ((config_idx, fold_idx), score)
        })
        .collect();

    // Merge by (config, fold) identity; rayon's collect preserves the
    // submission order, so fold order within a config is stable.
    let mut fold_scores: Vec<Vec<f64>> = vec![Vec::new(); configs.len()];
    for ((config_idx, _), score) in scored {
        if let Some(mse) = score {
            fold_scores[config_idx].push(mse);
        }
    }

    let mut best: Option<(usize, f64)> = None;
    for (config_idx, scores) in fold_scores.iter().enumerate() {
        if scores.is_empty() {
            continue;
        }
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        match best {
            Some((_, best_mean)) if mean >= best_mean => {}
            _ => best = Some((config_idx, mean)),
        }
    }

    let (best_idx, best_score) = best.ok_or(ForecastError::AllConfigsFailed)?;

    debug!(
        config = ?configs[best_idx],
        score = best_score,
        "selected best configuration"
    );

    Ok(SearchResult {
        best_config: configs[best_idx],
        best_score,
        per_fold_scores: fold_scores[best_idx].clone(),
    })
}

/// Fit on the fold's training block, score MSE on its validation block.
/// Returns None when the fit fails or the score is not finite.
fn evaluate_fold(config: &SvrConfig, samples: &[EncodedSample], fold: &Fold) -> Option<f64> {
    let model = svr::fit(config, &samples[fold.train.clone()]).ok()?;
    let mse = mean_squared_error(&model, &samples[fold.validation.clone()]);
    mse.is_finite().then_some(mse)
}

fn mean_squared_error(model: &FittedSvr, samples: &[EncodedSample]) -> f64 {
    let sum: f64 = samples
        .iter()
        .map(|s| {
            let err = model.predict(s.feature) - s.target;
            err * err
        })
        .sum();
    sum / samples.len() as f64
}
