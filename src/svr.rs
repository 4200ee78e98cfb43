//! Support vector regression over a single date feature

use crate::error::{ForecastError, Result};
use crate::features::EncodedSample;
use serde::{Deserialize, Serialize};

const LEARNING_RATE: f64 = 0.01;
const MAX_ITER: usize = 500;
const TOL: f64 = 1e-3;
/// Width of the epsilon-insensitive tube, in standardized target units.
const EPSILON_TUBE: f64 = 0.1;

/// Kernel family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Kernel {
    /// Radial basis function: K(a, b) = exp(-gamma * (a - b)^2)
    Rbf,
    /// Linear: K(a, b) = a * b
    Linear,
}

impl std::fmt::Display for Kernel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Kernel::Rbf => write!(f, "rbf"),
            Kernel::Linear => write!(f, "linear"),
        }
    }
}

/// One hyperparameter configuration: the closed set of model knobs.
///
/// Validated at construction; an `SvrConfig` in hand is always usable.
/// `gamma` is only consulted by the RBF kernel but is validated for every
/// kernel so a grid can carry a single candidate list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SvrConfig {
    pub c: f64,
    pub gamma: f64,
    pub kernel: Kernel,
}

impl SvrConfig {
    /// Create a configuration, rejecting out-of-domain knob values.
    pub fn new(c: f64, gamma: f64, kernel: Kernel) -> Result<Self> {
        if !c.is_finite() || c <= 0.0 {
            return Err(ForecastError::InvalidParameter(format!(
                "regularization strength C must be positive, got {}",
                c
            )));
        }
        if !gamma.is_finite() || gamma <= 0.0 {
            return Err(ForecastError::InvalidParameter(format!(
                "kernel width gamma must be positive, got {}",
                gamma
            )));
        }
        Ok(Self { c, gamma, kernel })
    }
}

/// A trained regressor: `predict(feature) -> price`.
///
/// Training standardizes both the feature and the target, so the raw date
/// ordinals (hundreds of thousands of days) do not swamp the kernel;
/// predictions are mapped back to price units.
#[derive(Debug, Clone)]
pub struct FittedSvr {
    config: SvrConfig,
    train_features: Vec<f64>,
    coeffs: Vec<f64>,
    bias: f64,
    x_mean: f64,
    x_scale: f64,
    y_mean: f64,
    y_scale: f64,
}

/// Fit an epsilon-insensitive SVR on the given samples.
///
/// The fit is fully deterministic: coordinate updates over a precomputed
/// kernel matrix, no randomness anywhere. Fails with `Fit` when the target
/// has zero variance (degenerate data) or training diverges to non-finite
/// coefficients.
pub fn fit(config: &SvrConfig, samples: &[EncodedSample]) -> Result<FittedSvr> {
    let n = samples.len();
    if n == 0 {
        return Err(ForecastError::Fit("no training samples".to_string()));
    }

    let xs_raw: Vec<f64> = samples.iter().map(|s| s.feature).collect();
    let ys_raw: Vec<f64> = samples.iter().map(|s| s.target).collect();

    let (x_mean, x_std) = mean_std(&xs_raw);
    let (y_mean, y_std) = mean_std(&ys_raw);

    if y_std < 1e-12 {
        return Err(ForecastError::Fit(
            "target has zero variance".to_string(),
        ));
    }
    // A single sample (or duplicate-date-only training block) has no
    // feature spread; leave the feature at zero rather than divide by it.
    let x_scale = if x_std < 1e-12 { 1.0 } else { x_std };

    let xs: Vec<f64> = xs_raw.iter().map(|x| (x - x_mean) / x_scale).collect();
    let ys: Vec<f64> = ys_raw.iter().map(|y| (y - y_mean) / y_std).collect();

    let kernel_matrix = compute_kernel_matrix(config, &xs);

    let mut alphas = vec![0.0_f64; n];
    let mut alphas_star = vec![0.0_f64; n];
    let mut bias = 0.0_f64;

    for _iter in 0..MAX_ITER {
        let mut max_change: f64 = 0.0;

        for i in 0..n {
            let mut pred = bias;
            for j in 0..n {
                pred += (alphas[j] - alphas_star[j]) * kernel_matrix[j * n + i];
            }

            let error = pred - ys[i];

            if error > EPSILON_TUBE {
                let new_val = (alphas_star[i] + LEARNING_RATE).min(config.c);
                max_change = max_change.max((new_val - alphas_star[i]).abs());
                alphas_star[i] = new_val;
            } else if error < -EPSILON_TUBE {
                let new_val = (alphas[i] + LEARNING_RATE).min(config.c);
                max_change = max_change.max((new_val - alphas[i]).abs());
                alphas[i] = new_val;
            }

            let bias_update = LEARNING_RATE * 0.1 * error;
            max_change = max_change.max(bias_update.abs());
            bias -= bias_update;
        }

        if max_change < TOL {
            break;
        }
    }

    let coeffs: Vec<f64> = alphas
        .iter()
        .zip(alphas_star.iter())
        .map(|(a, a_star)| a - a_star)
        .collect();

    if !bias.is_finite() || coeffs.iter().any(|c| !c.is_finite()) {
        return Err(ForecastError::Fit(
            "training diverged to non-finite coefficients".to_string(),
        ));
    }

    Ok(FittedSvr {
        config: *config,
        train_features: xs,
        coeffs,
        bias,
        x_mean,
        x_scale,
        y_mean,
        y_scale: y_std,
    })
}

impl FittedSvr {
    /// Predict the price for an encoded date feature.
    pub fn predict(&self, feature: f64) -> f64 {
        let x = (feature - self.x_mean) / self.x_scale;
        let mut sum = self.bias;
        for (coeff, train_x) in self.coeffs.iter().zip(self.train_features.iter()) {
            sum += coeff * kernel(&self.config, *train_x, x);
        }
        self.y_mean + self.y_scale * sum
    }

    /// The configuration this model was trained with.
    pub fn config(&self) -> &SvrConfig {
        &self.config
    }
}

fn kernel(config: &SvrConfig, a: f64, b: f64) -> f64 {
    match config.kernel {
        Kernel::Rbf => {
            let diff = a - b;
            (-config.gamma * diff * diff).exp()
        }
        Kernel::Linear => a * b,
    }
}

fn compute_kernel_matrix(config: &SvrConfig, xs: &[f64]) -> Vec<f64> {
    let n = xs.len();
    let mut k = vec![0.0_f64; n * n];
    for i in 0..n {
        for j in i..n {
            let val = kernel(config, xs[i], xs[j]);
            k[i * n + j] = val;
            k[j * n + i] = val;
        }
    }
    k
}

fn mean_std(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}
