//! One-shot forecasting pipeline

use crate::data::PriceSeries;
use crate::error::{ForecastError, Result};
use crate::features::encode_series;
use crate::forecast::{self, ForecastRow, MAX_HORIZON};
use crate::search::{self, SearchResult, SvrGrid};
use crate::split::{walk_forward_folds, DEFAULT_FOLDS};
use serde::Serialize;
use tracing::info;

/// Everything a single run needs.
///
/// `csv` carries the raw input bytes when the caller supplies their own
/// dataset; when absent, the bundled default dataset is used.
#[derive(Debug, Clone)]
pub struct ForecastRequest {
    pub horizon_days: usize,
    pub csv: Option<Vec<u8>>,
    pub grid: SvrGrid,
    pub folds: usize,
}

impl ForecastRequest {
    /// A request with the default grid and fold count.
    pub fn new(horizon_days: usize) -> Self {
        Self {
            horizon_days,
            csv: None,
            grid: SvrGrid::default(),
            folds: DEFAULT_FOLDS,
        }
    }

    /// Use the given CSV bytes instead of the bundled dataset.
    pub fn with_csv(mut self, csv: Vec<u8>) -> Self {
        self.csv = Some(csv);
        self
    }

    /// Override the hyperparameter grid.
    pub fn with_grid(mut self, grid: SvrGrid) -> Self {
        self.grid = grid;
        self
    }

    /// Override the fold count.
    pub fn with_folds(mut self, folds: usize) -> Self {
        self.folds = folds;
        self
    }
}

/// The full output surface of one run, handed to presentation collaborators.
#[derive(Debug, Clone, Serialize)]
pub struct ForecastOutcome {
    /// The validated historical series, for charting.
    pub series: PriceSeries,
    /// The winning configuration and its cross-validated scores.
    pub search: SearchResult,
    /// Root of the cross-validated MSE, in price units.
    pub cv_rmse: f64,
    /// One row per requested horizon day.
    pub forecast: Vec<ForecastRow>,
}

/// Run the whole pipeline: load, encode, split, search, refit, forecast.
///
/// Every run recomputes from scratch; nothing is cached across runs. The
/// run aborts at the first failing stage and surfaces no partial results.
pub fn run(request: &ForecastRequest) -> Result<ForecastOutcome> {
    // Reject an out-of-range horizon before any loading or fitting.
    if request.horizon_days == 0 || request.horizon_days > MAX_HORIZON {
        return Err(ForecastError::InvalidHorizon {
            got: request.horizon_days,
            max: MAX_HORIZON,
        });
    }

    let series = match &request.csv {
        Some(bytes) => PriceSeries::from_csv_reader(bytes.as_slice())?,
        None => PriceSeries::bundled()?,
    };
    info!(rows = series.len(), "loaded price series");

    let samples = encode_series(&series);
    let folds = walk_forward_folds(samples.len(), request.folds)?;
    let search = search::grid_search(&samples, &request.grid, &folds)?;
    info!(
        config = ?search.best_config,
        cv_mse = search.best_score,
        "cross-validation complete"
    );

    let rows = forecast::forecast(&series, &search.best_config, request.horizon_days)?;
    let cv_rmse = search.best_score.sqrt();

    Ok(ForecastOutcome {
        series,
        search,
        cv_rmse,
        forecast: rows,
    })
}
