//! Error types for the forecast_price crate

use thiserror::Error;

/// Errors produced by the forecasting pipeline.
///
/// The first four variants are input failures the caller can fix by
/// supplying corrected data; the rest are pipeline-configuration failures.
/// Every stage fails fast with one of these instead of degrading its
/// result.
#[derive(Debug, Error)]
pub enum ForecastError {
    /// A required column is missing from the input
    #[error("schema error: {0}")]
    Schema(String),

    /// A cell could not be converted to its semantic type
    #[error("parse error at data row {row}: {message}")]
    Parse { row: usize, message: String },

    /// The input contained a header but no data rows
    #[error("dataset contains no rows")]
    EmptyDataset,

    /// Too few samples for the requested fold count
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    /// The hyperparameter grid contains no configurations
    #[error("hyperparameter grid is empty")]
    EmptyGrid,

    /// Every configuration failed to fit on every fold
    #[error("all configurations failed to fit on all folds")]
    AllConfigsFailed,

    /// Model training failed
    #[error("fit error: {0}")]
    Fit(String),

    /// Error from invalid parameters
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Requested horizon outside the supported range
    #[error("horizon must be between 1 and {max} days, got {got}")]
    InvalidHorizon { got: usize, max: usize },

    /// Error from IO operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from CSV reading
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;
