//! # Forecast Price
//!
//! A Rust library for forecasting a univariate price series with a
//! leakage-free, cross-validated fitting procedure.
//!
//! ## Pipeline
//!
//! 1. Load and validate a `Date,Price` CSV into an ordered [`PriceSeries`]
//! 2. Encode each date as an ordinal-day regression feature
//! 3. Split the samples into walk-forward (expanding-window) folds
//! 4. Grid-search SVR hyperparameters by mean cross-validated MSE
//! 5. Refit the winner on the full series and extrapolate the horizon
//!
//! ## Quick Start
//!
//! ```rust
//! use forecast_price::{run, ForecastRequest};
//!
//! // Forecast 7 days past the bundled default dataset.
//! let outcome = run(&ForecastRequest::new(7))?;
//!
//! assert_eq!(outcome.forecast.len(), 7);
//! println!("cross-validated RMSE: {:.2}", outcome.cv_rmse);
//! for row in &outcome.forecast {
//!     println!("{}: {:.2}", row.date, row.predicted_price);
//! }
//! # Ok::<(), forecast_price::ForecastError>(())
//! ```
//!
//! Every run recomputes everything from its input; no model or score is
//! cached across runs.

pub mod data;
pub mod error;
pub mod features;
pub mod forecast;
pub mod pipeline;
pub mod search;
pub mod split;
pub mod svr;

// Re-export commonly used types
pub use crate::data::{PricePoint, PriceSeries};
pub use crate::error::{ForecastError, Result};
pub use crate::features::{encode_date, encode_series, EncodedSample};
pub use crate::forecast::{forecast, ForecastRow, MAX_HORIZON};
pub use crate::pipeline::{run, ForecastOutcome, ForecastRequest};
pub use crate::search::{grid_search, SearchResult, SvrGrid};
pub use crate::split::{walk_forward_folds, Fold, DEFAULT_FOLDS};
pub use crate::svr::{FittedSvr, Kernel, SvrConfig};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
