//! Multi-step forecast generation

use crate::data::PriceSeries;
use crate::error::{ForecastError, Result};
use crate::features::{encode_date, encode_series};
use crate::svr::{self, SvrConfig};
use chrono::Days;
use serde::Serialize;
use tracing::debug;

/// Largest supported forecast horizon, in calendar days.
pub const MAX_HORIZON: usize = 30;

/// One forecast row: a future date and the predicted price for it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastRow {
    pub date: chrono::NaiveDate,
    pub predicted_price: f64,
}

/// Fit `config` on the whole series and extrapolate `horizon` days ahead.
///
/// Produces exactly `horizon` rows for the consecutive calendar days
/// immediately after the last observed date. Each step is predicted
/// independently through the same date encoding used in training; the
/// model is never retrained between steps and predicted values never feed
/// back into later steps. A failed final fit is fatal: no fallback
/// configuration is tried.
pub fn forecast(
    series: &PriceSeries,
    config: &SvrConfig,
    horizon: usize,
) -> Result<Vec<ForecastRow>> {
    if horizon == 0 || horizon > MAX_HORIZON {
        return Err(ForecastError::InvalidHorizon {
            got: horizon,
            max: MAX_HORIZON,
        });
    }

    let samples = encode_series(series);
    let model = svr::fit(config, &samples)?;

    let last_date = series.last_date();
    debug!(%last_date, horizon, "extrapolating fitted model");

    let mut rows = Vec::with_capacity(horizon);
    for step in 1..=horizon {
        let date = last_date
            .checked_add_days(Days::new(step as u64))
            .ok_or_else(|| {
                ForecastError::InvalidParameter(format!(
                    "forecast date overflows the calendar at step {}",
                    step
                ))
            })?;
        let predicted_price = model.predict(encode_date(date));
        if !predicted_price.is_finite() {
            return Err(ForecastError::Fit(format!(
                "non-finite prediction for {}",
                date
            )));
        }
        rows.push(ForecastRow {
            date,
            predicted_price,
        });
    }

    Ok(rows)
}
