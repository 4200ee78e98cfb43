//! Feature encoding for regression on calendar dates

use crate::data::PriceSeries;
use chrono::{Datelike, NaiveDate};

/// One regression sample: an encoded date feature and the observed price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncodedSample {
    pub feature: f64,
    pub target: f64,
}

/// Encode a date as its ordinal day count (days since 0001-01-01).
///
/// The transform is strictly monotonic in the date, so feature order
/// always equals chronological order. The splitter and the forecaster both
/// rely on this.
pub fn encode_date(date: NaiveDate) -> f64 {
    f64::from(date.num_days_from_ce())
}

/// Encode every observation of a series, one sample per point.
pub fn encode_series(series: &PriceSeries) -> Vec<EncodedSample> {
    series
        .points()
        .iter()
        .map(|p| EncodedSample {
            feature: encode_date(p.date),
            target: p.price,
        })
        .collect()
}
