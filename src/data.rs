//! Price series loading and validation

use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Column names required in the input, matched case-sensitively.
const DATE_COLUMN: &str = "Date";
const PRICE_COLUMN: &str = "Price";

/// The default dataset used when the caller supplies no input.
const BUNDLED_CSV: &str = include_str!("../data/bitcoin.csv");

/// A single observation: a calendar date and the price on that date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

/// An ordered, non-empty series of price observations.
///
/// Points are sorted ascending by date at load time. Duplicate dates are
/// preserved in input order as separate samples; the loader does not
/// deduplicate or average them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Load a series from CSV bytes.
    ///
    /// The input must carry at least the `Date` and `Price` columns;
    /// additional columns are ignored. Rows are sorted ascending by date
    /// with a stable sort.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let date_idx = headers
            .iter()
            .position(|h| h == DATE_COLUMN)
            .ok_or_else(|| {
                ForecastError::Schema(format!("required column '{}' not found", DATE_COLUMN))
            })?;
        let price_idx = headers
            .iter()
            .position(|h| h == PRICE_COLUMN)
            .ok_or_else(|| {
                ForecastError::Schema(format!("required column '{}' not found", PRICE_COLUMN))
            })?;

        let mut points = Vec::new();
        for (i, record) in csv_reader.records().enumerate() {
            let record = record?;
            let row = i + 1;

            let date_cell = record.get(date_idx).ok_or_else(|| ForecastError::Parse {
                row,
                message: format!("missing '{}' cell", DATE_COLUMN),
            })?;
            let date = date_cell
                .parse::<NaiveDate>()
                .map_err(|e| ForecastError::Parse {
                    row,
                    message: format!("invalid date '{}': {}", date_cell, e),
                })?;

            let price_cell = record.get(price_idx).ok_or_else(|| ForecastError::Parse {
                row,
                message: format!("missing '{}' cell", PRICE_COLUMN),
            })?;
            let price = price_cell
                .parse::<f64>()
                .map_err(|e| ForecastError::Parse {
                    row,
                    message: format!("invalid price '{}': {}", price_cell, e),
                })?;
            if !price.is_finite() {
                return Err(ForecastError::Parse {
                    row,
                    message: format!("non-finite price '{}'", price_cell),
                });
            }

            points.push(PricePoint { date, price });
        }

        if points.is_empty() {
            return Err(ForecastError::EmptyDataset);
        }

        // Stable sort keeps duplicate-date rows in input order.
        points.sort_by_key(|p| p.date);

        Ok(Self { points })
    }

    /// Load a series from a CSV file on disk.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_csv_reader(file)
    }

    /// Load the compiled-in default dataset.
    pub fn bundled() -> Result<Self> {
        Self::from_csv_reader(BUNDLED_CSV.as_bytes())
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series is empty. Always false for a loaded series.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All observations, ascending by date.
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// The most recent observed date.
    pub fn last_date(&self) -> NaiveDate {
        self.points[self.points.len() - 1].date
    }

    /// Observation dates, ascending.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    /// Observed prices, ordered by date.
    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }
}
