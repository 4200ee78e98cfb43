//! Walk-forward (expanding-window) cross-validation splits

use crate::error::{ForecastError, Result};
use std::ops::Range;

/// Default number of folds.
pub const DEFAULT_FOLDS: usize = 5;

/// One train/validation split over sample indices.
///
/// Both ranges are contiguous and `train.end == validation.start`, so every
/// training index strictly precedes every validation index: validating a
/// fold never sees future data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fold {
    pub train: Range<usize>,
    pub validation: Range<usize>,
}

/// Produce `k` expanding-window folds over `n_samples` ordered samples.
///
/// The validation block size is `n_samples / (k + 1)`; fold `i` validates
/// the block starting at `(i + 1) * size` and trains on everything before
/// it, so later folds train on strictly more history. The last fold's
/// block extends to the end of the series, absorbing the division
/// remainder.
///
/// Fails with `InsufficientData` when the block size works out to zero,
/// i.e. when `n_samples < k + 1` (each fold needs at least one training
/// and one validation sample).
pub fn walk_forward_folds(n_samples: usize, k: usize) -> Result<Vec<Fold>> {
    if k == 0 {
        return Err(ForecastError::InvalidParameter(
            "fold count must be positive".to_string(),
        ));
    }

    let block = n_samples / (k + 1);
    if block == 0 {
        return Err(ForecastError::InsufficientData(format!(
            "{} samples cannot form {} walk-forward folds (need at least {})",
            n_samples,
            k,
            k + 1
        )));
    }

    let mut folds = Vec::with_capacity(k);
    for i in 0..k {
        let start = (i + 1) * block;
        let end = if i == k - 1 { n_samples } else { start + block };
        folds.push(Fold {
            train: 0..start,
            validation: start..end,
        });
    }

    Ok(folds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_respect_chronology() {
        let folds = walk_forward_folds(100, 5).unwrap();
        assert_eq!(folds.len(), 5);

        for fold in &folds {
            assert!(!fold.train.is_empty());
            assert!(!fold.validation.is_empty());
            assert_eq!(fold.train.end, fold.validation.start);
        }

        // Validation blocks move strictly forward; training windows expand.
        for pair in folds.windows(2) {
            assert!(pair[0].validation.end <= pair[1].validation.start);
            assert!(pair[0].train.len() < pair[1].train.len());
        }

        // Every post-warm-up sample is validated exactly once.
        assert_eq!(folds[0].validation.start, folds[0].train.len());
        assert_eq!(folds[folds.len() - 1].validation.end, 100);
    }

    #[test]
    fn last_fold_absorbs_remainder() {
        let folds = walk_forward_folds(13, 3).unwrap();
        // block = 13 / 4 = 3
        assert_eq!(folds[0].validation, 3..6);
        assert_eq!(folds[1].validation, 6..9);
        assert_eq!(folds[2].validation, 9..13);
    }

    #[test]
    fn too_few_samples_is_an_error() {
        let err = walk_forward_folds(3, 5).unwrap_err();
        assert!(matches!(err, ForecastError::InsufficientData(_)));
    }

    #[test]
    fn zero_folds_is_rejected() {
        let err = walk_forward_folds(10, 0).unwrap_err();
        assert!(matches!(err, ForecastError::InvalidParameter(_)));
    }
}
