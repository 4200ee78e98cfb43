use forecast_price::{
    encode_series, grid_search, walk_forward_folds, ForecastError, Kernel, PriceSeries, SvrGrid,
};

fn trend_series(n: usize) -> PriceSeries {
    let mut csv = String::from("Date,Price\n");
    let start = chrono::NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
    for i in 0..n {
        let date = start + chrono::Days::new(i as u64);
        csv.push_str(&format!("{},{}\n", date, 100.0 + 0.5 * i as f64));
    }
    PriceSeries::from_csv_reader(csv.as_bytes()).unwrap()
}

#[test]
fn winner_comes_from_the_grid_with_nonnegative_score() {
    let series = trend_series(60);
    let samples = encode_series(&series);
    let folds = walk_forward_folds(samples.len(), 5).unwrap();
    let grid = SvrGrid::default();

    let result = grid_search(&samples, &grid, &folds).unwrap();

    assert!(result.best_score >= 0.0);
    assert!(grid.configs().unwrap().contains(&result.best_config));
    // The mean of the per-fold scores is the reported best score.
    let mean: f64 =
        result.per_fold_scores.iter().sum::<f64>() / result.per_fold_scores.len() as f64;
    assert!((mean - result.best_score).abs() < 1e-9);
}

#[test]
fn empty_grid_fails_before_any_fitting() {
    let series = trend_series(30);
    let samples = encode_series(&series);
    let folds = walk_forward_folds(samples.len(), 5).unwrap();
    let grid = SvrGrid {
        c: vec![],
        gamma: vec![],
        kernel: vec![],
    };
    let err = grid_search(&samples, &grid, &folds).unwrap_err();
    assert!(matches!(err, ForecastError::EmptyGrid));
}

#[test]
fn invalid_grid_values_are_rejected() {
    let grid = SvrGrid {
        c: vec![1.0, -3.0],
        gamma: vec![0.01],
        kernel: vec![Kernel::Rbf],
    };
    assert!(matches!(
        grid.configs(),
        Err(ForecastError::InvalidParameter(_))
    ));
}

#[test]
fn constant_series_surfaces_all_configs_failed() {
    let mut csv = String::from("Date,Price\n");
    let start = chrono::NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
    for i in 0..30 {
        let date = start + chrono::Days::new(i as u64);
        csv.push_str(&format!("{},1000.0\n", date));
    }
    let series = PriceSeries::from_csv_reader(csv.as_bytes()).unwrap();
    let samples = encode_series(&series);
    let folds = walk_forward_folds(samples.len(), 5).unwrap();

    let err = grid_search(&samples, &SvrGrid::default(), &folds).unwrap_err();
    assert!(matches!(err, ForecastError::AllConfigsFailed));
}

#[test]
fn single_config_grid_selects_that_config() {
    let series = trend_series(40);
    let samples = encode_series(&series);
    let folds = walk_forward_folds(samples.len(), 5).unwrap();
    let grid = SvrGrid {
        c: vec![10.0],
        gamma: vec![0.01],
        kernel: vec![Kernel::Rbf],
    };

    let result = grid_search(&samples, &grid, &folds).unwrap();
    assert_eq!(result.best_config.c, 10.0);
    assert_eq!(result.best_config.gamma, 0.01);
    assert_eq!(result.best_config.kernel, Kernel::Rbf);
}

#[test]
fn repeated_searches_agree_exactly() {
    let series = trend_series(55);
    let samples = encode_series(&series);
    let folds = walk_forward_folds(samples.len(), 5).unwrap();
    let grid = SvrGrid::default();

    let a = grid_search(&samples, &grid, &folds).unwrap();
    let b = grid_search(&samples, &grid, &folds).unwrap();
    assert_eq!(a, b);
}
