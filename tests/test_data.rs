use forecast_price::{ForecastError, PriceSeries};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn loads_a_well_formed_csv() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Date,Price").unwrap();
    writeln!(file, "2023-01-01,100.0").unwrap();
    writeln!(file, "2023-01-02,103.5").unwrap();
    writeln!(file, "2023-01-03,101.2").unwrap();

    let series = PriceSeries::from_csv_path(file.path()).unwrap();
    assert_eq!(series.len(), 3);
    assert!(!series.is_empty());
    assert_eq!(series.prices(), vec![100.0, 103.5, 101.2]);
}

#[test]
fn extra_columns_are_ignored() {
    let csv = "Volume,Date,Open,Price\n10,2023-01-01,99.0,100.0\n20,2023-01-02,100.5,101.0\n";
    let series = PriceSeries::from_csv_reader(csv.as_bytes()).unwrap();
    assert_eq!(series.prices(), vec![100.0, 101.0]);
}

#[test]
fn missing_price_column_is_a_schema_error() {
    let csv = "Date,Close\n2023-01-01,100.0\n";
    let err = PriceSeries::from_csv_reader(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, ForecastError::Schema(_)));
    assert!(err.to_string().contains("Price"));
}

#[test]
fn header_match_is_case_sensitive() {
    let csv = "date,price\n2023-01-01,100.0\n";
    let err = PriceSeries::from_csv_reader(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, ForecastError::Schema(_)));
}

#[test]
fn bad_date_cell_is_a_parse_error() {
    let csv = "Date,Price\n2023-01-01,100.0\nnot-a-date,101.0\n";
    let err = PriceSeries::from_csv_reader(csv.as_bytes()).unwrap_err();
    match err {
        ForecastError::Parse { row, message } => {
            assert_eq!(row, 2);
            assert!(message.contains("not-a-date"));
        }
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn bad_price_cell_is_a_parse_error() {
    let csv = "Date,Price\n2023-01-01,oops\n";
    let err = PriceSeries::from_csv_reader(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, ForecastError::Parse { row: 1, .. }));
}

#[test]
fn header_only_input_is_empty() {
    let csv = "Date,Price\n";
    let err = PriceSeries::from_csv_reader(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, ForecastError::EmptyDataset));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = PriceSeries::from_csv_path("no_such_file.csv").unwrap_err();
    assert!(matches!(err, ForecastError::Io(_)));
}

#[test]
fn rows_are_sorted_by_date() {
    let csv = "Date,Price\n2023-03-01,3.0\n2023-01-01,1.0\n2023-02-01,2.0\n";
    let series = PriceSeries::from_csv_reader(csv.as_bytes()).unwrap();
    assert_eq!(series.prices(), vec![1.0, 2.0, 3.0]);
    let dates = series.dates();
    assert!(dates.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(series.last_date(), dates[2]);
}
