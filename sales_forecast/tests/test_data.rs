use pretty_assertions::assert_eq;
use sales_forecast::config::DataConfig;
use sales_forecast::data::{DataLoader, Observation, SalesSeries};
use sales_forecast::error::ForecastError;
use sales_forecast::month::MonthStamp;
use std::io::Write;
use tempfile::NamedTempFile;

fn month(year: i32, month: u32) -> MonthStamp {
    MonthStamp::new(year, month).unwrap()
}

#[test]
fn test_data_loader_from_csv() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Month-Year,Number of Tractor Sold").unwrap();
    writeln!(file, "Jan-03,141").unwrap();
    writeln!(file, "Feb-03,157").unwrap();
    writeln!(file, "Mar-03,185").unwrap();

    let data = DataLoader::from_csv(file.path(), &DataConfig::default()).unwrap();

    assert_eq!(data.len(), 3);
    assert!(!data.is_empty());
    assert_eq!(data.first_month(), month(2003, 1));
    assert_eq!(data.last_month(), month(2003, 3));
    assert_eq!(data.values(), &[141.0, 157.0, 185.0]);
}

#[test]
fn test_custom_columns_and_format() {
    let csv = "period,units,region\n2014-01,10,north\n2014-02,12.5,north\n";
    let config = DataConfig {
        date_column: "period".to_string(),
        value_column: "units".to_string(),
        date_format: "%Y-%m".to_string(),
        ..DataConfig::default()
    };

    let data = DataLoader::from_reader(csv.as_bytes(), &config).unwrap();
    assert_eq!(data.value_at(month(2014, 2)), Some(12.5));
}

#[test]
fn test_data_loader_error_handling() {
    let config = DataConfig::default();

    // missing file
    let result = DataLoader::from_csv("nonexistent_file.csv", &config);
    assert!(matches!(result, Err(ForecastError::ArtifactUnavailable { .. })));

    // missing column
    let result = DataLoader::from_reader("invalid,csv,format\n1,2,3\n".as_bytes(), &config);
    assert!(matches!(result, Err(ForecastError::DataError(_))));

    // bad month label
    let csv = "Month-Year,Number of Tractor Sold\nJanuary 2003,141\n";
    assert!(DataLoader::from_reader(csv.as_bytes(), &config).is_err());

    // bad value
    let csv = "Month-Year,Number of Tractor Sold\nJan-03,lots\n";
    assert!(matches!(
        DataLoader::from_reader(csv.as_bytes(), &config),
        Err(ForecastError::DataError(_))
    ));

    // header only
    let csv = "Month-Year,Number of Tractor Sold\n";
    assert!(matches!(
        DataLoader::from_reader(csv.as_bytes(), &config),
        Err(ForecastError::DataError(_))
    ));
}

#[test]
fn test_series_validation() {
    // out of order
    let result = SalesSeries::new(vec![
        Observation::new(month(2014, 2), 1.0),
        Observation::new(month(2014, 1), 1.0),
    ]);
    assert!(matches!(result, Err(ForecastError::DataError(_))));

    // duplicate month
    let result = SalesSeries::new(vec![
        Observation::new(month(2014, 1), 1.0),
        Observation::new(month(2014, 1), 2.0),
    ]);
    assert!(result.is_err());

    // negative and non-finite values
    assert!(SalesSeries::new(vec![Observation::new(month(2014, 1), -1.0)]).is_err());
    assert!(SalesSeries::new(vec![Observation::new(month(2014, 1), f64::NAN)]).is_err());
}

#[test]
fn test_series_lookup_and_gaps() {
    let data = SalesSeries::new(vec![
        Observation::new(month(2014, 1), 100.0),
        Observation::new(month(2014, 3), 120.0),
        Observation::new(month(2014, 4), 130.0),
    ])
    .unwrap();

    assert_eq!(data.value_at(month(2014, 3)), Some(120.0));
    assert_eq!(data.value_at(month(2014, 2)), None);
    assert!(!data.contains(month(2014, 5)));
    assert_eq!(data.last_month(), month(2014, 4));
    assert!((data.mean() - 116.666).abs() < 0.01);
}

#[test]
fn test_from_values_is_contiguous() {
    let data = SalesSeries::from_values(month(2014, 11), &[1.0, 2.0, 3.0]).unwrap();
    let months: Vec<MonthStamp> = data.observations().iter().map(|obs| obs.month).collect();
    assert_eq!(months, vec![month(2014, 11), month(2014, 12), month(2015, 1)]);
}
