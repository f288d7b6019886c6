use forecast_math::MathError;
use sales_forecast::error::ForecastError;
use sales_forecast::metrics::Metric;
use std::io;
use std::path::{Path, PathBuf};

#[test]
fn test_error_conversion() {
    // Test IO error conversion
    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let forecast_error = ForecastError::from(io_error);
    assert!(matches!(forecast_error, ForecastError::IoError(_)));

    // Test parse error
    let parse_error = "invalid data".parse::<i32>().unwrap_err();
    let forecast_error = ForecastError::from(parse_error);
    assert!(matches!(forecast_error, ForecastError::ParseError(_)));

    // Test math error
    let math_error = MathError::InvalidInput("lag must be at least 1".to_string());
    let forecast_error = ForecastError::from(math_error);
    assert!(matches!(forecast_error, ForecastError::Math(_)));
}

#[test]
fn test_error_display() {
    let error = ForecastError::InvalidParameter("alpha must be in (0, 1]".to_string());
    assert!(error.to_string().contains("alpha must be in (0, 1]"));

    let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "permission denied");
    let error_string = ForecastError::from(io_error).to_string();
    assert!(error_string.contains("IO error"));
    assert!(error_string.contains("permission denied"));

    assert_eq!(
        ForecastError::InvalidHorizon { months: 0 }.to_string(),
        "Invalid horizon: 0 months (must be at least 1)"
    );
    assert_eq!(
        ForecastError::MetricUndefined(Metric::Mape).to_string(),
        "MAPE is undefined for the compared values"
    );
    assert_eq!(
        ForecastError::InsufficientData {
            required: 3,
            actual: 0
        }
        .to_string(),
        "Insufficient data: need at least 3 values, got 0"
    );
}

#[test]
fn test_artifact_error_names_the_path() {
    let error = ForecastError::ArtifactUnavailable {
        path: PathBuf::from("models/arima_model.json"),
        reason: "No such file or directory".to_string(),
    };

    let message = error.to_string();
    assert!(message.contains("models/arima_model.json"));
    assert!(message.contains("No such file or directory"));
}

#[test]
fn test_result_mapping() {
    let file_result = std::fs::read_to_string(Path::new("/nonexistent/path"));
    let mapped = file_result.map_err(ForecastError::from);

    assert!(matches!(mapped, Err(ForecastError::IoError(_))));
}
