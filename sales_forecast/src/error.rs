//! Error types for the sales_forecast crate

use crate::metrics::Metric;
use forecast_math::MathError;
use std::path::PathBuf;
use thiserror::Error;

/// Custom error types for the sales_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Error related to data validation or processing
    #[error("Data error: {0}")]
    DataError(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A forecast horizon that is not a positive number of months
    #[error("Invalid horizon: {months} months (must be at least 1)")]
    InvalidHorizon { months: i64 },

    /// Not enough observations for a model warm-up or an evaluation window
    #[error("Insufficient data: need at least {required} values, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// A metric with no defined value for the compared window
    #[error("{0} is undefined for the compared values")]
    MetricUndefined(Metric),

    /// A model artifact or data file that could not be loaded
    #[error("Artifact unavailable at {}: {reason}", path.display())]
    ArtifactUnavailable { path: PathBuf, reason: String },

    /// Error from the numeric helpers
    #[error("Math error: {0}")]
    Math(#[from] MathError),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from CSV parsing
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Error from parsing text input
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<chrono::ParseError> for ForecastError {
    fn from(err: chrono::ParseError) -> Self {
        ForecastError::ParseError(err.to_string())
    }
}

impl From<std::num::ParseIntError> for ForecastError {
    fn from(err: std::num::ParseIntError) -> Self {
        ForecastError::ParseError(err.to_string())
    }
}
