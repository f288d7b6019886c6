//! # Forecast Math
//!
//! Numeric building blocks shared by the forecasting crates.
//! This crate provides the point-error metrics used to score in-sample fits
//! and the lag differencing used by integrated models.

use thiserror::Error;

pub mod accuracy;
pub mod differencing;

pub use accuracy::{
    mean_absolute_error, mean_absolute_percentage_error, mean_squared_error,
    right_aligned, root_mean_squared_error,
};
pub use differencing::{difference, integrate};

/// Errors that can occur in forecasting math
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Undefined result: {0}")]
    Undefined(String),
}

/// Result type for forecasting math operations
pub type Result<T> = std::result::Result<T, MathError>;
