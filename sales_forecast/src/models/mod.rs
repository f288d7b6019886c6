//! Forecasting models for monthly sales series
//!
//! Models arrive with their parameters already estimated. A [`ForecastModel`]
//! holds those parameters; applying it to a series runs the model's
//! recursion over the history and yields a [`Forecaster`], which knows its
//! in-sample fitted values and can project forward.

use crate::data::SalesSeries;
use crate::error::{ForecastError, Result};
use crate::horizon::Horizon;
use crate::month::MonthStamp;
use std::fmt::Debug;

pub mod arima;
pub mod artifact;
pub mod exponential_smoothing;

pub use arima::{Arima, ArimaParams, FittedArima};
pub use artifact::ModelArtifact;
pub use exponential_smoothing::{
    ExponentialSmoothing, FittedExponentialSmoothing, HoltWintersParams, Seasonality,
};

/// Forecast values labelled with the months they belong to
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastResult {
    /// Forecasted values, one per month
    values: Vec<f64>,
    /// Month of each value, starting the month after the history ends
    months: Vec<MonthStamp>,
}

impl ForecastResult {
    /// Create a forecast result for the months following `last_observed`
    pub fn new(values: Vec<f64>, last_observed: MonthStamp, horizon: Horizon) -> Result<Self> {
        if values.len() != horizon.steps() {
            return Err(ForecastError::DataError(format!(
                "Values length ({}) doesn't match horizon ({})",
                values.len(),
                horizon
            )));
        }

        if values.iter().any(|v| !v.is_finite()) {
            return Err(ForecastError::DataError(
                "Forecast produced a non-finite value".to_string(),
            ));
        }

        let months = last_observed.successors(horizon.months())?;

        Ok(Self { values, months })
    }

    /// Get the forecasted values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Get the month of each forecasted value
    pub fn months(&self) -> &[MonthStamp] {
        &self.months
    }

    /// Number of months forecasted
    pub fn horizon(&self) -> usize {
        self.values.len()
    }

    /// Value at the final forecast month, the target of a horizon query
    pub fn last(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    /// Final forecast month
    pub fn last_month(&self) -> MonthStamp {
        self.months[self.months.len() - 1]
    }

    /// Month and value pairs in order
    pub fn points(&self) -> impl Iterator<Item = (MonthStamp, f64)> + '_ {
        self.months.iter().copied().zip(self.values.iter().copied())
    }
}

/// A model bound to its training history
pub trait Forecaster: Debug {
    /// Display name of the model
    fn name(&self) -> &str;

    /// In-sample one-step predictions.
    ///
    /// The sequence ends at the last month of the history and may start later
    /// than the history does when the model needs a warm-up window.
    fn fitted_values(&self) -> &[f64];

    /// Forecast the `horizon` months after the history, one value per month
    fn forecast(&self, horizon: Horizon) -> Result<ForecastResult>;
}

/// Owned forecaster handle shared by the dashboard
pub type BoxedForecaster = Box<dyn Forecaster + Send + Sync>;

/// Model parameters that can be applied to a sales history
pub trait ForecastModel: Debug + Clone {
    /// The forecaster produced by applying the parameters
    type Fitted: Forecaster;

    /// Run the model recursion over the series with fixed parameters
    fn apply(&self, series: &SalesSeries) -> Result<Self::Fitted>;

    /// Get the name of the model
    fn name(&self) -> &str;
}
