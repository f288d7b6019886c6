//! ARIMA models with fixed coefficients

use crate::data::SalesSeries;
use crate::error::{ForecastError, Result};
use crate::horizon::Horizon;
use crate::models::{ForecastModel, ForecastResult, Forecaster};
use crate::month::MonthStamp;
use forecast_math::{difference, integrate};
use serde::{Deserialize, Serialize};

/// Coefficients and differencing orders of an ARIMA model.
///
/// The series is seasonally differenced `seasonal_d` times at lag `period`,
/// then differenced `d` times at lag 1. The ARMA recursion runs on what is
/// left.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ArimaParams {
    /// AR coefficients, lag 1 first
    #[serde(default)]
    pub ar: Vec<f64>,
    /// MA coefficients, lag 1 first
    #[serde(default)]
    pub ma: Vec<f64>,
    #[serde(default)]
    pub constant: f64,
    /// Regular differencing order
    #[serde(default)]
    pub d: usize,
    /// Seasonal differencing order
    #[serde(default)]
    pub seasonal_d: usize,
    /// Seasonal period, required when `seasonal_d > 0`
    #[serde(default)]
    pub period: usize,
}

impl ArimaParams {
    /// Non-seasonal ARIMA(p, d, q)
    pub fn new(ar: Vec<f64>, d: usize, ma: Vec<f64>) -> Self {
        Self {
            ar,
            ma,
            d,
            ..Self::default()
        }
    }

    /// Set the constant term
    pub fn with_constant(mut self, constant: f64) -> Self {
        self.constant = constant;
        self
    }

    /// Add seasonal differencing
    pub fn with_seasonal_difference(mut self, seasonal_d: usize, period: usize) -> Self {
        self.seasonal_d = seasonal_d;
        self.period = period;
        self
    }

    /// Differencing lags in the order they are applied
    fn lags(&self) -> Vec<usize> {
        std::iter::repeat(self.period)
            .take(self.seasonal_d)
            .chain(std::iter::repeat(1).take(self.d))
            .collect()
    }

    /// Observations consumed before the first in-sample prediction
    pub fn warm_up(&self) -> usize {
        self.seasonal_d * self.period + self.d + self.ar.len()
    }

    fn validate(&self) -> Result<()> {
        let finite = self.constant.is_finite()
            && self.ar.iter().chain(self.ma.iter()).all(|c| c.is_finite());
        if !finite {
            return Err(ForecastError::InvalidParameter(
                "ARIMA coefficients must be finite".to_string(),
            ));
        }

        if self.seasonal_d > 0 && self.period < 2 {
            return Err(ForecastError::InvalidParameter(
                "Seasonal differencing needs a period of at least 2".to_string(),
            ));
        }

        Ok(())
    }

    /// One ARMA step from the most recent values and residuals
    fn step(&self, history: &[f64], residuals: &[f64]) -> f64 {
        let ar: f64 = self
            .ar
            .iter()
            .zip(history.iter().rev())
            .map(|(phi, x)| phi * x)
            .sum();
        let ma: f64 = self
            .ma
            .iter()
            .zip(residuals.iter().rev())
            .map(|(theta, e)| theta * e)
            .sum();

        self.constant + ar + ma
    }
}

/// ARIMA model (AutoRegressive Integrated Moving Average)
#[derive(Debug, Clone)]
pub struct Arima {
    /// Name of the model
    name: String,
    params: ArimaParams,
}

/// ARIMA model applied to a sales history
#[derive(Debug, Clone)]
pub struct FittedArima {
    name: String,
    params: ArimaParams,
    /// The series after each differencing stage, the raw series first
    stages: Vec<Vec<f64>>,
    /// In-sample residuals of the ARMA recursion on the last stage
    residuals: Vec<f64>,
    last_month: MonthStamp,
    fitted: Vec<f64>,
}

impl Arima {
    /// Create a new ARIMA model
    pub fn new(params: ArimaParams) -> Result<Self> {
        params.validate()?;

        let mut name = format!("ARIMA({},{},{})", params.ar.len(), params.d, params.ma.len());
        if params.seasonal_d > 0 {
            name.push_str(&format!("(0,{},0)[{}]", params.seasonal_d, params.period));
        }

        Ok(Self { name, params })
    }

    /// Replace the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Get the model parameters
    pub fn params(&self) -> &ArimaParams {
        &self.params
    }
}

impl ForecastModel for Arima {
    type Fitted = FittedArima;

    fn apply(&self, series: &SalesSeries) -> Result<FittedArima> {
        let params = &self.params;
        let observed = series.values();
        let required = params.warm_up() + 1;
        if observed.len() < required {
            return Err(ForecastError::InsufficientData {
                required,
                actual: observed.len(),
            });
        }

        let mut stages = vec![observed.to_vec()];
        for lag in params.lags() {
            let next = difference(&stages[stages.len() - 1], lag)?;
            stages.push(next);
        }

        let differenced = &stages[stages.len() - 1];
        let offset = observed.len() - differenced.len();
        let p = params.ar.len();

        let mut residuals = vec![0.0; differenced.len()];
        let mut fitted = Vec::with_capacity(differenced.len() - p);
        for t in p..differenced.len() {
            let prediction = params.step(&differenced[..t], &residuals[..t]);
            residuals[t] = differenced[t] - prediction;
            // the one-step prediction in level space differs from the
            // observation by exactly the residual
            fitted.push(observed[offset + t] - residuals[t]);
        }

        if fitted.iter().any(|v| !v.is_finite()) {
            return Err(ForecastError::DataError(format!(
                "{} diverged on this series",
                self.name
            )));
        }

        Ok(FittedArima {
            name: self.name.clone(),
            params: self.params.clone(),
            stages,
            residuals,
            last_month: series.last_month(),
            fitted,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl FittedArima {
    /// In-sample residuals on the differenced series
    pub fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    /// Parameters the model was applied with
    pub fn params(&self) -> &ArimaParams {
        &self.params
    }
}

impl Forecaster for FittedArima {
    fn name(&self) -> &str {
        &self.name
    }

    fn fitted_values(&self) -> &[f64] {
        &self.fitted
    }

    fn forecast(&self, horizon: Horizon) -> Result<ForecastResult> {
        let mut history = self.stages[self.stages.len() - 1].clone();
        let mut residuals = self.residuals.clone();
        let mut projected = Vec::with_capacity(horizon.steps());

        for _ in 0..horizon.steps() {
            let next = self.params.step(&history, &residuals);
            history.push(next);
            residuals.push(0.0);
            projected.push(next);
        }

        let lags = self.params.lags();
        for (stage, &lag) in self.stages[..lags.len()].iter().zip(lags.iter()).rev() {
            projected = integrate(stage, &projected, lag)?;
        }

        ForecastResult::new(projected, self.last_month, horizon)
    }
}
