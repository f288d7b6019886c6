//! Holt-Winters exponential smoothing with fixed parameters

use crate::data::SalesSeries;
use crate::error::{ForecastError, Result};
use crate::horizon::Horizon;
use crate::models::{ForecastModel, ForecastResult, Forecaster};
use crate::month::MonthStamp;
use serde::{Deserialize, Serialize};

/// How the seasonal component combines with level and trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seasonality {
    /// `level + trend + season`
    #[default]
    Additive,
    /// `(level + trend) * season`
    Multiplicative,
}

impl Seasonality {
    fn combine(self, base: f64, season: f64) -> f64 {
        match self {
            Seasonality::Additive => base + season,
            Seasonality::Multiplicative => base * season,
        }
    }

    fn remove(self, value: f64, season: f64) -> f64 {
        match self {
            Seasonality::Additive => value - season,
            Seasonality::Multiplicative => value / season,
        }
    }
}

/// Smoothing parameters and initial state of a Holt-Winters model.
///
/// `beta` enables the trend and `gamma` the seasonal component. The seasonal
/// period is the number of initial seasonal indices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoltWintersParams {
    /// Level smoothing
    pub alpha: f64,
    /// Trend smoothing
    #[serde(default)]
    pub beta: Option<f64>,
    /// Seasonal smoothing
    #[serde(default)]
    pub gamma: Option<f64>,
    #[serde(default)]
    pub seasonality: Seasonality,
    pub initial_level: f64,
    #[serde(default)]
    pub initial_trend: f64,
    /// Seasonal indices for the season before the first observation
    #[serde(default)]
    pub initial_seasonals: Vec<f64>,
}

impl HoltWintersParams {
    /// Simple exponential smoothing: level only
    pub fn simple(alpha: f64, initial_level: f64) -> Self {
        Self {
            alpha,
            beta: None,
            gamma: None,
            seasonality: Seasonality::Additive,
            initial_level,
            initial_trend: 0.0,
            initial_seasonals: Vec::new(),
        }
    }

    /// Add a trend component
    pub fn with_trend(mut self, beta: f64, initial_trend: f64) -> Self {
        self.beta = Some(beta);
        self.initial_trend = initial_trend;
        self
    }

    /// Add a seasonal component whose period is `initial_seasonals.len()`
    pub fn with_seasonality(
        mut self,
        gamma: f64,
        seasonality: Seasonality,
        initial_seasonals: Vec<f64>,
    ) -> Self {
        self.gamma = Some(gamma);
        self.seasonality = seasonality;
        self.initial_seasonals = initial_seasonals;
        self
    }

    /// Seasonal period, or `None` without a seasonal component
    pub fn period(&self) -> Option<usize> {
        self.gamma.map(|_| self.initial_seasonals.len())
    }

    fn validate(&self) -> Result<()> {
        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return Err(ForecastError::InvalidParameter(
                "Alpha must be in (0, 1]".to_string(),
            ));
        }

        for (label, value) in [("Beta", self.beta), ("Gamma", self.gamma)] {
            if let Some(v) = value {
                if !(0.0..=1.0).contains(&v) {
                    return Err(ForecastError::InvalidParameter(format!(
                        "{} must be in [0, 1]",
                        label
                    )));
                }
            }
        }

        let state_is_finite = self.initial_level.is_finite()
            && self.initial_trend.is_finite()
            && self.initial_seasonals.iter().all(|s| s.is_finite());
        if !state_is_finite {
            return Err(ForecastError::InvalidParameter(
                "Initial state must be finite".to_string(),
            ));
        }

        match self.gamma {
            Some(_) if self.initial_seasonals.len() < 2 => Err(ForecastError::InvalidParameter(
                "A seasonal model needs at least two initial seasonal indices".to_string(),
            )),
            Some(_)
                if self.seasonality == Seasonality::Multiplicative
                    && self.initial_seasonals.iter().any(|s| *s <= 0.0) =>
            {
                Err(ForecastError::InvalidParameter(
                    "Multiplicative seasonal indices must be positive".to_string(),
                ))
            }
            None if !self.initial_seasonals.is_empty() => Err(ForecastError::InvalidParameter(
                "Seasonal indices given without gamma".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

/// Holt-Winters exponential smoothing model
#[derive(Debug, Clone)]
pub struct ExponentialSmoothing {
    /// Name of the model
    name: String,
    params: HoltWintersParams,
}

/// Holt-Winters model applied to a sales history
#[derive(Debug, Clone)]
pub struct FittedExponentialSmoothing {
    name: String,
    params: HoltWintersParams,
    /// Level after the last observation
    level: f64,
    /// Trend after the last observation
    trend: f64,
    /// Latest seasonal index for each position in the season
    seasonals: Vec<f64>,
    /// Number of observations smoothed
    observed: usize,
    last_month: MonthStamp,
    fitted: Vec<f64>,
}

impl ExponentialSmoothing {
    /// Create a new exponential smoothing model
    pub fn new(params: HoltWintersParams) -> Result<Self> {
        params.validate()?;

        let name = match (params.beta.is_some(), params.period()) {
            (_, Some(period)) => format!("Holt-Winters (alpha={}, period={})", params.alpha, period),
            (true, None) => format!("Holt (alpha={})", params.alpha),
            (false, None) => format!("Exponential Smoothing (alpha={})", params.alpha),
        };

        Ok(Self { name, params })
    }

    /// Replace the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Get the model parameters
    pub fn params(&self) -> &HoltWintersParams {
        &self.params
    }
}

impl ForecastModel for ExponentialSmoothing {
    type Fitted = FittedExponentialSmoothing;

    fn apply(&self, series: &SalesSeries) -> Result<Self::Fitted> {
        let params = &self.params;
        let kind = params.seasonality;
        let neutral = match kind {
            Seasonality::Additive => 0.0,
            Seasonality::Multiplicative => 1.0,
        };

        let mut level = params.initial_level;
        let mut trend = if params.beta.is_some() {
            params.initial_trend
        } else {
            0.0
        };
        let mut seasonals = params.initial_seasonals.clone();
        let mut fitted = Vec::with_capacity(series.len());

        for (t, &observed) in series.values().iter().enumerate() {
            let slot = if seasonals.is_empty() { 0 } else { t % seasonals.len() };
            let season = seasonals.get(slot).copied().unwrap_or(neutral);
            let base = level + trend;

            fitted.push(kind.combine(base, season));

            let previous_level = level;
            level = params.alpha * kind.remove(observed, season) + (1.0 - params.alpha) * base;

            if let Some(beta) = params.beta {
                trend = beta * (level - previous_level) + (1.0 - beta) * trend;
            }

            if let Some(gamma) = params.gamma {
                seasonals[slot] = gamma * kind.remove(observed, level) + (1.0 - gamma) * season;
            }
        }

        if fitted.iter().any(|v| !v.is_finite()) || !level.is_finite() {
            return Err(ForecastError::DataError(format!(
                "{} diverged on this series",
                self.name
            )));
        }

        Ok(FittedExponentialSmoothing {
            name: self.name.clone(),
            params: self.params.clone(),
            level,
            trend,
            seasonals,
            observed: series.len(),
            last_month: series.last_month(),
            fitted,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl FittedExponentialSmoothing {
    /// Final smoothed level
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Final smoothed trend, zero without a trend component
    pub fn trend(&self) -> f64 {
        self.trend
    }

    /// Parameters the model was applied with
    pub fn params(&self) -> &HoltWintersParams {
        &self.params
    }
}

impl Forecaster for FittedExponentialSmoothing {
    fn name(&self) -> &str {
        &self.name
    }

    fn fitted_values(&self) -> &[f64] {
        &self.fitted
    }

    fn forecast(&self, horizon: Horizon) -> Result<ForecastResult> {
        let kind = self.params.seasonality;
        let period = self.seasonals.len();

        let values = (1..=horizon.steps())
            .map(|k| {
                let base = self.level + k as f64 * self.trend;
                if period == 0 {
                    base
                } else {
                    kind.combine(base, self.seasonals[(self.observed + k - 1) % period])
                }
            })
            .collect();

        ForecastResult::new(values, self.last_month, horizon)
    }
}
