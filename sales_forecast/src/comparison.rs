//! Side-by-side forecasts from several models

use crate::error::{ForecastError, Result};
use crate::horizon::Horizon;
use crate::models::{ForecastResult, Forecaster};
use crate::month::MonthStamp;

/// One model's forecast for a horizon
#[derive(Debug, Clone, PartialEq)]
pub struct ModelForecast {
    /// Model name
    pub name: String,
    /// Forecast at the target month
    pub value: f64,
    /// Every forecast month up to the target
    pub path: ForecastResult,
}

/// How far apart the models' target-month forecasts are
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelSpread {
    /// Largest minus smallest forecast
    pub absolute: f64,
    /// Absolute spread as a percentage of the mean absolute forecast
    pub relative: Option<f64>,
}

/// Forecasts of every model for the same target month
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastComparison {
    target: MonthStamp,
    horizon: Horizon,
    forecasts: Vec<ModelForecast>,
    spread: Option<ModelSpread>,
}

impl ForecastComparison {
    /// Month being forecast
    pub fn target(&self) -> MonthStamp {
        self.target
    }

    /// Steps from the end of the history to the target
    pub fn horizon(&self) -> Horizon {
        self.horizon
    }

    /// Per-model forecasts, in model order
    pub fn forecasts(&self) -> &[ModelForecast] {
        &self.forecasts
    }

    /// Spread between models; `None` with a single model
    pub fn spread(&self) -> Option<ModelSpread> {
        self.spread
    }

    /// Forecast of the named model
    pub fn get(&self, name: &str) -> Option<&ModelForecast> {
        self.forecasts.iter().find(|f| f.name == name)
    }
}

/// Forecast `horizon` months with every model and compare the results
pub fn compare_forecasts(models: &[&dyn Forecaster], horizon: Horizon) -> Result<ForecastComparison> {
    let forecasts = models
        .iter()
        .map(|model| {
            let path = model.forecast(horizon)?;
            Ok(ModelForecast {
                name: model.name().to_string(),
                value: path.last(),
                path,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let target = forecasts
        .first()
        .map(|f| f.path.last_month())
        .ok_or_else(|| ForecastError::InvalidParameter("No models to compare".to_string()))?;

    if let Some(other) = forecasts.iter().find(|f| f.path.last_month() != target) {
        return Err(ForecastError::DataError(format!(
            "{} forecasts {} but {} forecasts {}",
            forecasts[0].name,
            target,
            other.name,
            other.path.last_month()
        )));
    }

    let spread = spread_of(&forecasts);

    Ok(ForecastComparison {
        target,
        horizon,
        forecasts,
        spread,
    })
}

fn spread_of(forecasts: &[ModelForecast]) -> Option<ModelSpread> {
    if forecasts.len() < 2 {
        return None;
    }

    let (min, max) = forecasts
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), f| {
            (lo.min(f.value), hi.max(f.value))
        });
    let absolute = max - min;

    let mean_abs = forecasts.iter().map(|f| f.value.abs()).sum::<f64>() / forecasts.len() as f64;
    let relative = (mean_abs > 0.0).then(|| absolute / mean_abs * 100.0);

    Some(ModelSpread { absolute, relative })
}
