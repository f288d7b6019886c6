//! Metrics for evaluating in-sample fit and ranking models
//!
//! Fitted-value sequences may start later than the history because of a
//! model warm-up, so the history and the fitted values are compared on
//! their trailing overlap. Comparing leading elements would shift every
//! prediction onto the wrong month.

use crate::data::SalesSeries;
use crate::error::{ForecastError, Result};
use crate::models::Forecaster;
use forecast_math::{
    mean_absolute_error, mean_absolute_percentage_error, mean_squared_error, right_aligned,
    MathError,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Accuracy metric used to rank models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Mean Absolute Error
    Mae,
    /// Root Mean Squared Error
    #[default]
    Rmse,
    /// Mean Absolute Percentage Error
    Mape,
}

impl Metric {
    /// Every metric, in display order
    pub const ALL: [Metric; 3] = [Metric::Mae, Metric::Rmse, Metric::Mape];
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Metric::Mae => "MAE",
            Metric::Rmse => "RMSE",
            Metric::Mape => "MAPE",
        };
        f.write_str(label)
    }
}

impl FromStr for Metric {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mae" => Ok(Metric::Mae),
            "rmse" => Ok(Metric::Rmse),
            "mape" => Ok(Metric::Mape),
            other => Err(ForecastError::ParseError(format!("Unknown metric: {}", other))),
        }
    }
}

/// A metric value that may be undefined for the compared window
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Defined(f64),
    Undefined,
}

impl MetricValue {
    /// The number, if defined
    pub fn value(&self) -> Option<f64> {
        match self {
            MetricValue::Defined(v) => Some(*v),
            MetricValue::Undefined => None,
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, MetricValue::Defined(_))
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Defined(v) => write!(f, "{:.4}", v),
            MetricValue::Undefined => f.write_str("N/A"),
        }
    }
}

/// In-sample accuracy of one model
#[derive(Debug, Clone, PartialEq)]
pub struct AccuracyReport {
    /// Mean Absolute Error
    pub mae: f64,
    /// Mean Squared Error
    pub mse: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Mean Absolute Percentage Error, over non-zero actual values only
    pub mape: MetricValue,
    /// Number of aligned pairs compared
    pub compared: usize,
}

impl AccuracyReport {
    /// Value of a metric, possibly undefined
    pub fn get(&self, metric: Metric) -> MetricValue {
        match metric {
            Metric::Mae => MetricValue::Defined(self.mae),
            Metric::Rmse => MetricValue::Defined(self.rmse),
            Metric::Mape => self.mape,
        }
    }

    /// Value of a metric as a number, failing when it is undefined
    pub fn metric(&self, metric: Metric) -> Result<f64> {
        self.get(metric)
            .value()
            .ok_or(ForecastError::MetricUndefined(metric))
    }
}

impl fmt::Display for AccuracyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Forecast Accuracy Metrics ({} points):", self.compared)?;
        writeln!(f, "  MAE:   {:.4}", self.mae)?;
        writeln!(f, "  MSE:   {:.4}", self.mse)?;
        writeln!(f, "  RMSE:  {:.4}", self.rmse)?;
        match self.mape {
            MetricValue::Defined(v) => writeln!(f, "  MAPE:  {:.4}%", v)?,
            MetricValue::Undefined => writeln!(f, "  MAPE:  N/A")?,
        }
        Ok(())
    }
}

/// Evaluate fitted values against the actual history.
///
/// Compares the last `min(actual.len(), fitted.len())` elements of each.
pub fn evaluate(actual: &[f64], fitted: &[f64]) -> Result<AccuracyReport> {
    if fitted.iter().chain(actual.iter()).any(|v| !v.is_finite()) {
        return Err(ForecastError::DataError(
            "Actual and fitted values must be finite".to_string(),
        ));
    }

    let (actual, fitted) = right_aligned(actual, fitted);
    if actual.is_empty() {
        return Err(ForecastError::InsufficientData {
            required: 1,
            actual: 0,
        });
    }

    let mae = mean_absolute_error(actual, fitted)?;
    let mse = mean_squared_error(actual, fitted)?;
    let mape = match mean_absolute_percentage_error(actual, fitted) {
        Ok(v) => MetricValue::Defined(v),
        Err(MathError::Undefined(_)) => MetricValue::Undefined,
        Err(err) => return Err(err.into()),
    };

    Ok(AccuracyReport {
        mae,
        mse,
        rmse: mse.sqrt(),
        mape,
        compared: actual.len(),
    })
}

/// Evaluate a forecaster's in-sample fit on the series
pub fn evaluate_forecaster(series: &SalesSeries, model: &dyn Forecaster) -> Result<AccuracyReport> {
    let report = evaluate(series.values(), model.fitted_values())?;
    tracing::debug!(
        model = model.name(),
        compared = report.compared,
        mae = report.mae,
        rmse = report.rmse,
        mape = %report.mape,
        "evaluated model"
    );
    Ok(report)
}

/// Evaluation outcome of one model in a ranking
#[derive(Debug)]
pub struct ModelScore {
    /// Model name
    pub name: String,
    /// Full report, or why this model could not be evaluated
    pub report: Result<AccuracyReport>,
}

impl ModelScore {
    /// Value of the metric for this model, if it was evaluated and is defined
    pub fn value(&self, metric: Metric) -> Option<f64> {
        self.report.as_ref().ok().and_then(|r| r.get(metric).value())
    }
}

/// Models ordered as given, with the best one under a metric marked
#[derive(Debug)]
pub struct ModelRanking {
    metric: Metric,
    scores: Vec<ModelScore>,
    best: Option<usize>,
}

impl ModelRanking {
    /// Metric the ranking was made by
    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// Every model's score, in input order
    pub fn scores(&self) -> &[ModelScore] {
        &self.scores
    }

    /// The model with the lowest defined metric value.
    ///
    /// `None` when no model has a defined value, e.g. MAPE over an all-zero
    /// window or every evaluation failing.
    pub fn best(&self) -> Option<&ModelScore> {
        self.best.map(|i| &self.scores[i])
    }

    /// Name of the best model
    pub fn best_name(&self) -> Option<&str> {
        self.best().map(|score| score.name.as_str())
    }
}

/// Evaluate every model independently and pick the best under `metric`.
///
/// A model that cannot be evaluated keeps its error in the ranking and is
/// skipped for selection. Ties go to the model that comes first.
pub fn rank_models(
    series: &SalesSeries,
    models: &[&dyn Forecaster],
    metric: Metric,
) -> Result<ModelRanking> {
    if models.is_empty() {
        return Err(ForecastError::InvalidParameter(
            "No models to rank".to_string(),
        ));
    }

    let scores: Vec<ModelScore> = models
        .iter()
        .map(|model| {
            let report = evaluate_forecaster(series, *model);
            if let Err(err) = &report {
                tracing::warn!(model = model.name(), error = %err, "model evaluation failed");
            }
            ModelScore {
                name: model.name().to_string(),
                report,
            }
        })
        .collect();

    let mut best: Option<(usize, f64)> = None;
    for (i, score) in scores.iter().enumerate() {
        let Some(value) = score.value(metric) else {
            continue;
        };
        match best {
            Some((_, best_value)) if value >= best_value => {}
            _ => best = Some((i, value)),
        }
    }

    if let Some((i, value)) = best {
        tracing::debug!(%metric, best = scores[i].name.as_str(), value, "ranked models");
    } else {
        tracing::warn!(%metric, "no model has a defined value for the ranking metric");
    }

    Ok(ModelRanking {
        metric,
        scores,
        best: best.map(|(i, _)| i),
    })
}
