//! The query service behind the forecast dashboard
//!
//! The series and models are loaded once and then only borrowed. Every
//! query is a pure computation over them.

use crate::comparison::{compare_forecasts, ForecastComparison, ModelForecast};
use crate::config::DashboardConfig;
use crate::data::{DataLoader, SalesSeries};
use crate::error::{ForecastError, Result};
use crate::horizon::{resolve, Horizon, HorizonOutcome};
use crate::metrics::{rank_models, Metric, ModelRanking};
use crate::models::{BoxedForecaster, Forecaster, ModelArtifact};
use crate::month::MonthStamp;

/// Notice shown when a month has neither data nor a forecast
pub const UNAVAILABLE_NOTICE: &str = "Data not available for selected period.";

/// Answer to "what are sales for this month?"
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// The month is in the history
    Historical { month: MonthStamp, value: f64 },
    /// The month lies after the history; one forecast per model
    Forecast(ForecastComparison),
    /// No stored value and nothing to forecast
    Unavailable { target: MonthStamp, months_diff: i64 },
}

impl QueryOutcome {
    /// User-facing warning for unavailable months
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            QueryOutcome::Unavailable { .. } => Some(UNAVAILABLE_NOTICE),
            _ => None,
        }
    }
}

/// Sales history, models and settings, loaded once
#[derive(Debug)]
pub struct Dashboard {
    series: SalesSeries,
    models: Vec<BoxedForecaster>,
    config: DashboardConfig,
}

impl Dashboard {
    /// Assemble a dashboard from already loaded parts.
    ///
    /// Every model must have been applied to `series`: its first forecast
    /// month has to be the month after the series ends.
    pub fn new(
        series: SalesSeries,
        models: Vec<BoxedForecaster>,
        config: DashboardConfig,
    ) -> Result<Self> {
        config.validate()?;

        if models.is_empty() {
            return Err(ForecastError::InvalidParameter(
                "A dashboard needs at least one model".to_string(),
            ));
        }

        let next = series.last_month().add_months(1)?;
        let one_step = Horizon::new(1)?;
        for model in &models {
            let first = model.forecast(one_step)?.last_month();
            if first != next {
                return Err(ForecastError::DataError(format!(
                    "{} forecasts from {} but the series ends {}",
                    model.name(),
                    first,
                    series.last_month()
                )));
            }
        }

        Ok(Self {
            series,
            models,
            config,
        })
    }

    /// Load the series and every configured model artifact
    pub fn load(config: &DashboardConfig) -> Result<Self> {
        config.validate()?;
        config.validate_artifacts()?;

        let series = DataLoader::from_csv(&config.data.path, &config.data)?;
        let models = config
            .models
            .iter()
            .map(|path| ModelArtifact::from_path(path)?.apply(&series))
            .collect::<Result<Vec<_>>>()?;

        tracing::info!(
            observations = series.len(),
            first = %series.first_month(),
            last = %series.last_month(),
            models = models.len(),
            "dashboard loaded"
        );

        Self::new(series, models, config.clone())
    }

    /// The sales history
    pub fn series(&self) -> &SalesSeries {
        &self.series
    }

    /// Loaded models, in configured order
    pub fn models(&self) -> &[BoxedForecaster] {
        &self.models
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    fn forecasters(&self) -> Vec<&dyn Forecaster> {
        self.models
            .iter()
            .map(|model| model.as_ref() as &dyn Forecaster)
            .collect()
    }

    /// Query by month (a name such as "March" or a number such as "3") and year
    pub fn query(&self, month: &str, year: i32) -> Result<QueryOutcome> {
        let target = match month.trim().parse::<u32>() {
            Ok(number) => MonthStamp::new(year, number)?,
            Err(_) => MonthStamp::from_month_name(month, year)?,
        };

        self.query_month(target)
    }

    /// Look up or forecast a month selected by the user
    pub fn query_month(&self, target: MonthStamp) -> Result<QueryOutcome> {
        let bounds = self.config.year_bounds;
        if !bounds.contains(target.year()) {
            return Err(ForecastError::InvalidParameter(format!(
                "Year {} is outside {}..={}",
                target.year(),
                bounds.min,
                bounds.max
            )));
        }

        match resolve(&self.series, target) {
            HorizonOutcome::Historical { month, value } => {
                Ok(QueryOutcome::Historical { month, value })
            }
            HorizonOutcome::Future { horizon, .. } => {
                let comparison = compare_forecasts(&self.forecasters(), horizon)?;
                if comparison.target() != target {
                    return Err(ForecastError::DataError(format!(
                        "Forecast for {} landed on {}",
                        target,
                        comparison.target()
                    )));
                }
                Ok(QueryOutcome::Forecast(comparison))
            }
            HorizonOutcome::Unavailable {
                target,
                months_diff,
            } => {
                tracing::warn!(%target, months_diff, "no data for selected period");
                Ok(QueryOutcome::Unavailable {
                    target,
                    months_diff,
                })
            }
        }
    }

    /// Every model's forecast for the next `months` months
    pub fn forecast_window(&self, months: u32) -> Result<Vec<ModelForecast>> {
        if months > self.config.max_forecast_months {
            return Err(ForecastError::InvalidParameter(format!(
                "Forecast window of {} months exceeds the limit of {}",
                months, self.config.max_forecast_months
            )));
        }

        let horizon = Horizon::new(i64::from(months))?;
        let comparison = compare_forecasts(&self.forecasters(), horizon)?;
        Ok(comparison.forecasts().to_vec())
    }

    /// Rank the models by the configured metric
    pub fn evaluate(&self) -> Result<ModelRanking> {
        self.evaluate_by(self.config.ranking_metric)
    }

    /// Rank the models by any metric
    pub fn evaluate_by(&self, metric: Metric) -> Result<ModelRanking> {
        rank_models(&self.series, &self.forecasters(), metric)
    }
}
