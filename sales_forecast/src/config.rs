//! Dashboard configuration

use crate::error::{ForecastError, Result};
use crate::metrics::Metric;
use crate::month::DEFAULT_MONTH_FORMAT;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Where the sales history lives and how to read it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub path: PathBuf,
    /// Header of the month column
    pub date_column: String,
    /// Header of the sales column
    pub value_column: String,
    /// chrono format of the month labels
    pub date_format: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("Tractor-Sales.csv"),
            date_column: "Month-Year".to_string(),
            value_column: "Number of Tractor Sold".to_string(),
            date_format: DEFAULT_MONTH_FORMAT.to_string(),
        }
    }
}

/// Inclusive range of years a user may select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearBounds {
    pub min: i32,
    pub max: i32,
}

impl YearBounds {
    pub fn contains(&self, year: i32) -> bool {
        (self.min..=self.max).contains(&year)
    }
}

impl Default for YearBounds {
    fn default() -> Self {
        Self {
            min: 2014,
            max: 2025,
        }
    }
}

fn default_max_forecast_months() -> u32 {
    36
}

/// Everything the dashboard needs to load its data and models
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data: DataConfig,
    /// Model artifact files, compared in this order
    pub models: Vec<PathBuf>,
    /// Metric used to pick the best model
    pub ranking_metric: Metric,
    pub year_bounds: YearBounds,
    /// Longest forecast window a user may request
    #[serde(default = "default_max_forecast_months")]
    pub max_forecast_months: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            models: vec![
                PathBuf::from("exponential_smoothing_model.json"),
                PathBuf::from("arima_model.json"),
            ],
            ranking_metric: Metric::default(),
            year_bounds: YearBounds::default(),
            max_forecast_months: default_max_forecast_months(),
        }
    }
}

impl DashboardConfig {
    /// Load a configuration from a JSON file.
    ///
    /// Relative data and model paths are taken relative to the file's
    /// directory.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let mut config: DashboardConfig = serde_json::from_str(&text)
            .map_err(|err| ForecastError::ParseError(format!("{}: {}", path.display(), err)))?;

        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }

        config.validate()?;
        Ok(config)
    }

    /// Make relative data and model paths relative to `base`
    pub fn resolve_paths(&mut self, base: &Path) {
        let resolve = |p: &PathBuf| {
            if p.is_relative() {
                base.join(p)
            } else {
                p.clone()
            }
        };

        self.data.path = resolve(&self.data.path);
        self.models = self.models.iter().map(resolve).collect();
    }

    /// Check the model artifact list before loading from it
    pub fn validate_artifacts(&self) -> Result<()> {
        if self.models.is_empty() {
            return Err(ForecastError::InvalidParameter(
                "At least one model artifact must be configured".to_string(),
            ));
        }

        Ok(())
    }

    /// Check the settings are usable
    pub fn validate(&self) -> Result<()> {
        if self.year_bounds.min > self.year_bounds.max {
            return Err(ForecastError::InvalidParameter(format!(
                "Year bounds are inverted: {} > {}",
                self.year_bounds.min, self.year_bounds.max
            )));
        }

        if self.max_forecast_months == 0 {
            return Err(ForecastError::InvalidParameter(
                "max_forecast_months must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
