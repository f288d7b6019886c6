//! # Sales Forecast
//!
//! Monthly sales lookups and forecasts from competing time series models.
//!
//! ## Features
//!
//! - Monthly sales history loaded from CSV (`Month-Year`, `Number of Tractor Sold`)
//! - Horizon resolution: a selected month is a historical row, a positive
//!   number of months past the history, or unavailable
//! - Exponential smoothing (Holt-Winters) and ARIMA models with fixed
//!   parameters, stored as JSON artifacts
//! - In-sample accuracy (MAE, RMSE, MAPE) with right-aligned comparison, and
//!   model ranking by a configurable metric
//! - Side-by-side forecasts with the spread between models
//!
//! ## Quick Start
//!
//! ```rust
//! use sales_forecast::horizon::{resolve, HorizonOutcome};
//! use sales_forecast::metrics::{rank_models, Metric};
//! use sales_forecast::models::{
//!     ExponentialSmoothing, ForecastModel, Forecaster, HoltWintersParams,
//! };
//! use sales_forecast::{MonthStamp, SalesSeries};
//!
//! # fn main() -> sales_forecast::Result<()> {
//! let start = MonthStamp::new(2014, 1)?;
//! let series = SalesSeries::from_values(start, &[141.0, 157.0, 185.0, 199.0, 203.0, 189.0])?;
//!
//! let model = ExponentialSmoothing::new(HoltWintersParams::simple(0.6, 141.0))?;
//! let fitted = model.apply(&series)?;
//!
//! let target = MonthStamp::new(2014, 9)?;
//! if let HorizonOutcome::Future { horizon, .. } = resolve(&series, target) {
//!     let forecast = fitted.forecast(horizon)?;
//!     assert_eq!(forecast.last_month(), target);
//! }
//!
//! let models: [&dyn Forecaster; 1] = [&fitted];
//! let ranking = rank_models(&series, &models, Metric::Rmse)?;
//! assert_eq!(ranking.best_name(), Some(fitted.name()));
//! # Ok(())
//! # }
//! ```

pub mod comparison;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod horizon;
pub mod metrics;
pub mod models;
pub mod month;

// Re-export commonly used types
pub use crate::comparison::{compare_forecasts, ForecastComparison, ModelForecast, ModelSpread};
pub use crate::config::{DashboardConfig, DataConfig, YearBounds};
pub use crate::dashboard::{Dashboard, QueryOutcome};
pub use crate::data::{DataLoader, Observation, SalesSeries};
pub use crate::error::{ForecastError, Result};
pub use crate::horizon::{resolve, ForecastRequest, Horizon, HorizonOutcome};
pub use crate::metrics::{
    evaluate, rank_models, AccuracyReport, Metric, MetricValue, ModelRanking, ModelScore,
};
pub use crate::models::{BoxedForecaster, ForecastModel, ForecastResult, Forecaster, ModelArtifact};
pub use crate::month::MonthStamp;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
