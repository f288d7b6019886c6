//! # Tractor Forecast
//!
//! `tractor_forecast` bundles the workspace crates behind one dependency:
//! [`sales_forecast`] for the dashboard, horizons and models, and
//! [`forecast_math`] for the error metrics and differencing underneath.
//!
//! ## Example
//!
//! ```
//! use tractor_forecast::{resolve, HorizonOutcome, MonthStamp, SalesSeries};
//!
//! let series = SalesSeries::from_values(MonthStamp::new(2014, 1).unwrap(), &[141.0, 157.0]).unwrap();
//! let outcome = resolve(&series, MonthStamp::new(2014, 5).unwrap());
//!
//! assert_eq!(outcome.horizon().map(|h| h.months()), Some(3));
//! ```

pub use forecast_math;
pub use sales_forecast;

pub use sales_forecast::{
    compare_forecasts, evaluate, rank_models, resolve, Dashboard, DashboardConfig, ForecastError,
    ForecastResult, Forecaster, Horizon, HorizonOutcome, Metric, MetricValue, ModelArtifact,
    MonthStamp, QueryOutcome, Result, SalesSeries,
};
