use approx::assert_relative_eq;
use pretty_assertions::assert_eq;
use sales_forecast::config::{DashboardConfig, YearBounds};
use sales_forecast::data::SalesSeries;
use sales_forecast::dashboard::{Dashboard, QueryOutcome, UNAVAILABLE_NOTICE};
use sales_forecast::error::ForecastError;
use sales_forecast::metrics::Metric;
use sales_forecast::models::{
    Arima, ArimaParams, BoxedForecaster, ExponentialSmoothing, ForecastModel, Forecaster,
    HoltWintersParams, ModelArtifact,
};
use sales_forecast::month::MonthStamp;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn month(year: i32, month: u32) -> MonthStamp {
    MonthStamp::new(year, month).unwrap()
}

/// Sales of 100, 110, ... 210 over 2014 in the dashboard's CSV layout
fn write_sales_csv(path: &Path) {
    let labels = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    let mut csv = String::from("Month-Year,Number of Tractor Sold\n");
    for (i, label) in labels.iter().enumerate() {
        csv.push_str(&format!("{}-14,{}\n", label, 100 + 10 * i));
    }
    fs::write(path, csv).unwrap();
}

/// Holt model that tracks the linear history exactly and a random walk
fn write_artifacts(dir: &Path) {
    let holt = ModelArtifact::ExponentialSmoothing {
        name: Some("Exponential Smoothing".to_string()),
        params: HoltWintersParams::simple(1.0, 90.0).with_trend(1.0, 10.0),
    };
    holt.save(dir.join("exponential_smoothing_model.json")).unwrap();

    let walk = ModelArtifact::Arima {
        name: Some("ARIMA".to_string()),
        params: ArimaParams::new(Vec::new(), 1, Vec::new()),
    };
    walk.save(dir.join("arima_model.json")).unwrap();
}

fn setup_dashboard() -> (TempDir, Dashboard) {
    let dir = TempDir::new().unwrap();
    write_sales_csv(&dir.path().join("Tractor-Sales.csv"));
    write_artifacts(dir.path());

    let config = r#"{
        "data": { "path": "Tractor-Sales.csv" },
        "models": ["exponential_smoothing_model.json", "arima_model.json"],
        "ranking_metric": "rmse",
        "year_bounds": { "min": 2010, "max": 2025 }
    }"#;
    let config_path = dir.path().join("dashboard.json");
    fs::write(&config_path, config).unwrap();

    let config = DashboardConfig::from_path(&config_path).unwrap();
    let dashboard = Dashboard::load(&config).unwrap();
    (dir, dashboard)
}

#[test]
fn test_dashboard_loads_series_and_models() {
    let (_dir, dashboard) = setup_dashboard();

    assert_eq!(dashboard.series().len(), 12);
    assert_eq!(dashboard.series().first_month(), month(2014, 1));
    assert_eq!(dashboard.series().last_month(), month(2014, 12));

    let names: Vec<&str> = dashboard.models().iter().map(|m| m.name()).collect();
    assert_eq!(names, vec!["Exponential Smoothing", "ARIMA"]);
    assert_eq!(dashboard.config().max_forecast_months, 36);
}

#[test]
fn test_query_historical_month() {
    let (_dir, dashboard) = setup_dashboard();

    let outcome = dashboard.query("June", 2014).unwrap();
    assert_eq!(
        outcome,
        QueryOutcome::Historical {
            month: month(2014, 6),
            value: 150.0
        }
    );
    assert_eq!(outcome.notice(), None);

    // numeric months work too
    assert_eq!(dashboard.query("6", 2014).unwrap(), outcome);
}

#[test]
fn test_query_future_month_compares_models() {
    let (_dir, dashboard) = setup_dashboard();

    let comparison = match dashboard.query("Mar", 2015).unwrap() {
        QueryOutcome::Forecast(comparison) => comparison,
        other => panic!("Expected a forecast, got {:?}", other),
    };

    assert_eq!(comparison.target(), month(2015, 3));
    assert_eq!(comparison.horizon().months(), 3);
    assert_eq!(comparison.forecasts().len(), 2);

    let holt = comparison.get("Exponential Smoothing").unwrap();
    assert_relative_eq!(holt.value, 240.0, epsilon = 1e-9);
    assert_eq!(holt.path.values().len(), 3);

    let walk = comparison.get("ARIMA").unwrap();
    assert_relative_eq!(walk.value, 210.0, epsilon = 1e-9);

    let spread = comparison.spread().unwrap();
    assert_relative_eq!(spread.absolute, 30.0, epsilon = 1e-9);
    assert_relative_eq!(spread.relative.unwrap(), 30.0 / 225.0 * 100.0, epsilon = 1e-9);
}

#[test]
fn test_query_month_before_history_is_unavailable() {
    let (_dir, dashboard) = setup_dashboard();

    let outcome = dashboard.query_month(month(2013, 6)).unwrap();
    assert_eq!(
        outcome,
        QueryOutcome::Unavailable {
            target: month(2013, 6),
            months_diff: -18
        }
    );
    assert_eq!(outcome.notice(), Some(UNAVAILABLE_NOTICE));
}

#[test]
fn test_query_rejects_years_outside_bounds() {
    let (_dir, dashboard) = setup_dashboard();

    assert!(matches!(
        dashboard.query("Jan", 2030),
        Err(ForecastError::InvalidParameter(_))
    ));
    assert!(matches!(
        dashboard.query("Jan", 2009),
        Err(ForecastError::InvalidParameter(_))
    ));
    assert!(dashboard.query("Smarch", 2015).is_err());
}

#[test]
fn test_forecast_window() {
    let (_dir, dashboard) = setup_dashboard();

    let window = dashboard.forecast_window(3).unwrap();
    assert_eq!(window.len(), 2);
    for forecast in &window {
        assert_eq!(
            forecast.path.months(),
            &[month(2015, 1), month(2015, 2), month(2015, 3)]
        );
    }
    assert_relative_eq!(window[0].path.values()[0], 220.0, epsilon = 1e-9);
    assert_eq!(window[1].path.values(), &[210.0, 210.0, 210.0]);

    assert!(dashboard.forecast_window(36).is_ok());
    assert!(matches!(
        dashboard.forecast_window(37),
        Err(ForecastError::InvalidParameter(_))
    ));
    assert!(matches!(
        dashboard.forecast_window(0),
        Err(ForecastError::InvalidHorizon { months: 0 })
    ));
}

#[test]
fn test_evaluate_ranks_models() {
    let (_dir, dashboard) = setup_dashboard();

    let ranking = dashboard.evaluate().unwrap();
    assert_eq!(ranking.metric(), Metric::Rmse);
    assert_eq!(ranking.best_name(), Some("Exponential Smoothing"));

    // the random walk misses every month by the monthly step
    let walk = &ranking.scores()[1];
    let report = walk.report.as_ref().unwrap();
    assert_eq!(report.compared, 11);
    assert_relative_eq!(report.mae, 10.0, epsilon = 1e-9);
    assert_relative_eq!(report.rmse, 10.0, epsilon = 1e-9);

    let ranking = dashboard.evaluate_by(Metric::Mape).unwrap();
    assert_eq!(ranking.best_name(), Some("Exponential Smoothing"));
}

#[test]
fn test_dashboard_from_parts() {
    let (_dir, loaded) = setup_dashboard();

    let series = loaded.series().clone();
    let model = ExponentialSmoothing::new(HoltWintersParams::simple(0.5, 100.0)).unwrap();
    // injected models need no artifact list
    let config = DashboardConfig {
        models: Vec::new(),
        ..DashboardConfig::default()
    };

    let models: Vec<BoxedForecaster> = vec![Box::new(model.apply(&series).unwrap())];
    let dashboard = Dashboard::new(series.clone(), models, config.clone()).unwrap();
    assert_eq!(dashboard.models().len(), 1);

    // a single model has no spread
    match dashboard.query("Feb", 2015).unwrap() {
        QueryOutcome::Forecast(comparison) => assert!(comparison.spread().is_none()),
        other => panic!("Expected a forecast, got {:?}", other),
    }

    assert!(matches!(
        Dashboard::new(series, Vec::new(), config),
        Err(ForecastError::InvalidParameter(_))
    ));
}

#[test]
fn test_models_must_be_applied_to_the_dashboard_series() {
    let values: Vec<f64> = (0..24).map(|i| 100.0 + i as f64).collect();
    let series = SalesSeries::from_values(month(2014, 1), &values).unwrap();
    // same parameters, but applied to the first year only
    let first_year = SalesSeries::from_values(month(2014, 1), &values[..12]).unwrap();

    let model = ExponentialSmoothing::new(HoltWintersParams::simple(0.5, 100.0)).unwrap();
    let stale: Vec<BoxedForecaster> = vec![Box::new(model.apply(&first_year).unwrap())];

    assert!(matches!(
        Dashboard::new(series.clone(), stale, DashboardConfig::default()),
        Err(ForecastError::DataError(_))
    ));

    // applied to the full series, Mar-2016 is forecast three months out
    let current: Vec<BoxedForecaster> = vec![Box::new(model.apply(&series).unwrap())];
    let dashboard = Dashboard::new(series, current, DashboardConfig::default()).unwrap();
    match dashboard.query_month(month(2016, 3)).unwrap() {
        QueryOutcome::Forecast(comparison) => {
            assert_eq!(comparison.target(), month(2016, 3));
            assert_eq!(comparison.horizon().months(), 3);
        }
        other => panic!("Expected a forecast, got {:?}", other),
    }
}

#[test]
fn test_load_needs_model_artifacts() {
    let dir = TempDir::new().unwrap();
    write_sales_csv(&dir.path().join("Tractor-Sales.csv"));

    let mut config = DashboardConfig {
        models: Vec::new(),
        ..DashboardConfig::default()
    };
    config.resolve_paths(dir.path());

    assert!(config.validate().is_ok());
    assert!(matches!(
        config.validate_artifacts(),
        Err(ForecastError::InvalidParameter(_))
    ));
    assert!(matches!(
        Dashboard::load(&config),
        Err(ForecastError::InvalidParameter(_))
    ));
}

#[test]
fn test_missing_artifact_fails_load() {
    let dir = TempDir::new().unwrap();
    write_sales_csv(&dir.path().join("Tractor-Sales.csv"));

    let mut config = DashboardConfig::default();
    config.resolve_paths(dir.path());

    match Dashboard::load(&config) {
        Err(ForecastError::ArtifactUnavailable { path, .. }) => {
            assert!(path.ends_with("exponential_smoothing_model.json"));
        }
        other => panic!("Expected ArtifactUnavailable, got {:?}", other),
    }
}

#[test]
fn test_arima_artifact_needs_enough_history() {
    let dir = TempDir::new().unwrap();
    write_sales_csv(&dir.path().join("Tractor-Sales.csv"));

    let seasonal = Arima::new(ArimaParams::new(vec![0.5], 1, Vec::new()).with_seasonal_difference(1, 12))
        .unwrap();
    ModelArtifact::from(seasonal)
        .save(dir.path().join("arima_model.json"))
        .unwrap();

    let mut config = DashboardConfig {
        models: vec!["arima_model.json".into()],
        ..DashboardConfig::default()
    };
    config.resolve_paths(dir.path());

    assert!(matches!(
        Dashboard::load(&config),
        Err(ForecastError::InsufficientData { required: 15, actual: 12 })
    ));
}

#[test]
fn test_config_defaults_and_validation() {
    let config = DashboardConfig::default();
    assert_eq!(config.data.date_column, "Month-Year");
    assert_eq!(config.data.value_column, "Number of Tractor Sold");
    assert_eq!(config.data.date_format, "%b-%y");
    assert_eq!(config.year_bounds, YearBounds { min: 2014, max: 2025 });
    assert_eq!(config.ranking_metric, Metric::Rmse);
    assert_eq!(config.models.len(), 2);
    assert!(config.validate().is_ok());

    let inverted = DashboardConfig {
        year_bounds: YearBounds { min: 2025, max: 2014 },
        ..DashboardConfig::default()
    };
    assert!(matches!(inverted.validate(), Err(ForecastError::InvalidParameter(_))));

    let no_models = DashboardConfig {
        models: Vec::new(),
        ..DashboardConfig::default()
    };
    assert!(no_models.validate().is_ok());
    assert!(no_models.validate_artifacts().is_err());

    let no_window = DashboardConfig {
        max_forecast_months: 0,
        ..DashboardConfig::default()
    };
    assert!(no_window.validate().is_err());
}

#[test]
fn test_config_from_path_errors() {
    let dir = TempDir::new().unwrap();

    let missing = DashboardConfig::from_path(dir.path().join("absent.json"));
    assert!(matches!(missing, Err(ForecastError::IoError(_))));

    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{ not json").unwrap();
    assert!(matches!(
        DashboardConfig::from_path(&broken),
        Err(ForecastError::ParseError(_))
    ));

    // an empty object falls back to every default
    let empty = dir.path().join("empty.json");
    fs::write(&empty, "{}").unwrap();
    let config = DashboardConfig::from_path(&empty).unwrap();
    assert_eq!(config.data.path, dir.path().join("Tractor-Sales.csv"));
    assert_eq!(config.max_forecast_months, 36);
}
