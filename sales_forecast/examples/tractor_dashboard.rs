use sales_forecast::config::DashboardConfig;
use sales_forecast::dashboard::{Dashboard, QueryOutcome};
use sales_forecast::metrics::Metric;
use sales_forecast::models::{
    Arima, ArimaParams, ExponentialSmoothing, HoltWintersParams, ModelArtifact, Seasonality,
};
use sales_forecast::month::MonthStamp;
use std::f64::consts::PI;
use std::fs;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sales_forecast=info".into()),
        )
        .init();

    println!("Sales Forecast: Tractor Dashboard Example");
    println!("=========================================\n");

    // Everything the dashboard reads lives in one scratch directory
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("Tractor-Sales.csv"), create_sample_csv(2014, 4))?;

    let holt_winters = ExponentialSmoothing::new(
        HoltWintersParams::simple(0.4, 200.0)
            .with_trend(0.1, 4.0)
            .with_seasonality(0.2, Seasonality::Additive, seasonal_profile()),
    )?
    .with_name("Exponential Smoothing");
    ModelArtifact::from(holt_winters).save(dir.path().join("exponential_smoothing_model.json"))?;

    let arima = Arima::new(
        ArimaParams::new(vec![0.3], 0, vec![-0.2]).with_seasonal_difference(1, 12),
    )?
    .with_name("ARIMA");
    ModelArtifact::from(arima).save(dir.path().join("arima_model.json"))?;

    let mut config = DashboardConfig::default();
    config.resolve_paths(dir.path());
    let dashboard = Dashboard::load(&config)?;

    println!(
        "Loaded {} months of sales ({} to {})\n",
        dashboard.series().len(),
        dashboard.series().first_month(),
        dashboard.series().last_month()
    );

    // Model accuracy on the history
    println!("Model evaluation:");
    let ranking = dashboard.evaluate()?;
    for score in ranking.scores() {
        match &score.report {
            Ok(report) => println!("  {:<24} {}", score.name, report),
            Err(err) => println!("  {:<24} failed: {}", score.name, err),
        }
    }
    match ranking.best_name() {
        Some(name) => println!("Best model by {}: {}\n", ranking.metric(), name),
        None => println!("No model could be ranked by {}\n", ranking.metric()),
    }

    let mape = dashboard.evaluate_by(Metric::Mape)?;
    for score in mape.scores() {
        if let Some(value) = score.value(Metric::Mape) {
            println!("  {} MAPE: {:.2}%", score.name, value);
        }
    }
    println!();

    // A few dashboard queries
    for (month, year) in [("March", 2016), ("June", 2018), ("Dec", 2019), ("Jan", 2014)] {
        match dashboard.query(month, year)? {
            QueryOutcome::Historical { month, value } => {
                println!("{}: {:.0} tractors sold", month, value);
            }
            QueryOutcome::Forecast(comparison) => {
                println!("{} ({} ahead):", comparison.target(), comparison.horizon());
                for forecast in comparison.forecasts() {
                    println!("  {:<24} {:.1}", forecast.name, forecast.value);
                }
                if let Some(spread) = comparison.spread() {
                    match spread.relative {
                        Some(relative) => {
                            println!("  spread: {:.1} ({:.1}%)", spread.absolute, relative)
                        }
                        None => println!("  spread: {:.1}", spread.absolute),
                    }
                }
            }
            outcome @ QueryOutcome::Unavailable { .. } => {
                println!("{} {}: {}", month, year, outcome.notice().unwrap_or_default());
            }
        }
    }

    // The next year of forecasts, month by month
    println!("\nForecast window (12 months):");
    let window = dashboard.forecast_window(12)?;
    let months: Vec<MonthStamp> = window[0].path.months().to_vec();
    for (i, month) in months.iter().enumerate() {
        let values: Vec<String> = window
            .iter()
            .map(|f| format!("{:>8.1}", f.path.values()[i]))
            .collect();
        println!("  {}  {}", month, values.join(" "));
    }

    Ok(())
}

/// Additive seasonal indices peaking in early summer
fn seasonal_profile() -> Vec<f64> {
    (0..12)
        .map(|m| 60.0 * (2.0 * PI * (m as f64 - 2.0) / 12.0).sin())
        .collect()
}

/// Monthly sales with a trend and a yearly cycle, in the dashboard's CSV layout
fn create_sample_csv(start_year: i32, years: i32) -> String {
    let profile = seasonal_profile();
    let mut csv = String::from("Month-Year,Number of Tractor Sold\n");

    for (t, (year, month)) in (start_year..start_year + years)
        .flat_map(|year| (1..=12).map(move |month| (year, month)))
        .enumerate()
    {
        let label = MonthStamp::new(year, month)
            .map(|m| m.first_day().format("%b-%y").to_string())
            .unwrap_or_default();
        let sales = 200.0 + 4.0 * t as f64 + profile[(month - 1) as usize];
        csv.push_str(&format!("{},{:.0}\n", label, sales));
    }

    csv
}
