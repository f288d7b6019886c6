use proptest::prelude::*;
use sales_forecast::data::SalesSeries;
use sales_forecast::horizon::{resolve, HorizonOutcome};
use sales_forecast::metrics::{evaluate, MetricValue};
use sales_forecast::month::MonthStamp;

/// Contiguous series of `len` months starting at the given month
fn series_from(year: i32, month: u32, len: usize) -> SalesSeries {
    let values: Vec<f64> = (0..len).map(|i| 100.0 + i as f64).collect();
    SalesSeries::from_values(MonthStamp::new(year, month).unwrap(), &values).unwrap()
}

proptest! {
    #[test]
    fn historical_months_return_their_value(
        year in 2000i32..2020,
        month in 1u32..=12,
        len in 1usize..48,
        pick in 0usize..48,
    ) {
        let series = series_from(year, month, len);
        let obs = series.observations()[pick % series.len()];

        prop_assert_eq!(
            resolve(&series, obs.month),
            HorizonOutcome::Historical { month: obs.month, value: obs.value }
        );
    }

    #[test]
    fn future_months_resolve_to_calendar_difference(
        year in 2000i32..2020,
        month in 1u32..=12,
        ahead in 1u32..240,
    ) {
        let series = series_from(year, month, 12);
        let last = series.last_month();
        let target = last.add_months(ahead).unwrap();

        let horizon = resolve(&series, target).horizon().unwrap();
        let expected = i64::from(target.year() - last.year()) * 12
            + i64::from(target.month())
            - i64::from(last.month());
        prop_assert_eq!(i64::from(horizon.months()), expected);
        prop_assert_eq!(horizon.months(), ahead);
    }

    #[test]
    fn horizons_are_additive(
        year in 2000i32..2020,
        month in 1u32..=12,
        first in 1u32..120,
        gap in 1u32..120,
    ) {
        let series = series_from(year, month, 6);
        let d1 = series.last_month().add_months(first).unwrap();
        let d2 = d1.add_months(gap).unwrap();

        let h1 = resolve(&series, d1).horizon().unwrap();
        let h2 = resolve(&series, d2).horizon().unwrap();
        prop_assert_eq!(i64::from(h1.months()) + d1.months_until(&d2), i64::from(h2.months()));
    }

    #[test]
    fn past_months_without_rows_are_unavailable(
        year in 2000i32..2020,
        month in 1u32..=12,
        back in 0u32..120,
    ) {
        // single observation, so every earlier month is a gap
        let series = series_from(year, month, 1);
        let target = MonthStamp::new(year - 1 - (back / 12) as i32, 1 + back % 12).unwrap();
        prop_assert!(target < series.last_month());

        prop_assert!(resolve(&series, target).is_unavailable());
    }

    #[test]
    fn rmse_dominates_mae(
        pairs in prop::collection::vec((0.0f64..10_000.0, 0.0f64..10_000.0), 1..60),
    ) {
        let (actual, fitted): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
        let report = evaluate(&actual, &fitted).unwrap();

        prop_assert!(report.mae >= 0.0);
        prop_assert!(report.rmse + 1e-9 >= report.mae);
    }

    #[test]
    fn fitted_values_compare_against_the_tail(
        actual in prop::collection::vec(1.0f64..1_000.0, 2..60),
        warm_up in 1usize..20,
    ) {
        prop_assume!(warm_up < actual.len());
        // a perfect fit of everything after the warm-up
        let fitted = actual[warm_up..].to_vec();

        let report = evaluate(&actual, &fitted).unwrap();
        prop_assert_eq!(report.compared, actual.len() - warm_up);
        prop_assert_eq!(report.mae, 0.0);
        prop_assert_eq!(report.mape, MetricValue::Defined(0.0));
    }

    #[test]
    fn all_zero_actuals_leave_mape_undefined(
        fitted in prop::collection::vec(0.0f64..1_000.0, 1..30),
    ) {
        let actual = vec![0.0; fitted.len()];
        let report = evaluate(&actual, &fitted).unwrap();
        prop_assert_eq!(report.mape, MetricValue::Undefined);
    }
}
