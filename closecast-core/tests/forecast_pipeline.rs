//! End-to-end pipeline tests with a mock data provider.
//!
//! Uses a deterministic in-memory provider so the full ingest → features →
//! model → metrics path runs without network access.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Weekday};
use closecast_core::config::ForecastConfig;
use closecast_core::data::{DataError, DataProvider, RawBar};
use closecast_core::error::ForecastError;
use closecast_core::pipeline::{Forecaster, RangeHint};

/// Serves `n` weekday bars with a known linear closing-price trend,
/// `close[i] = 100 + i`, starting Monday 2024-01-01.
struct LinearProvider {
    n: usize,
}

impl DataProvider for LinearProvider {
    fn name(&self) -> &str {
        "linear_mock"
    }

    fn fetch(
        &self,
        symbol: &str,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<Vec<RawBar>, DataError> {
        if self.n == 0 {
            return Err(DataError::Empty {
                symbol: symbol.to_string(),
            });
        }

        let mut bars = Vec::with_capacity(self.n);
        let mut date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(); // a Monday
        let mut i = 0;
        while i < self.n {
            if !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
                let close = 100.0 + i as f64;
                bars.push(RawBar {
                    date,
                    open: close - 0.5,
                    high: close + 1.0,
                    low: close - 1.0,
                    close,
                    volume: Some(1_000),
                    adj_close: Some(close),
                });
                i += 1;
            }
            date += chrono::Duration::days(1);
        }
        Ok(bars)
    }
}

fn forecaster(n: usize) -> Forecaster {
    Forecaster::new(Arc::new(LinearProvider { n }), ForecastConfig::default())
}

#[test]
fn linear_trend_extrapolates_one_business_day() {
    let report = forecaster(60).forecast("LINEAR", RangeHint::Max).unwrap();

    // 60 weekdays from Monday 2024-01-01 end on Friday 2024-03-22; the next
    // business day is Monday 2024-03-25.
    assert_eq!(
        report.forecast_date,
        NaiveDate::from_ymd_opt(2024, 3, 25).unwrap()
    );
    assert_eq!(
        report.usable_until,
        NaiveDate::from_ymd_opt(2024, 3, 24).unwrap()
    );
    assert_eq!(
        report.usable_from,
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    );

    // The linear extrapolation of close[i] = 100 + i is 160.
    assert!(
        (report.point - 160.0).abs() < 2.5,
        "point {} too far from 160",
        report.point
    );
    assert!(report.lower <= report.point && report.point <= report.upper);
    assert!(
        report.metrics.accuracy_percent > 95.0,
        "accuracy {} too low",
        report.metrics.accuracy_percent
    );

    assert_eq!(report.actuals.len(), 60);
    assert_eq!(report.fitted.len(), 61);
    assert_eq!(report.fitted.last().unwrap().date, report.forecast_date);
    assert_eq!(report.range_hint, RangeHint::Max);
}

#[test]
fn series_shorter_than_lag_window_still_produces_a_result() {
    // Fewer than 13 bars: most lag cells impute to zero. Quality is not
    // asserted, only absence of failure.
    let report = forecaster(5).forecast("SHORT", RangeHint::Days30).unwrap();
    assert_eq!(report.actuals.len(), 5);
    assert_eq!(report.fitted.len(), 6);
    assert!(report.point.is_finite());
    assert!(report.lower.is_finite() && report.upper.is_finite());
}

#[test]
fn empty_provider_aborts_with_data_unavailable() {
    let err = forecaster(0).forecast("EMPTY", RangeHint::Max).unwrap_err();
    match err {
        ForecastError::DataUnavailable { ticker, source } => {
            assert_eq!(ticker, "EMPTY");
            assert!(matches!(source, Some(DataError::Empty { .. })));
        }
        other => panic!("expected DataUnavailable, got {other:?}"),
    }
}

#[test]
fn repeated_runs_are_idempotent() {
    let f = forecaster(60);
    let a = f.forecast("LINEAR", RangeHint::Max).unwrap();
    let b = f.forecast("LINEAR", RangeHint::Max).unwrap();

    assert!((a.point - b.point).abs() < 1e-9);
    assert!((a.lower - b.lower).abs() < 1e-9);
    assert!((a.upper - b.upper).abs() < 1e-9);
    assert_eq!(a.metrics, b.metrics);
    assert_eq!(a.forecast_date, b.forecast_date);
}

#[test]
fn friday_latest_bar_targets_monday() {
    // 5 weekday bars starting Monday end on Friday 2024-01-05.
    let report = forecaster(5).forecast("WEEK", RangeHint::Max).unwrap();
    assert_eq!(
        report.forecast_date,
        NaiveDate::from_ymd_opt(2024, 1, 8).unwrap()
    );
}

#[test]
fn report_serializes_for_downstream_consumers() {
    let report = forecaster(20).forecast("JSON", RangeHint::Year1).unwrap();
    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"range_hint\":\"1year\""));
    assert!(json.contains("\"forecast_date\""));
    assert!(json.contains("\"yhat_lower\""));
}
