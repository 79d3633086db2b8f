//! Forecast orchestration — wires ingestion, features, model and metrics.
//!
//! One `forecast()` call runs the whole pipeline start to finish: ingest →
//! resolve target date → append placeholder → lag features → impute → trim →
//! build → fit → predict → evaluate. Each stage consumes its predecessor's
//! output and produces a fresh value; any stage error aborts the request
//! with a single terminal `ForecastError`. No state survives the call, so
//! concurrent forecasts need no coordination.

use std::str::FromStr;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{is_weekday, next_trading_date};
use crate::config::ForecastConfig;
use crate::data::{BarIngestor, DataProvider};
use crate::domain::Series;
use crate::error::ForecastError;
use crate::features::{build_lag_features, impute_gaps};
use crate::metrics::{evaluate_fit, AccuracyMetrics};
use crate::model::{ForecastModel, Prediction};

/// Display-range hint for the downstream plot renderer.
///
/// Accepted and passed through verbatim; the forecasting math ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeHint {
    #[serde(rename = "30days")]
    Days30,
    #[serde(rename = "6months")]
    Months6,
    #[serde(rename = "1year")]
    Year1,
    #[serde(rename = "max")]
    Max,
}

impl RangeHint {
    pub fn as_str(&self) -> &'static str {
        match self {
            RangeHint::Days30 => "30days",
            RangeHint::Months6 => "6months",
            RangeHint::Year1 => "1year",
            RangeHint::Max => "max",
        }
    }
}

impl FromStr for RangeHint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "30days" => Ok(RangeHint::Days30),
            "6months" => Ok(RangeHint::Months6),
            "1year" => Ok(RangeHint::Year1),
            "max" => Ok(RangeHint::Max),
            other => Err(format!(
                "unknown range '{other}' (expected 30days, 6months, 1year or max)"
            )),
        }
    }
}

/// One historical observation, for the plot-renderer contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Everything one forecast call produces.
///
/// `point`/`lower`/`upper` describe the placeholder row only; `fitted`
/// carries the full prediction series (placeholder last) and `actuals` the
/// full historical close series, so a downstream renderer can window and
/// draw without recomputing anything.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastReport {
    pub ticker: String,
    pub forecast_date: NaiveDate,
    pub point: f64,
    pub lower: f64,
    pub upper: f64,
    pub metrics: AccuracyMetrics,
    /// Earliest bar date the model was fit over.
    pub usable_from: NaiveDate,
    /// Forecast date minus one day (derived bound, not the last bar date).
    pub usable_until: NaiveDate,
    pub range_hint: RangeHint,
    pub actuals: Vec<PricePoint>,
    pub fitted: Vec<Prediction>,
}

/// Single-use composition of the pipeline stages.
///
/// Holds only the provider handle and the configuration; every `forecast()`
/// call builds its own series, tables and model instance.
pub struct Forecaster {
    provider: Arc<dyn DataProvider>,
    config: ForecastConfig,
}

impl Forecaster {
    pub fn new(provider: Arc<dyn DataProvider>, config: ForecastConfig) -> Self {
        Self { provider, config }
    }

    /// Run the full pipeline for `ticker` and return the one-step-ahead
    /// forecast with historical fit quality.
    pub fn forecast(
        &self,
        ticker: &str,
        range_hint: RangeHint,
    ) -> Result<ForecastReport, ForecastError> {
        let end = chrono::Utc::now().date_naive();
        self.forecast_between(ticker, range_hint, self.config.start_date, end)
    }

    /// Same as [`forecast`](Self::forecast) with an explicit fetch window.
    pub fn forecast_between(
        &self,
        ticker: &str,
        range_hint: RangeHint,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<ForecastReport, ForecastError> {
        let ingestor = BarIngestor::new(self.provider.clone());
        let bars = ingestor.ingest(ticker, start, end)?;

        // Ingest guarantees at least one bar.
        let latest = bars[bars.len() - 1].date;
        let forecast_date = next_trading_date(latest);
        if !is_weekday(forecast_date) {
            return Err(ForecastError::Calendar {
                date: forecast_date,
            });
        }

        let series = Series::with_placeholder(bars, forecast_date);
        let actuals: Vec<PricePoint> = series
            .real_rows()
            .iter()
            .map(|b| PricePoint {
                date: b.date,
                close: b.close,
            })
            .collect();

        let table = build_lag_features(&series, self.config.lag_depth);
        let imputed = impute_gaps(table);
        let usable_from = imputed.min_usable_date;
        let usable_until = imputed.max_usable_date;
        let frame = imputed.into_training_frame();

        let mut model = ForecastModel::build(self.config.model.clone(), &frame.regressor_names())?;
        model.fit(&frame)?;
        let fitted = model.predict(&frame)?;

        let historical: Vec<f64> = fitted[..frame.training_len()]
            .iter()
            .map(|p| p.yhat)
            .collect();
        let metrics = evaluate_fit(&frame.close[..frame.training_len()], &historical)?;

        let placeholder = fitted[fitted.len() - 1].clone();
        Ok(ForecastReport {
            ticker: ticker.to_string(),
            forecast_date,
            point: placeholder.yhat,
            lower: placeholder.yhat_lower,
            upper: placeholder.yhat_upper,
            metrics,
            usable_from,
            usable_until,
            range_hint,
            actuals,
            fitted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_hint_parses_wire_values() {
        assert_eq!("30days".parse::<RangeHint>().unwrap(), RangeHint::Days30);
        assert_eq!("6months".parse::<RangeHint>().unwrap(), RangeHint::Months6);
        assert_eq!("1year".parse::<RangeHint>().unwrap(), RangeHint::Year1);
        assert_eq!("max".parse::<RangeHint>().unwrap(), RangeHint::Max);
        assert!("fortnight".parse::<RangeHint>().is_err());
    }

    #[test]
    fn range_hint_serde_matches_wire_values() {
        assert_eq!(
            serde_json::to_string(&RangeHint::Days30).unwrap(),
            "\"30days\""
        );
        let parsed: RangeHint = serde_json::from_str("\"1year\"").unwrap();
        assert_eq!(parsed, RangeHint::Year1);
    }
}
