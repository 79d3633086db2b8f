//! Terminal pipeline error taxonomy.
//!
//! Every stage failure is fatal for the request: no partial forecast is ever
//! returned. Provider errors of any kind are folded into `DataUnavailable`
//! at the ingestion boundary with the original cause attached.

use chrono::NaiveDate;
use thiserror::Error;

use crate::data::DataError;
use crate::metrics::MetricError;
use crate::model::ModelError;

#[derive(Debug, Error)]
pub enum ForecastError {
    /// Provider returned no usable bars, or failed outright.
    #[error("no data available for ticker '{ticker}'")]
    DataUnavailable {
        ticker: String,
        #[source]
        source: Option<DataError>,
    },

    /// The resolved forecast target landed on a non-weekday. The weekend
    /// displacement rule should make this unreachable; failing loudly beats
    /// silently forecasting a day the market is closed.
    #[error("resolved forecast date {date} is not a weekday")]
    Calendar { date: NaiveDate },

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Metric(#[from] MetricError),
}
