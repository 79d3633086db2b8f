//! Lag feature engineering.
//!
//! For each price channel and each lag period k, derives a regressor column
//! whose value at row i equals the channel's value at row i-k. Rows with
//! i < k have no source row and stay NaN until imputation. Pure function of
//! the input series and the lag depth; no randomness.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Bar, Series};

/// Default lag depth: one column per channel for each of the last 12 bars.
pub const DEFAULT_LAG_DEPTH: usize = 12;

/// Price channel a lag column is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Channel {
    Close,
    Open,
    High,
    Low,
}

impl Channel {
    /// All channels, in the order lag columns are generated per period.
    pub const ALL: [Channel; 4] = [Channel::Close, Channel::Open, Channel::High, Channel::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Close => "close",
            Channel::Open => "open",
            Channel::High => "high",
            Channel::Low => "low",
        }
    }

    fn value(&self, bar: &Bar) -> f64 {
        match self {
            Channel::Close => bar.close,
            Channel::Open => bar.open,
            Channel::High => bar.high,
            Channel::Low => bar.low,
        }
    }
}

/// One derived regressor column.
#[derive(Debug, Clone)]
pub struct LagColumn {
    pub channel: Channel,
    pub lag: usize,
    pub name: String,
    pub values: Vec<f64>,
}

/// Series extended with all lag-derived columns. NaN marks undefined cells.
#[derive(Debug, Clone)]
pub struct FeatureTable {
    pub dates: Vec<NaiveDate>,
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
    pub lags: Vec<LagColumn>,
}

/// Derive lag columns 1..=depth for every price channel.
pub fn build_lag_features(series: &Series, depth: usize) -> FeatureTable {
    let rows = series.rows();
    let n = rows.len();

    let mut lags = Vec::with_capacity(4 * depth);
    for k in 1..=depth {
        for channel in Channel::ALL {
            let mut values = vec![f64::NAN; n];
            for i in k..n {
                values[i] = channel.value(&rows[i - k]);
            }
            lags.push(LagColumn {
                channel,
                lag: k,
                name: format!("{}_lag_{k}", channel.as_str()),
                values,
            });
        }
    }

    FeatureTable {
        dates: rows.iter().map(|b| b.date).collect(),
        open: rows.iter().map(|b| b.open).collect(),
        high: rows.iter().map(|b| b.high).collect(),
        low: rows.iter().map(|b| b.low).collect(),
        close: rows.iter().map(|b| b.close).collect(),
        lags,
    }
}
