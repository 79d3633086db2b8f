//! Bar series ingestion: fetch, fold errors, normalize.
//!
//! The ingestor is the only producer of `Bar` values. Whatever a provider
//! returns is sorted, deduplicated and sanity-filtered here, so every
//! downstream stage can rely on a clean, strictly chronological series.

use std::sync::Arc;

use chrono::NaiveDate;

use super::provider::{DataProvider, RawBar};
use crate::domain::Bar;
use crate::error::ForecastError;

pub struct BarIngestor {
    provider: Arc<dyn DataProvider>,
}

impl BarIngestor {
    pub fn new(provider: Arc<dyn DataProvider>) -> Self {
        Self { provider }
    }

    /// Fetch and normalize daily bars for `ticker` over `[start, end]`.
    ///
    /// Any provider error — rate limiting, malformed response, empty range —
    /// surfaces as `DataUnavailable` with the cause attached. An empty series
    /// after normalization is the same error.
    pub fn ingest(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Bar>, ForecastError> {
        let raw = self
            .provider
            .fetch(ticker, start, end)
            .map_err(|e| ForecastError::DataUnavailable {
                ticker: ticker.to_string(),
                source: Some(e),
            })?;

        let bars = Self::normalize(raw);
        if bars.is_empty() {
            return Err(ForecastError::DataUnavailable {
                ticker: ticker.to_string(),
                source: None,
            });
        }
        Ok(bars)
    }

    /// Sort by date, dedupe keeping the first occurrence, drop insane rows.
    ///
    /// Volume and adjusted close are discarded here — present or not, the
    /// pipeline only carries the four price channels forward.
    fn normalize(raw: Vec<RawBar>) -> Vec<Bar> {
        let mut bars: Vec<Bar> = raw
            .into_iter()
            .map(|r| Bar {
                date: r.date,
                open: r.open,
                high: r.high,
                low: r.low,
                close: r.close,
            })
            .filter(Bar::is_sane)
            .collect();

        bars.sort_by_key(|b| b.date);
        bars.dedup_by_key(|b| b.date);
        bars
    }
}
