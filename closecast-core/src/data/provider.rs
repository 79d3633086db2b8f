//! Data provider trait and structured error types.
//!
//! The DataProvider trait abstracts over data sources (Yahoo Finance, CSV
//! import, synthetic bars) so the pipeline can swap implementations and mock
//! the provider for tests.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raw daily bar as delivered by a provider, before normalization.
///
/// Volume and adjusted close are provider-dependent extras: some sources
/// include them, some do not. Ingestion drops them either way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: Option<u64>,
    #[serde(default)]
    pub adj_close: Option<f64>,
}

/// Structured error types for provider operations.
///
/// Every variant is folded into `ForecastError::DataUnavailable` at the
/// ingestion boundary — callers of the pipeline never see a raw provider
/// error.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("provider returned no bars for '{symbol}'")]
    Empty { symbol: String },

    #[error("I/O error: {0}")]
    Io(String),

    #[error("data error: {0}")]
    Other(String),
}

/// Trait for data providers (Yahoo Finance, CSV import, synthetic).
///
/// Implementations handle the specifics of fetching daily bars from a
/// particular source. Normalization sits above this trait — providers return
/// whatever the source gave them, in whatever order.
pub trait DataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch daily bars for a symbol over an inclusive date range.
    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<RawBar>, DataError>;
}
