//! CSV file data provider.
//!
//! Offline import path: reads daily bars from a CSV file with a
//! `date,open,high,low,close[,volume][,adj_close]` header. Used for
//! development and tests when the network provider is unavailable.

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Deserialize;

use super::provider::{DataError, DataProvider, RawBar};

#[derive(Debug, Deserialize)]
struct CsvRecord {
    date: NaiveDate,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    #[serde(default)]
    volume: Option<u64>,
    #[serde(default)]
    adj_close: Option<f64>,
}

/// Reads bars for any requested symbol from a single CSV file.
pub struct CsvProvider {
    path: PathBuf,
}

impl CsvProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DataProvider for CsvProvider {
    fn name(&self) -> &str {
        "csv_import"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<RawBar>, DataError> {
        let mut reader = csv::Reader::from_path(&self.path)
            .map_err(|e| DataError::Io(format!("{}: {e}", self.path.display())))?;

        let mut bars = Vec::new();
        for record in reader.deserialize::<CsvRecord>() {
            let rec = record.map_err(|e| DataError::ResponseFormatChanged(e.to_string()))?;
            if rec.date < start || rec.date > end {
                continue;
            }
            bars.push(RawBar {
                date: rec.date,
                open: rec.open,
                high: rec.high,
                low: rec.low,
                close: rec.close,
                volume: rec.volume,
                adj_close: rec.adj_close,
            });
        }

        if bars.is_empty() {
            return Err(DataError::Empty {
                symbol: symbol.to_string(),
            });
        }

        Ok(bars)
    }
}
