//! Synthetic data provider for development and offline runs.
//!
//! Produces a seeded random walk over weekdays from a starting price of
//! 100.0. Deterministic per (seed, symbol) pair, so repeated runs forecast
//! the same series.

use chrono::{Datelike, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::provider::{DataError, DataProvider, RawBar};

pub struct SyntheticProvider {
    seed: u64,
}

impl SyntheticProvider {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Derive a per-symbol seed so different tickers walk differently.
    fn symbol_seed(&self, symbol: &str) -> u64 {
        symbol
            .bytes()
            .fold(self.seed, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64))
    }
}

impl DataProvider for SyntheticProvider {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<RawBar>, DataError> {
        let mut rng = StdRng::seed_from_u64(self.symbol_seed(symbol));

        let mut bars = Vec::new();
        let mut price = 100.0_f64;
        let mut current = start;

        while current <= end {
            let weekday = current.weekday();
            if weekday == Weekday::Sat || weekday == Weekday::Sun {
                current += chrono::Duration::days(1);
                continue;
            }

            let daily_return: f64 = rng.gen_range(-0.03..0.03);
            let open = price;
            let close = price * (1.0 + daily_return);
            let high = open.max(close) * (1.0 + rng.gen_range(0.0..0.01));
            let low = open.min(close) * (1.0 - rng.gen_range(0.0..0.01));
            let volume = rng.gen_range(500_000..5_000_000u64);

            bars.push(RawBar {
                date: current,
                open,
                high,
                low,
                close,
                volume: Some(volume),
                adj_close: Some(close),
            });

            price = close;
            current += chrono::Duration::days(1);
        }

        if bars.is_empty() {
            return Err(DataError::Empty {
                symbol: symbol.to_string(),
            });
        }

        Ok(bars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range() -> (NaiveDate, NaiveDate) {
        (
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        )
    }

    #[test]
    fn deterministic_per_seed_and_symbol() {
        let (start, end) = range();
        let a = SyntheticProvider::new(7).fetch("SPY", start, end).unwrap();
        let b = SyntheticProvider::new(7).fetch("SPY", start, end).unwrap();
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.date, y.date);
            assert_eq!(x.close, y.close);
        }
    }

    #[test]
    fn different_symbols_walk_differently() {
        let (start, end) = range();
        let a = SyntheticProvider::new(7).fetch("SPY", start, end).unwrap();
        let b = SyntheticProvider::new(7).fetch("QQQ", start, end).unwrap();
        assert!(a.iter().zip(&b).any(|(x, y)| x.close != y.close));
    }

    #[test]
    fn skips_weekends() {
        let (start, end) = range();
        let bars = SyntheticProvider::new(1).fetch("SPY", start, end).unwrap();
        assert!(bars.iter().all(|b| {
            let wd = b.date.weekday();
            wd != Weekday::Sat && wd != Weekday::Sun
        }));
    }

    #[test]
    fn weekend_only_range_is_empty() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 6).unwrap(); // Saturday
        let end = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap(); // Sunday
        let err = SyntheticProvider::new(1).fetch("SPY", start, end).unwrap_err();
        assert!(matches!(err, DataError::Empty { .. }));
    }
}
