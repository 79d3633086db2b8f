//! Gap imputation and the training frame.
//!
//! Lagging leaves the first k rows of each lag column undefined; imputation
//! replaces every undefined cell with zero and records the usable date
//! bounds of the historical window. Each stage consumes its input table and
//! produces a fresh one — nothing aliases back to a prior stage.

use chrono::NaiveDate;

use super::lag::{FeatureTable, LagColumn};

/// FeatureTable with all undefined cells zeroed, plus the usable window.
///
/// `max_usable_date` is derived as the maximum table date minus one day. The
/// maximum date is the placeholder's target, so the subtraction lands on the
/// last real trading date when the target is the next calendar day, and on
/// the weekend gap when the target is a Monday. Consumers treat it as a
/// derived bound, not as the last bar date.
#[derive(Debug, Clone)]
pub struct ImputedTable {
    pub dates: Vec<NaiveDate>,
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
    pub lags: Vec<LagColumn>,
    pub min_usable_date: NaiveDate,
    pub max_usable_date: NaiveDate,
}

/// ImputedTable trimmed for modeling: raw open/high/low dropped, lag
/// regressors and the close target retained. The last row is the placeholder
/// (prediction input only, never a training row).
#[derive(Debug, Clone)]
pub struct TrainingFrame {
    pub dates: Vec<NaiveDate>,
    pub close: Vec<f64>,
    pub regressors: Vec<LagColumn>,
}

impl TrainingFrame {
    /// Total rows including the placeholder.
    pub fn n_rows(&self) -> usize {
        self.dates.len()
    }

    /// Rows the model trains on (everything except the placeholder).
    pub fn training_len(&self) -> usize {
        self.dates.len().saturating_sub(1)
    }

    pub fn regressor_names(&self) -> Vec<String> {
        self.regressors.iter().map(|c| c.name.clone()).collect()
    }
}

/// Replace every undefined cell with zero and derive the usable bounds.
///
/// Caller guarantees a non-empty table (the series always carries at least
/// the placeholder plus one real bar by the time this runs).
pub fn impute_gaps(mut table: FeatureTable) -> ImputedTable {
    for col in &mut table.lags {
        for v in &mut col.values {
            if v.is_nan() {
                *v = 0.0;
            }
        }
    }

    let min_usable_date = table.dates[0];
    let max_usable_date = table.dates[table.dates.len() - 1] - chrono::Duration::days(1);

    ImputedTable {
        dates: table.dates,
        open: table.open,
        high: table.high,
        low: table.low,
        close: table.close,
        lags: table.lags,
        min_usable_date,
        max_usable_date,
    }
}

impl ImputedTable {
    /// Drop the raw open/high/low columns, keeping date, close and the lag
    /// regressors.
    pub fn into_training_frame(self) -> TrainingFrame {
        TrainingFrame {
            dates: self.dates,
            close: self.close,
            regressors: self.lags,
        }
    }
}
