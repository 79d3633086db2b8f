//! Series — chronological bars plus the synthetic forecast placeholder.

use chrono::NaiveDate;

use super::Bar;

/// Ordered run of real bars with exactly one placeholder row appended.
///
/// The placeholder carries the resolved next trading date and zeroed price
/// fields. It exists so the one-step-ahead prediction flows through the same
/// feature pipeline as every historical row; it is never treated as an
/// observation and is excluded from any statistic over actual values.
#[derive(Debug, Clone)]
pub struct Series {
    rows: Vec<Bar>,
}

impl Series {
    /// Append the placeholder row for `target_date` to a run of real bars.
    ///
    /// Caller guarantees `bars` is non-empty and chronologically sorted
    /// (ingestion enforces both).
    pub fn with_placeholder(mut bars: Vec<Bar>, target_date: NaiveDate) -> Self {
        bars.push(Bar {
            date: target_date,
            open: 0.0,
            high: 0.0,
            low: 0.0,
            close: 0.0,
        });
        Self { rows: bars }
    }

    /// All rows, placeholder last.
    pub fn rows(&self) -> &[Bar] {
        &self.rows
    }

    /// Real observations only (everything except the trailing placeholder).
    pub fn real_rows(&self) -> &[Bar] {
        &self.rows[..self.rows.len() - 1]
    }

    /// The trailing placeholder row.
    pub fn placeholder(&self) -> &Bar {
        // Construction always pushes the placeholder, so rows is non-empty.
        &self.rows[self.rows.len() - 1]
    }

    /// Date of the last real observation.
    pub fn latest_real_date(&self) -> Option<NaiveDate> {
        self.real_rows().last().map(|b| b.date)
    }

    /// Total row count including the placeholder.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
