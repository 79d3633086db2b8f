//! Design matrix layout: linear trend plus additive Fourier seasonality.
//!
//! Row layout is `[trend, yearly sin/cos pairs, weekly sin/cos pairs,
//! lag regressors...]`. The trend column is days since the first training
//! date scaled by the training span; Fourier angles use the raw day offset
//! so the blocks stay periodic past the training window.

use chrono::NaiveDate;

pub(crate) const YEARLY_PERIOD_DAYS: f64 = 365.25;
pub(crate) const WEEKLY_PERIOD_DAYS: f64 = 7.0;

#[derive(Debug, Clone)]
pub(crate) struct DesignBuilder {
    yearly_order: usize,
    weekly_order: usize,
    origin: NaiveDate,
    span_days: f64,
}

impl DesignBuilder {
    /// Anchor the trend scale to the training date range.
    ///
    /// Caller guarantees `dates` is non-empty and sorted.
    pub fn from_training_dates(
        dates: &[NaiveDate],
        yearly_order: usize,
        weekly_order: usize,
    ) -> Self {
        let origin = dates[0];
        let span = (dates[dates.len() - 1] - origin).num_days() as f64;
        Self {
            yearly_order,
            weekly_order,
            origin,
            // Single-row frames have zero span; 1.0 keeps the trend finite.
            span_days: span.max(1.0),
        }
    }

    /// Number of seasonal columns (trend included, regressors excluded).
    pub fn seasonal_width(&self) -> usize {
        1 + 2 * (self.yearly_order + self.weekly_order)
    }

    /// Write the seasonal part of a row into `out[..seasonal_width()]`.
    pub fn fill_seasonal_row(&self, date: NaiveDate, out: &mut [f64]) {
        let t_days = (date - self.origin).num_days() as f64;
        out[0] = t_days / self.span_days;

        let mut idx = 1;
        for k in 1..=self.yearly_order {
            let angle = std::f64::consts::TAU * k as f64 * t_days / YEARLY_PERIOD_DAYS;
            out[idx] = angle.sin();
            out[idx + 1] = angle.cos();
            idx += 2;
        }
        for k in 1..=self.weekly_order {
            let angle = std::f64::consts::TAU * k as f64 * t_days / WEEKLY_PERIOD_DAYS;
            out[idx] = angle.sin();
            out[idx + 1] = angle.cos();
            idx += 2;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates(n: usize) -> Vec<NaiveDate> {
        let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        (0..n)
            .map(|i| base + chrono::Duration::days(i as i64))
            .collect()
    }

    #[test]
    fn seasonal_width_counts_trend_and_fourier_pairs() {
        let builder = DesignBuilder::from_training_dates(&dates(10), 3, 3);
        assert_eq!(builder.seasonal_width(), 13);
    }

    #[test]
    fn trend_spans_zero_to_one_over_training_range() {
        let ds = dates(11);
        let builder = DesignBuilder::from_training_dates(&ds, 1, 1);
        let mut row = vec![0.0; builder.seasonal_width()];

        builder.fill_seasonal_row(ds[0], &mut row);
        assert_eq!(row[0], 0.0);
        builder.fill_seasonal_row(ds[10], &mut row);
        assert!((row[0] - 1.0).abs() < 1e-12);
        // Extrapolation past the window keeps extending linearly.
        builder.fill_seasonal_row(ds[10] + chrono::Duration::days(10), &mut row);
        assert!((row[0] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn weekly_block_is_periodic_with_seven_days() {
        let ds = dates(30);
        let builder = DesignBuilder::from_training_dates(&ds, 0, 2);
        let mut a = vec![0.0; builder.seasonal_width()];
        let mut b = vec![0.0; builder.seasonal_width()];

        builder.fill_seasonal_row(ds[3], &mut a);
        builder.fill_seasonal_row(ds[3] + chrono::Duration::days(7), &mut b);
        for (x, y) in a.iter().zip(&b).skip(1) {
            assert!((x - y).abs() < 1e-9);
        }
    }

    #[test]
    fn single_date_span_stays_finite() {
        let ds = dates(1);
        let builder = DesignBuilder::from_training_dates(&ds, 1, 1);
        let mut row = vec![0.0; builder.seasonal_width()];
        builder.fill_seasonal_row(ds[0] + chrono::Duration::days(5), &mut row);
        assert!(row.iter().all(|v| v.is_finite()));
    }
}
