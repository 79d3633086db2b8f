//! Fit-quality metrics — pure functions over actual/predicted pairs.
//!
//! Evaluated strictly over historical (non-placeholder) rows. A zero actual
//! value would put MAPE's denominator at zero; that is reported as a
//! degenerate-metric error, never an infinite or NaN result.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Aggregate fit quality for one historical window.
///
/// `accuracy_percent` is `100 - mape`, deliberately unclamped: poor fits go
/// negative, and a negative MAPE edge case would push it above 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccuracyMetrics {
    pub mape: f64,
    pub r2: f64,
    pub accuracy_percent: f64,
}

#[derive(Debug, Error)]
pub enum MetricError {
    #[error("length mismatch: {actual} actuals vs {predicted} predictions")]
    LengthMismatch { actual: usize, predicted: usize },

    #[error("degenerate metric: actual value is zero at row {index}")]
    DegenerateActual { index: usize },

    #[error("degenerate metric: {0}")]
    Degenerate(String),
}

/// Compute MAPE, R² and the derived accuracy percentage.
///
/// MAPE and accuracy are rounded to 2 decimal places, R² to 4, for
/// presentation stability.
pub fn evaluate_fit(actual: &[f64], predicted: &[f64]) -> Result<AccuracyMetrics, MetricError> {
    if actual.len() != predicted.len() {
        return Err(MetricError::LengthMismatch {
            actual: actual.len(),
            predicted: predicted.len(),
        });
    }
    if actual.is_empty() {
        return Err(MetricError::Degenerate("no rows to evaluate".into()));
    }
    if let Some(index) = actual.iter().position(|&a| a == 0.0) {
        return Err(MetricError::DegenerateActual { index });
    }

    let n = actual.len() as f64;
    let mape = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| ((a - p) / a).abs())
        .sum::<f64>()
        / n
        * 100.0;

    let mean_actual = actual.iter().sum::<f64>() / n;
    let ss_tot = actual
        .iter()
        .map(|a| (a - mean_actual) * (a - mean_actual))
        .sum::<f64>();
    if ss_tot < f64::EPSILON {
        return Err(MetricError::Degenerate(
            "actuals have zero variance, R² is undefined".into(),
        ));
    }
    let ss_res = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p) * (a - p))
        .sum::<f64>();
    let r2 = 1.0 - ss_res / ss_tot;

    Ok(AccuracyMetrics {
        mape: round_to(mape, 2),
        r2: round_to(r2, 4),
        accuracy_percent: round_to(100.0 - mape, 2),
    })
}

fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_fit_scores_perfectly() {
        let actual = [100.0, 101.0, 102.0, 103.0];
        let metrics = evaluate_fit(&actual, &actual).unwrap();
        assert_eq!(metrics.mape, 0.0);
        assert_eq!(metrics.r2, 1.0);
        assert_eq!(metrics.accuracy_percent, 100.0);
    }

    #[test]
    fn zero_actual_is_degenerate() {
        let actual = [100.0, 0.0, 102.0];
        let predicted = [100.0, 50.0, 102.0];
        let err = evaluate_fit(&actual, &predicted).unwrap_err();
        assert!(matches!(err, MetricError::DegenerateActual { index: 1 }));
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let err = evaluate_fit(&[100.0, 101.0], &[100.0]).unwrap_err();
        assert!(matches!(
            err,
            MetricError::LengthMismatch {
                actual: 2,
                predicted: 1
            }
        ));
    }

    #[test]
    fn constant_actuals_are_degenerate_for_r2() {
        let actual = [100.0, 100.0, 100.0];
        let predicted = [99.0, 100.0, 101.0];
        let err = evaluate_fit(&actual, &predicted).unwrap_err();
        assert!(matches!(err, MetricError::Degenerate(_)));
    }

    #[test]
    fn accuracy_can_go_negative_for_terrible_fits() {
        let actual = [1.0, 1.0, 2.0];
        let predicted = [10.0, 10.0, 20.0];
        let metrics = evaluate_fit(&actual, &predicted).unwrap();
        assert_eq!(metrics.mape, 900.0);
        assert_eq!(metrics.accuracy_percent, -800.0);
    }

    #[test]
    fn known_values_round_to_fixed_precision() {
        let actual = [100.0, 200.0, 300.0];
        let predicted = [110.0, 190.0, 310.0];
        let metrics = evaluate_fit(&actual, &predicted).unwrap();
        // MAPE = (0.10 + 0.05 + 1/30) / 3 * 100
        assert_eq!(metrics.mape, 6.11);
        assert_eq!(metrics.accuracy_percent, 93.89);
        // SS_res = 300, SS_tot = 20000
        assert_eq!(metrics.r2, 0.985);
    }
}
