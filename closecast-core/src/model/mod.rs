//! Additive regression-with-seasonality forecast model.
//!
//! The model decomposes close price into a linear trend, yearly and weekly
//! Fourier seasonality (additive composition), and the registered lag
//! regressors, then solves a ridge-regularized least-squares fit over
//! standardized columns. Uncertainty bounds come from the Gaussian residual
//! quantile at the configured interval width.
//!
//! Fitting is fully deterministic: identical input produces identical
//! coefficients and predictions.

mod design;

use chrono::NaiveDate;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::features::TrainingFrame;
use design::DesignBuilder;

/// Model configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSpec {
    /// Fourier order of the yearly seasonal block.
    pub yearly_order: usize,
    /// Fourier order of the weekly seasonal block.
    pub weekly_order: usize,
    /// Ridge penalty, scaled by the training row count at fit time.
    pub ridge_lambda: f64,
    /// Central coverage of the uncertainty interval, in (0, 1).
    pub interval_width: f64,
}

impl Default for ModelSpec {
    fn default() -> Self {
        Self {
            yearly_order: 3,
            weekly_order: 3,
            ridge_lambda: 1e-3,
            interval_width: 0.95,
        }
    }
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model build failed: {0}")]
    Build(String),

    #[error("model fit failed: {0}")]
    Fit(String),

    #[error("predict called before fit")]
    NotFitted,
}

/// Per-row model output: point estimate and uncertainty bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub date: NaiveDate,
    pub yhat: f64,
    pub yhat_lower: f64,
    pub yhat_upper: f64,
}

#[derive(Debug)]
struct FittedState {
    design: DesignBuilder,
    col_mean: Vec<f64>,
    col_inv_scale: Vec<f64>,
    beta: DVector<f64>,
    y_mean: f64,
    sigma: f64,
}

#[derive(Debug)]
pub struct ForecastModel {
    spec: ModelSpec,
    regressors: Vec<String>,
    fitted: Option<FittedState>,
}

impl ForecastModel {
    /// Validate the configuration and register the external regressors.
    pub fn build(spec: ModelSpec, regressor_names: &[String]) -> Result<Self, ModelError> {
        if !(spec.interval_width > 0.0 && spec.interval_width < 1.0) {
            return Err(ModelError::Build(format!(
                "interval width must be in (0, 1), got {}",
                spec.interval_width
            )));
        }
        if !(spec.ridge_lambda > 0.0) {
            return Err(ModelError::Build(format!(
                "ridge lambda must be positive, got {}",
                spec.ridge_lambda
            )));
        }
        let mut seen = std::collections::HashSet::new();
        for name in regressor_names {
            if !seen.insert(name.as_str()) {
                return Err(ModelError::Build(format!("duplicate regressor '{name}'")));
            }
        }

        Ok(Self {
            spec,
            regressors: regressor_names.to_vec(),
            fitted: None,
        })
    }

    /// Fit on every frame row except the trailing placeholder, with date as
    /// the time axis and close as the target.
    pub fn fit(&mut self, frame: &TrainingFrame) -> Result<(), ModelError> {
        let n = frame.training_len();
        if n < 2 {
            return Err(ModelError::Fit(format!(
                "need at least 2 training rows, got {n}"
            )));
        }
        self.check_regressors(frame)?;

        let design = DesignBuilder::from_training_dates(
            &frame.dates[..n],
            self.spec.yearly_order,
            self.spec.weekly_order,
        );
        let sw = design.seasonal_width();
        let p = sw + self.regressors.len();

        let mut x = DMatrix::<f64>::zeros(n, p);
        let mut seasonal = vec![0.0; sw];
        for i in 0..n {
            design.fill_seasonal_row(frame.dates[i], &mut seasonal);
            for (j, &v) in seasonal.iter().enumerate() {
                x[(i, j)] = v;
            }
            for (j, col) in frame.regressors.iter().enumerate() {
                x[(i, sw + j)] = col.values[i];
            }
        }

        // Standardize columns; constant columns collapse to zero instead of
        // dividing by a vanishing scale.
        let mut col_mean = vec![0.0; p];
        let mut col_inv_scale = vec![0.0; p];
        for j in 0..p {
            let col = x.column(j);
            let mu = col.sum() / n as f64;
            let var = col.iter().map(|v| (v - mu) * (v - mu)).sum::<f64>() / n as f64;
            let sd = var.sqrt();
            col_mean[j] = mu;
            col_inv_scale[j] = if sd < 1e-12 { 0.0 } else { 1.0 / sd };
        }
        for j in 0..p {
            for i in 0..n {
                x[(i, j)] = (x[(i, j)] - col_mean[j]) * col_inv_scale[j];
            }
        }

        let y_mean = frame.close[..n].iter().sum::<f64>() / n as f64;
        let yc = DVector::from_iterator(n, frame.close[..n].iter().map(|v| v - y_mean));

        let lambda = self.spec.ridge_lambda * n as f64;
        let gram = x.transpose() * &x + DMatrix::identity(p, p) * lambda;
        let rhs = x.transpose() * &yc;
        let beta = gram
            .cholesky()
            .ok_or_else(|| ModelError::Fit("normal equations are not positive definite".into()))?
            .solve(&rhs);

        let residuals = &yc - &x * &beta;
        let dof = (n - 1).max(1) as f64;
        let sigma = (residuals.iter().map(|r| r * r).sum::<f64>() / dof).sqrt();

        self.fitted = Some(FittedState {
            design,
            col_mean,
            col_inv_scale,
            beta,
            y_mean,
            sigma,
        });
        Ok(())
    }

    /// Predict every frame row, placeholder included. The close column is
    /// never read — regressors and dates fully determine the output.
    pub fn predict(&self, frame: &TrainingFrame) -> Result<Vec<Prediction>, ModelError> {
        let state = self.fitted.as_ref().ok_or(ModelError::NotFitted)?;
        self.check_regressors(frame)?;

        let sw = state.design.seasonal_width();
        let half_width = normal_quantile(0.5 + self.spec.interval_width / 2.0) * state.sigma;

        let mut seasonal = vec![0.0; sw];
        let mut predictions = Vec::with_capacity(frame.n_rows());
        for i in 0..frame.n_rows() {
            state.design.fill_seasonal_row(frame.dates[i], &mut seasonal);
            let mut yhat = state.y_mean;
            for j in 0..state.beta.len() {
                let raw = if j < sw {
                    seasonal[j]
                } else {
                    frame.regressors[j - sw].values[i]
                };
                yhat += (raw - state.col_mean[j]) * state.col_inv_scale[j] * state.beta[j];
            }
            predictions.push(Prediction {
                date: frame.dates[i],
                yhat,
                yhat_lower: yhat - half_width,
                yhat_upper: yhat + half_width,
            });
        }
        Ok(predictions)
    }

    fn check_regressors(&self, frame: &TrainingFrame) -> Result<(), ModelError> {
        if frame.regressors.len() != self.regressors.len() {
            return Err(ModelError::Fit(format!(
                "frame carries {} regressors, model registered {}",
                frame.regressors.len(),
                self.regressors.len()
            )));
        }
        Ok(())
    }
}

/// Inverse standard normal CDF (Acklam's rational approximation,
/// |relative error| < 1.2e-9). Input must be in (0, 1); the model only calls
/// it with 0.5 < p < 1.
fn normal_quantile(p: f64) -> f64 {
    const A: [f64; 6] = [
        -3.969683028665376e+01,
        2.209460984245205e+02,
        -2.759285104469687e+02,
        1.383577518672690e+02,
        -3.066479806614716e+01,
        2.506628277459239e+00,
    ];
    const B: [f64; 5] = [
        -5.447609879822406e+01,
        1.615858368580409e+02,
        -1.556989798598866e+02,
        6.680131188771972e+01,
        -1.328068155288572e+01,
    ];
    const C: [f64; 6] = [
        -7.784894002430293e-03,
        -3.223964580411365e-01,
        -2.400758277161838e+00,
        -2.549732539343734e+00,
        4.374664141464968e+00,
        2.938163982698783e+00,
    ];
    const D: [f64; 4] = [
        7.784695709041462e-03,
        3.224671290700398e-01,
        2.445134137142996e+00,
        3.754408661907416e+00,
    ];
    const P_LOW: f64 = 0.02425;

    if p < P_LOW {
        let q = (-2.0 * p.ln()).sqrt();
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    } else if p <= 1.0 - P_LOW {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        let q = (-2.0 * (1.0 - p).ln()).sqrt();
        -(((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    }
}
