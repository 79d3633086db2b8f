//! Closecast Core — next-trading-day closing-price forecast pipeline.
//!
//! This crate contains everything algorithmic:
//! - Domain types (bars, placeholder-bearing series)
//! - Data providers (Yahoo Finance, CSV import, synthetic) behind one trait
//! - Trading-calendar target-date resolution
//! - Lag feature engineering and gap imputation
//! - Additive regression-with-seasonality model with lag regressors
//! - Historical fit-quality metrics (MAPE, R², accuracy)
//! - The orchestrator composing the stages into one `forecast()` call
//!
//! Web routing, templating and plot rendering are downstream collaborators
//! that consume `ForecastReport`; nothing here renders or serves.

pub mod calendar;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod features;
pub mod metrics;
pub mod model;
pub mod pipeline;

pub use config::ForecastConfig;
pub use error::ForecastError;
pub use pipeline::{ForecastReport, Forecaster, RangeHint};
