//! Serializable pipeline configuration.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::model::ModelSpec;

/// Configuration for one forecast run.
///
/// Defaults: history from 2010-01-01 and a 12-period lag window over all
/// four price channels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Earliest bar date requested from the provider.
    pub start_date: NaiveDate,
    /// Lag depth for the derived regressor columns.
    pub lag_depth: usize,
    pub model: ModelSpec,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            start_date: NaiveDate::from_ymd_opt(2010, 1, 1).unwrap(),
            lag_depth: crate::features::DEFAULT_LAG_DEPTH,
            model: ModelSpec::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl ForecastConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }
}
