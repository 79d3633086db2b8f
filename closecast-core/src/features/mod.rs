//! Feature engineering: lag regressors and gap imputation.

pub mod impute;
pub mod lag;

pub use impute::{impute_gaps, ImputedTable, TrainingFrame};
pub use lag::{build_lag_features, Channel, FeatureTable, LagColumn, DEFAULT_LAG_DEPTH};
