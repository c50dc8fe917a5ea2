//! Classification run errors.
//! Aggregates subsystem errors via `From` conversions.

use super::error_code::{self, TaxonErrorCode};
use super::{ConfigError, ModelError};
use crate::types::MetricKind;

/// Errors that abort a classification run. There is no partial-result
/// recovery: callers fix the input and re-run from the start.
#[derive(Debug, thiserror::Error)]
pub enum ClassificationError {
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Metric {metric} produced a non-finite value for scheme {scheme}")]
    NonFiniteFitness { scheme: String, metric: MetricKind },
}

impl TaxonErrorCode for ClassificationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Model(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::NonFiniteFitness { .. } => error_code::CLASSIFICATION_ERROR,
        }
    }
}
