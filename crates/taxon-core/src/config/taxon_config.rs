//! Top-level taxon configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{BalanceMeasure, ClassificationConfig, FitnessConfig};
use crate::errors::ConfigError;
use crate::types::MetricKind;

/// Name of the project config file looked up by `TaxonConfig::load`.
pub const PROJECT_CONFIG_FILE: &str = "taxon.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`TAXON_*`)
/// 2. Project config (`taxon.toml` in the given root)
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TaxonConfig {
    pub fitness: FitnessConfig,
    pub classification: ClassificationConfig,
}

impl TaxonConfig {
    /// Load configuration with layered resolution, then validate it.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for kind in MetricKind::ALL {
            if let Some(weight) = self.fitness.weights.slot(kind) {
                if !weight.is_finite() || weight < 0.0 {
                    return Err(ConfigError::ValidationFailed {
                        field: format!("fitness.weights.{}", kind.name()),
                        message: "must be a finite, non-negative number".to_string(),
                    });
                }
            }
        }
        if let Some(limit) = self.fitness.category_upper_limit {
            if limit < 2 {
                return Err(ConfigError::ValidationFailed {
                    field: "fitness.category_upper_limit".to_string(),
                    message: "must be at least 2".to_string(),
                });
            }
        }
        if let Some(ref label) = self.classification.root_label {
            if label.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "classification.root_label".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut TaxonConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: TaxonConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` value.
    fn merge(base: &mut TaxonConfig, other: &TaxonConfig) {
        // Fitness
        for kind in MetricKind::ALL {
            if let Some(weight) = other.fitness.weights.slot(kind) {
                base.fitness.weights.set(kind, weight);
            }
        }
        if other.fitness.balance_measure.is_some() {
            base.fitness.balance_measure = other.fitness.balance_measure;
        }
        if other.fitness.category_upper_limit.is_some() {
            base.fitness.category_upper_limit = other.fitness.category_upper_limit;
        }
        if other.fitness.parallel.is_some() {
            base.fitness.parallel = other.fitness.parallel;
        }

        // Classification
        if other.classification.root_label.is_some() {
            base.classification.root_label = other.classification.root_label.clone();
        }
        if other.classification.emit_rankings.is_some() {
            base.classification.emit_rankings = other.classification.emit_rankings;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `TAXON_BALANCE_MEASURE`, `TAXON_WEIGHT_SUBTREE_BALANCE`, etc.
    /// Unparseable values are ignored.
    fn apply_env_overrides(config: &mut TaxonConfig) {
        for kind in MetricKind::ALL {
            let key = format!("TAXON_WEIGHT_{}", kind.name().to_ascii_uppercase());
            if let Ok(val) = std::env::var(&key) {
                if let Ok(v) = val.parse::<f64>() {
                    config.fitness.weights.set(kind, v);
                }
            }
        }
        if let Ok(val) = std::env::var("TAXON_BALANCE_MEASURE") {
            if let Ok(v) = val.parse::<BalanceMeasure>() {
                config.fitness.balance_measure = Some(v);
            }
        }
        if let Ok(val) = std::env::var("TAXON_CATEGORY_UPPER_LIMIT") {
            if let Ok(v) = val.parse::<usize>() {
                config.fitness.category_upper_limit = Some(v);
            }
        }
        if let Ok(val) = std::env::var("TAXON_PARALLEL") {
            if let Ok(v) = val.parse::<bool>() {
                config.fitness.parallel = Some(v);
            }
        }
        if let Ok(val) = std::env::var("TAXON_ROOT_LABEL") {
            config.classification.root_label = Some(val);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}
