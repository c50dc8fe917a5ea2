//! Configuration system for taxon.
//! TOML-based, 3-layer resolution: env > project > defaults.

pub mod classification_config;
pub mod fitness_config;
pub mod taxon_config;

pub use classification_config::ClassificationConfig;
pub use fitness_config::{BalanceMeasure, FitnessConfig, MetricWeights};
pub use taxon_config::TaxonConfig;
