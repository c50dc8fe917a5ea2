//! Fitness scoring: weighted metric sums with rank normalization.

pub mod calculator;
pub mod context;
pub mod metrics;
pub mod types;

pub use calculator::{normalize, FitnessCalculator};
pub use context::EvaluationContext;
pub use metrics::MetricSettings;
pub use types::{FitnessResult, MetricValues};
