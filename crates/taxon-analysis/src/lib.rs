//! taxon-analysis: greedy hierarchical taxonomy inference.
//!
//! - Statistics: occurrence totals, coverage, dispersion, balance scores
//! - Fitness: four metrics per scheme, weighted, ranked and normalized
//! - Classification: recursive best-scheme selection emitting tree events

pub mod classification;
pub mod fitness;
pub mod statistics;

pub use classification::{ClassificationSummary, Classifier, TreeNode, TreeRecorder};
pub use fitness::{EvaluationContext, FitnessCalculator, FitnessResult, MetricValues};
