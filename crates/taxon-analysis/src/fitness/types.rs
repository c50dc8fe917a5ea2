//! Fitness result types.

use taxon_core::events::types::RankedScheme;
use taxon_core::types::{MetricKind, SchemeId};

/// Raw metric values, one slot per `MetricKind`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MetricValues {
    values: [f64; 4],
}

impl MetricValues {
    pub fn get(&self, kind: MetricKind) -> f64 {
        self.values[Self::slot(kind)]
    }

    pub fn set(&mut self, kind: MetricKind, value: f64) {
        self.values[Self::slot(kind)] = value;
    }

    /// `(kind, value)` pairs in `MetricKind::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (MetricKind, f64)> + '_ {
        MetricKind::ALL.iter().map(move |&kind| (kind, self.get(kind)))
    }

    fn slot(kind: MetricKind) -> usize {
        match kind {
            MetricKind::Coverage => 0,
            MetricKind::PotentialUsage => 1,
            MetricKind::CategoryCount => 2,
            MetricKind::SubtreeBalance => 3,
        }
    }
}

/// Fitness of one scheme against one population.
///
/// Lives only as long as the ranking that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct FitnessResult {
    pub scheme: SchemeId,
    pub scheme_name: String,
    /// Unweighted metric values.
    pub metrics: MetricValues,
    /// Weighted sum of metrics, or 0 when the zero-out rule applies.
    pub fitness: f64,
    /// Rank-based score in [0, 1]; the best result has 1.
    pub normalized_fitness: f64,
}

impl FitnessResult {
    /// True when this scheme can be selected to subdivide a population.
    pub fn is_usable(&self) -> bool {
        self.fitness > 0.0
    }

    /// Diagnostic row for `SchemesRankedEvent`.
    pub fn to_ranked(&self) -> RankedScheme {
        RankedScheme {
            scheme: self.scheme_name.clone(),
            fitness: self.fitness,
            normalized_fitness: self.normalized_fitness,
            metrics: self.metrics.iter().collect(),
        }
    }
}
