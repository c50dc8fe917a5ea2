//! Per-evaluation context carrying the population and its totals.

use taxon_core::types::{Population, Universe};

use crate::statistics::occurrence_total;

/// Read-only inputs shared by every metric during one ranking.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationContext<'a> {
    pub universe: &'a Universe,
    pub population: &'a Population,
    /// Occurrence total of `population`, computed once.
    pub occurrence_total: u64,
}

impl<'a> EvaluationContext<'a> {
    pub fn new(universe: &'a Universe, population: &'a Population) -> Self {
        Self {
            universe,
            population,
            occurrence_total: occurrence_total(universe, population),
        }
    }

    pub fn population_size(&self) -> usize {
        self.population.len()
    }
}
