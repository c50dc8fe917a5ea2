//! FitnessCalculator: scores schemes against a population and ranks them.

use std::time::Instant;

use rayon::prelude::*;
use taxon_core::config::{FitnessConfig, MetricWeights};
use taxon_core::errors::ClassificationError;
use taxon_core::tracing::metrics::RANK_TIME_US;
use taxon_core::types::{MetricKind, Population, Scheme, Universe};

use super::context::EvaluationContext;
use super::metrics::{self, MetricSettings};
use super::types::{FitnessResult, MetricValues};

/// Scores schemes against a population.
///
/// Holds configuration only; every `rank` call starts from scratch.
#[derive(Debug, Clone)]
pub struct FitnessCalculator {
    weights: MetricWeights,
    settings: MetricSettings,
    parallel: bool,
}

impl FitnessCalculator {
    pub fn new(config: &FitnessConfig) -> Self {
        Self {
            weights: config.weights.clone(),
            settings: MetricSettings::from_config(config),
            parallel: config.effective_parallel(),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(&FitnessConfig::default())
    }

    pub fn settings(&self) -> &MetricSettings {
        &self.settings
    }

    /// Evaluate every metric for `scheme` and combine them.
    ///
    /// A scheme with zero coverage or zero subtree balance gets fitness 0
    /// regardless of its other metrics.
    pub fn evaluate(
        &self,
        scheme: &Scheme,
        ctx: &EvaluationContext<'_>,
    ) -> Result<FitnessResult, ClassificationError> {
        let mut values = MetricValues::default();
        let mut fitness = 0.0;

        for kind in MetricKind::ALL {
            let value = metrics::evaluate(kind, scheme, ctx, &self.settings);
            if !value.is_finite() {
                return Err(ClassificationError::NonFiniteFitness {
                    scheme: scheme.name.clone(),
                    metric: kind,
                });
            }
            values.set(kind, value);
            fitness += self.weights.get(kind) * value;
        }

        if values.get(MetricKind::Coverage) == 0.0 || values.get(MetricKind::SubtreeBalance) == 0.0 {
            fitness = 0.0;
        }

        Ok(FitnessResult {
            scheme: scheme.id,
            scheme_name: scheme.name.clone(),
            metrics: values,
            fitness,
            normalized_fitness: 0.0,
        })
    }

    /// Rank `schemes` against `population`, best first.
    ///
    /// The sort is stable: equal fitness keeps input order.
    pub fn rank(
        &self,
        schemes: &[&Scheme],
        universe: &Universe,
        population: &Population,
    ) -> Result<Vec<FitnessResult>, ClassificationError> {
        let started = Instant::now();
        let ctx = EvaluationContext::new(universe, population);

        let mut results: Vec<FitnessResult> = if self.parallel && schemes.len() > 1 {
            schemes
                .par_iter()
                .map(|scheme| self.evaluate(scheme, &ctx))
                .collect::<Result<_, _>>()?
        } else {
            schemes
                .iter()
                .map(|scheme| self.evaluate(scheme, &ctx))
                .collect::<Result<_, _>>()?
        };

        results.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
        normalize(&mut results);

        tracing::debug!(
            schemes = results.len(),
            population = population.len(),
            metric = RANK_TIME_US,
            value = started.elapsed().as_micros() as u64,
            "ranked schemes"
        );
        for result in &results {
            tracing::trace!(
                scheme = %result.scheme_name,
                fitness = result.fitness,
                normalized = result.normalized_fitness,
                coverage = result.metrics.get(MetricKind::Coverage),
                potential_usage = result.metrics.get(MetricKind::PotentialUsage),
                category_count = result.metrics.get(MetricKind::CategoryCount),
                subtree_balance = result.metrics.get(MetricKind::SubtreeBalance),
                "fitness"
            );
        }

        Ok(results)
    }
}

impl Default for FitnessCalculator {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Assign rank-based normalized fitness to results sorted best first.
///
/// Position `i` of `n` maps to `1 - i / (n - 1)`, so the best result has 1
/// and the worst 0. A result whose fitness equals its predecessor's keeps
/// the predecessor's value. A single result gets 1.
pub fn normalize(results: &mut [FitnessResult]) {
    let n = results.len();
    match n {
        0 => return,
        1 => {
            results[0].normalized_fitness = 1.0;
            return;
        }
        _ => {}
    }

    let denominator = (n - 1) as f64;
    let mut plateau: Option<(f64, f64)> = None;
    for (position, result) in results.iter_mut().enumerate() {
        let normalized = match plateau {
            Some((fitness, value)) if fitness == result.fitness => value,
            _ => 1.0 - position as f64 / denominator,
        };
        result.normalized_fitness = normalized;
        plateau = Some((result.fitness, normalized));
    }
}
