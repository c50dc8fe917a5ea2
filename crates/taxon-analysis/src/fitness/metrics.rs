//! The four fitness metrics. Each is a pure function of a scheme and the
//! evaluation context.

use taxon_core::config::{BalanceMeasure, FitnessConfig};
use taxon_core::types::{MetricKind, Scheme};

use super::context::EvaluationContext;
use crate::statistics::{balance, coverage, occurrence_total};

/// Tunables consumed by the metrics.
#[derive(Debug, Clone, Copy)]
pub struct MetricSettings {
    pub category_upper_limit: usize,
    pub balance_measure: BalanceMeasure,
}

impl MetricSettings {
    pub fn from_config(config: &FitnessConfig) -> Self {
        Self {
            category_upper_limit: config.effective_category_upper_limit(),
            balance_measure: config.effective_balance_measure(),
        }
    }
}

impl Default for MetricSettings {
    fn default() -> Self {
        Self::from_config(&FitnessConfig::default())
    }
}

/// Evaluate one metric kind.
pub fn evaluate(
    kind: MetricKind,
    scheme: &Scheme,
    ctx: &EvaluationContext<'_>,
    settings: &MetricSettings,
) -> f64 {
    match kind {
        MetricKind::Coverage => coverage_metric(scheme, ctx),
        MetricKind::PotentialUsage => potential_usage_metric(scheme, ctx),
        MetricKind::CategoryCount => {
            category_count_metric(scheme.category_count(), settings.category_upper_limit)
        }
        MetricKind::SubtreeBalance => {
            subtree_balance_metric(scheme, ctx, settings.balance_measure)
        }
    }
}

/// Fraction of the population classified by `scheme`, in [0, 1].
/// An empty population scores 0.
pub fn coverage_metric(scheme: &Scheme, ctx: &EvaluationContext<'_>) -> f64 {
    if ctx.population.is_empty() {
        return 0.0;
    }
    let covered = coverage(scheme, ctx.population).len();
    (covered as f64 / ctx.population.len() as f64).min(1.0)
}

/// Fraction of the population's occurrence mass classified by `scheme`,
/// in [0, 1]. A population with no occurrences scores 0.
pub fn potential_usage_metric(scheme: &Scheme, ctx: &EvaluationContext<'_>) -> f64 {
    if ctx.occurrence_total == 0 {
        return 0.0;
    }
    let covered = occurrence_total(ctx.universe, &coverage(scheme, ctx.population));
    (covered as f64 / ctx.occurrence_total as f64).min(1.0)
}

/// Category-count score for a scheme with `count` categories.
///
/// - fewer than 2 categories: 0
/// - `upper_limit` or more: `(upper_limit - 1) / upper_limit`
/// - otherwise: `(upper_limit - count + 2) / upper_limit`
pub fn category_count_metric(count: usize, upper_limit: usize) -> f64 {
    let u = upper_limit as f64;
    if count < 2 {
        0.0
    } else if count >= upper_limit {
        (u - 1.0) / u
    } else {
        (u - count as f64 + 2.0) / u
    }
}

/// Evenness of the population split across categories, in [0, 1].
///
/// Both balance measures report `1 - imbalance` directly.
pub fn subtree_balance_metric(
    scheme: &Scheme,
    ctx: &EvaluationContext<'_>,
    measure: BalanceMeasure,
) -> f64 {
    balance(measure, scheme, ctx.population).clamp(0.0, 1.0)
}
