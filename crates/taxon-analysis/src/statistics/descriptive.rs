//! Descriptive statistics via `statrs`.
//!
//! Standard deviation is the bias-corrected sample estimator (n - 1
//! denominator). Fewer than two values have no spread and report 0.

use statrs::statistics::Statistics;
use taxon_core::types::{ItemId, Universe};

/// Standard deviations below this are treated as a flat distribution.
pub const FLATNESS_EPSILON: f64 = 1e-6;

/// Sum of occurrence counts of `items`.
pub fn occurrence_total<'a>(
    universe: &Universe,
    items: impl IntoIterator<Item = &'a ItemId>,
) -> u64 {
    items.into_iter().map(|&id| universe.occurrences(id)).sum()
}

/// Arithmetic mean. Empty input yields 0.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().mean()
}

/// Sample standard deviation. Fewer than two values yield 0.
pub fn standard_deviation(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let sd = values.iter().std_dev();
    if sd.is_finite() {
        sd
    } else {
        0.0
    }
}
