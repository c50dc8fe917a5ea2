//! Balance scores over per-category population counts, via `statrs`.
//!
//! Both scores lie in [0, 1] and are higher for more even splits.

use statrs::distribution::{ChiSquared, ContinuousCDF, Normal};
use taxon_core::config::BalanceMeasure;
use taxon_core::types::{Population, Scheme};

use super::coverage::category_counts;
use super::descriptive::{mean, standard_deviation, FLATNESS_EPSILON};

/// Balance of `scheme` over `population` using the configured measure.
pub fn balance(measure: BalanceMeasure, scheme: &Scheme, population: &Population) -> f64 {
    match measure {
        BalanceMeasure::Normal => normal_balance(scheme, population),
        BalanceMeasure::ChiSquare => chi_square_balance(scheme, population),
    }
}

/// Chi-square balance of `scheme` over `population`.
///
/// Higher means more balanced. This is the reverse of an imbalance score,
/// so callers must not invert it; the subtree-balance metric uses it as is.
/// Empty categories are dropped; a chi-square cell needs a non-zero count.
pub fn chi_square_balance(scheme: &Scheme, population: &Population) -> f64 {
    chi_square_score(&category_counts(scheme, population, false))
}

/// Square root of the chi-square goodness-of-fit p-value of `observed`
/// against a uniform expectation (every cell equal to the mean).
///
/// Non-positive cells are ignored. Fewer than two cells leave nothing to
/// contrast and score 1.
pub fn chi_square_score(observed: &[f64]) -> f64 {
    let cells: Vec<f64> = observed.iter().copied().filter(|&v| v > 0.0).collect();
    if cells.len() < 2 {
        return 1.0;
    }

    let expected = mean(&cells);
    let statistic: f64 = cells
        .iter()
        .map(|&o| (o - expected).powi(2) / expected)
        .sum();
    if statistic <= 0.0 {
        return 1.0;
    }

    let freedom = (cells.len() - 1) as f64;
    match ChiSquared::new(freedom) {
        Ok(dist) => {
            let p = dist.sf(statistic);
            if p.is_finite() {
                p.clamp(0.0, 1.0).sqrt()
            } else {
                0.0
            }
        }
        Err(_) => 0.0,
    }
}

/// Normal-distribution balance of `scheme` over `population`.
/// Empty categories count as zeros.
pub fn normal_balance(scheme: &Scheme, population: &Population) -> f64 {
    normal_score(&category_counts(scheme, population, true))
}

/// Probability mass within ±1 of the mean of a normal distribution fitted
/// to `values`.
///
/// The window is a fixed ±1, not ±1 standard deviation. A flat
/// distribution scores 1.
pub fn normal_score(values: &[f64]) -> f64 {
    let sd = standard_deviation(values);
    if sd < FLATNESS_EPSILON {
        return 1.0;
    }
    let mu = mean(values);
    match Normal::new(mu, sd) {
        Ok(dist) => {
            let mass = dist.cdf(mu + 1.0) - dist.cdf(mu - 1.0);
            if mass.is_finite() {
                mass.clamp(0.0, 1.0)
            } else {
                0.0
            }
        }
        Err(_) => 0.0,
    }
}
