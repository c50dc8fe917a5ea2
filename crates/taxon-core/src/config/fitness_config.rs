//! Fitness calculator configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::MetricKind;

/// Default category count above which the category-count metric saturates.
pub const DEFAULT_CATEGORY_UPPER_LIMIT: usize = 10;

/// Which statistic drives the subtree-balance metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceMeasure {
    /// Probability mass within ±1 of the mean of a fitted normal distribution.
    #[default]
    Normal,
    /// Square root of the chi-square goodness-of-fit p-value against an even split.
    ChiSquare,
}

impl FromStr for BalanceMeasure {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "chi_square" | "chi-square" | "chisquare" => Ok(Self::ChiSquare),
            other => Err(format!("unknown balance measure: {other}")),
        }
    }
}

impl fmt::Display for BalanceMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => f.write_str("normal"),
            Self::ChiSquare => f.write_str("chi_square"),
        }
    }
}

/// Optional per-metric weights. Missing weights default to 1.0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricWeights {
    pub coverage: Option<f64>,
    pub potential_usage: Option<f64>,
    pub category_count: Option<f64>,
    pub subtree_balance: Option<f64>,
}

impl MetricWeights {
    /// Returns the configured weight for `kind`, defaulting to 1.0.
    pub fn get(&self, kind: MetricKind) -> f64 {
        self.slot(kind).unwrap_or(1.0)
    }

    pub fn set(&mut self, kind: MetricKind, weight: f64) {
        *self.slot_mut(kind) = Some(weight);
    }

    pub fn slot(&self, kind: MetricKind) -> Option<f64> {
        match kind {
            MetricKind::Coverage => self.coverage,
            MetricKind::PotentialUsage => self.potential_usage,
            MetricKind::CategoryCount => self.category_count,
            MetricKind::SubtreeBalance => self.subtree_balance,
        }
    }

    fn slot_mut(&mut self, kind: MetricKind) -> &mut Option<f64> {
        match kind {
            MetricKind::Coverage => &mut self.coverage,
            MetricKind::PotentialUsage => &mut self.potential_usage,
            MetricKind::CategoryCount => &mut self.category_count,
            MetricKind::SubtreeBalance => &mut self.subtree_balance,
        }
    }
}

/// Configuration for scheme fitness evaluation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FitnessConfig {
    /// Per-metric weights applied before summing.
    pub weights: MetricWeights,
    /// Statistic behind the subtree-balance metric. Default: normal.
    pub balance_measure: Option<BalanceMeasure>,
    /// Category count at which the category-count metric saturates. Default: 10.
    pub category_upper_limit: Option<usize>,
    /// Evaluate schemes on the rayon pool. Default: true.
    pub parallel: Option<bool>,
}

impl FitnessConfig {
    pub fn effective_balance_measure(&self) -> BalanceMeasure {
        self.balance_measure.unwrap_or_default()
    }

    pub fn effective_category_upper_limit(&self) -> usize {
        self.category_upper_limit
            .unwrap_or(DEFAULT_CATEGORY_UPPER_LIMIT)
    }

    pub fn effective_parallel(&self) -> bool {
        self.parallel.unwrap_or(true)
    }
}
