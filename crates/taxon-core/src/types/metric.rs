//! The closed set of fitness metric kinds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the four fitness metrics a scheme is scored on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Fraction of the population a scheme classifies.
    Coverage,
    /// Fraction of the population's occurrence mass a scheme classifies.
    PotentialUsage,
    /// Preference for a moderate number of categories.
    CategoryCount,
    /// Evenness of the population split across categories.
    SubtreeBalance,
}

impl MetricKind {
    /// All metric kinds in evaluation order.
    pub const ALL: [MetricKind; 4] = [
        MetricKind::Coverage,
        MetricKind::PotentialUsage,
        MetricKind::CategoryCount,
        MetricKind::SubtreeBalance,
    ];

    /// Stable snake_case name, used for config keys and env vars.
    pub fn name(self) -> &'static str {
        match self {
            Self::Coverage => "coverage",
            Self::PotentialUsage => "potential_usage",
            Self::CategoryCount => "category_count",
            Self::SubtreeBalance => "subtree_balance",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
