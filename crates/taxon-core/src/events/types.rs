//! Event payload types.

use crate::types::MetricKind;

/// Payload for `on_branch_entered`: `enter(label, size, weight)`.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchEnteredEvent {
    pub label: String,
    pub depth: usize,
    pub population_size: usize,
    pub population_weight: u64,
}

/// Payload for `on_leaf`: `leaf(name, weight)`.
#[derive(Debug, Clone, PartialEq)]
pub struct LeafEvent {
    pub name: String,
    pub occurrences: u64,
    pub depth: usize,
}

/// Payload for `on_branch_exited`: `exit()`.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchExitedEvent {
    pub label: String,
    pub depth: usize,
}

/// Payload for `on_scheme_selected`.
/// Emitted when a scheme is chosen to subdivide a population.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemeSelectedEvent {
    pub scheme: String,
    pub depth: usize,
    pub population_size: usize,
    pub population_weight: u64,
}

/// One row of a ranking: a scheme with its scores.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedScheme {
    pub scheme: String,
    pub fitness: f64,
    pub normalized_fitness: f64,
    pub metrics: Vec<(MetricKind, f64)>,
}

/// Payload for `on_schemes_ranked`.
/// Rankings are ordered best first.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemesRankedEvent {
    pub depth: usize,
    pub population_size: usize,
    pub rankings: Vec<RankedScheme>,
}

/// Payload for `on_duplicate_membership`.
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateMembershipEvent {
    pub scheme: String,
    pub item: String,
    pub first_category: String,
    pub duplicate_category: String,
}
