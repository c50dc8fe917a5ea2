//! TaxonEventHandler trait, all methods with no-op defaults.

use super::types::*;

/// Trait for handling classification events.
///
/// All methods have no-op default implementations, so handlers only need
/// to override the events they care about. Tree events arrive in pre-order:
/// an entered branch, its leaves and child branches, then its exit.
pub trait TaxonEventHandler: Send + Sync {
    // ---- Tree ----
    fn on_branch_entered(&self, _event: &BranchEnteredEvent) {}
    fn on_leaf(&self, _event: &LeafEvent) {}
    fn on_branch_exited(&self, _event: &BranchExitedEvent) {}

    // ---- Diagnostics ----
    fn on_scheme_selected(&self, _event: &SchemeSelectedEvent) {}
    fn on_schemes_ranked(&self, _event: &SchemesRankedEvent) {}

    // ---- Data quality ----
    fn on_duplicate_membership(&self, _event: &DuplicateMembershipEvent) {}
}
