//! EventDispatcher: synchronous event dispatch with zero overhead when empty.

use std::sync::Arc;

use super::handler::TaxonEventHandler;
use super::types::*;

/// Synchronous event dispatcher wrapping a list of handlers.
///
/// Handlers receive events in registration order.
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn TaxonEventHandler>>,
}

impl EventDispatcher {
    /// Create a new empty dispatcher.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Create a dispatcher with a single handler.
    pub fn with_handler(handler: Arc<dyn TaxonEventHandler>) -> Self {
        let mut dispatcher = Self::new();
        dispatcher.register(handler);
        dispatcher
    }

    /// Register an event handler.
    pub fn register(&mut self, handler: Arc<dyn TaxonEventHandler>) {
        self.handlers.push(handler);
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Emit an event to all registered handlers.
    /// Handlers that panic are caught and do not prevent subsequent handlers
    /// from receiving the event.
    fn emit<F: Fn(&dyn TaxonEventHandler)>(&self, f: F) {
        for (index, handler) in self.handlers.iter().enumerate() {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                tracing::error!(handler = index, "event handler panicked");
            }
        }
    }

    // ---- Tree ----
    pub fn emit_branch_entered(&self, event: &BranchEnteredEvent) {
        self.emit(|h| h.on_branch_entered(event));
    }

    pub fn emit_leaf(&self, event: &LeafEvent) {
        self.emit(|h| h.on_leaf(event));
    }

    pub fn emit_branch_exited(&self, event: &BranchExitedEvent) {
        self.emit(|h| h.on_branch_exited(event));
    }

    // ---- Diagnostics ----
    pub fn emit_scheme_selected(&self, event: &SchemeSelectedEvent) {
        self.emit(|h| h.on_scheme_selected(event));
    }

    pub fn emit_schemes_ranked(&self, event: &SchemesRankedEvent) {
        self.emit(|h| h.on_schemes_ranked(event));
    }

    // ---- Data quality ----
    pub fn emit_duplicate_membership(&self, event: &DuplicateMembershipEvent) {
        self.emit(|h| h.on_duplicate_membership(event));
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
