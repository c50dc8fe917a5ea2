//! Event system for taxon.
//! Trait with no-op defaults, synchronous dispatch, zero overhead when empty.
//!
//! The classification tree is never materialized inside the engine; it is
//! streamed to handlers as enter / leaf / exit events in pre-order.

pub mod dispatcher;
pub mod handler;
pub mod types;

pub use dispatcher::EventDispatcher;
pub use handler::TaxonEventHandler;
