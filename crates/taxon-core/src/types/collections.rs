//! Re-exports of collection types used across the engine.

pub use rustc_hash::FxHashMap;
pub use std::collections::BTreeSet;

use super::identifiers::ItemId;

/// A set of items under classification.
///
/// Ordered by `ItemId`, which is universe insertion order, so iteration
/// (and leaf emission) is deterministic.
pub type Population = BTreeSet<ItemId>;
