//! Domain model for classification.
//! Items, categories, schemes and the universe that owns them.

pub mod collections;
pub mod identifiers;
pub mod metric;
pub mod model;
pub mod universe;

pub use collections::{FxHashMap, Population};
pub use identifiers::{ItemId, SchemeId};
pub use metric::MetricKind;
pub use model::{Category, DuplicateMembership, Item, Scheme};
pub use universe::{MembershipColumn, Universe, UniverseBuilder};
