//! taxon-core: shared foundation for the taxon classification engine.
//!
//! - Types: items, categories, schemes and the resident item universe
//! - Errors: one `thiserror` enum per subsystem
//! - Config: TOML-based, layered resolution (env > project > defaults)
//! - Events: tree output and ranking diagnostics via a handler trait
//! - Tracing: `tracing-subscriber` setup and shared span field names

pub mod config;
pub mod errors;
pub mod events;
pub mod tracing;
pub mod types;

pub use config::TaxonConfig;
pub use errors::{ClassificationError, ConfigError, ModelError};
pub use events::{EventDispatcher, TaxonEventHandler};
pub use types::{Category, Item, ItemId, MetricKind, Population, Scheme, SchemeId, Universe};
