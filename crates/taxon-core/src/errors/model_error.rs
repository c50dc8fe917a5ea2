//! Universe construction errors.

use super::error_code::{self, TaxonErrorCode};

/// Malformed input detected while building a `Universe`.
/// Fatal to the classification run.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Item universe is empty")]
    EmptyUniverse,

    #[error("Scheme {scheme} has no categories")]
    EmptyScheme { scheme: String },

    #[error("Item {name} is registered more than once")]
    DuplicateItem { name: String },

    #[error("Unknown item {item} referenced by {scheme}:{category}")]
    UnknownItem {
        item: String,
        scheme: String,
        category: String,
    },

    #[error("Invalid membership column {column:?}: expected scheme:category")]
    InvalidMembershipColumn { column: String },

    #[error("Total occurrences overflow u64 at item {item}")]
    OccurrenceOverflow { item: String },
}

impl TaxonErrorCode for ModelError {
    fn error_code(&self) -> &'static str {
        error_code::MODEL_ERROR
    }
}
