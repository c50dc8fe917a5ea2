//! Error handling for taxon.
//! One error enum per subsystem, `thiserror` only.

pub mod classification_error;
pub mod config_error;
pub mod error_code;
pub mod model_error;

pub use classification_error::ClassificationError;
pub use config_error::ConfigError;
pub use error_code::TaxonErrorCode;
pub use model_error::ModelError;
