//! TaxonErrorCode trait for stable, machine-readable error codes.

/// Every error enum implements this to provide a structured code string
/// for collaborators that cannot match on Rust types.
pub trait TaxonErrorCode {
    /// Returns the error code string (e.g., "MODEL_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const MODEL_ERROR: &str = "MODEL_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const CLASSIFICATION_ERROR: &str = "CLASSIFICATION_ERROR";
