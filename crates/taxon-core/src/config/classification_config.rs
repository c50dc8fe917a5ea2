//! Classification engine configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the recursive classification driver.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ClassificationConfig {
    /// Label of the root branch. Default: "Classification".
    pub root_label: Option<String>,
    /// Emit a `SchemesRankedEvent` for every ranking. Default: true.
    pub emit_rankings: Option<bool>,
}

impl ClassificationConfig {
    pub fn effective_root_label(&self) -> &str {
        self.root_label.as_deref().unwrap_or("Classification")
    }

    pub fn effective_emit_rankings(&self) -> bool {
        self.emit_rankings.unwrap_or(true)
    }
}
