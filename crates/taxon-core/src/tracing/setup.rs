//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter directives.
pub const LOG_ENV_VAR: &str = "TAXON_LOG";

/// Initialize the taxon tracing/logging system.
///
/// Reads `TAXON_LOG` for per-target log levels, e.g.
/// `TAXON_LOG=taxon_analysis=debug,taxon_core=warn`.
/// Falls back to `taxon=info` if unset or invalid.
///
/// Idempotent: only the first call installs a subscriber.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new("taxon=info"));

        // A host application may already own the global subscriber.
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_line_number(true))
            .with(filter)
            .try_init();
    });
}
