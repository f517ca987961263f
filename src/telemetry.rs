//! Tracing subscriber bootstrap.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the tracing filter directives.
pub const LOG_FILTER_VAR: &str = "GARDENKEEP_LOG";

/// Installs a formatted tracing subscriber for the process.
///
/// Filter directives come from `GARDENKEEP_LOG`, falling back to
/// `default_filter` (for example `"gardenkeep=info"`). Returns `false` when a
/// global subscriber was already installed, which leaves it in place.
#[must_use]
pub fn init_tracing(default_filter: &str) -> bool {
    let filter = EnvFilter::try_from_env(LOG_FILTER_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}
