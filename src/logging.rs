//! Diagnostic logging for the `pace` binary.
//!
//! Output goes to stderr so it never mixes with command output on stdout.
//! The filter is read from `PACE_LOG` using `RUST_LOG` syntax.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "PACE_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber. Safe to call more than once.
pub fn init() {
    let filter = build_filter(std::env::var(LOG_ENV).ok().as_deref());
    // A subscriber may already be installed (tests, embedding); keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// The filter for a `PACE_LOG` value, falling back to warnings only when the
/// value is missing or malformed.
fn build_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}
