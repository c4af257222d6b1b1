//! Structured logging setup.
//!
//! Every log line is a JSON object on stderr carrying an `event` field named
//! `<layer>.<area>.<action>` (e.g. `core.sync.refresh_completed`).

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Install the global JSON subscriber.
///
/// `RUST_LOG` takes precedence. Otherwise quiet mode logs warnings and above,
/// verbose mode logs `info` and above. Calling this twice is harmless: the
/// second installation attempt is ignored.
pub fn init_logging(quiet: bool) {
    let default_directive = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let layer = fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_current_span(false);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init();
}
