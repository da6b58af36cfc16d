//! Diagnostic logging setup
//!
//! Components emit `tracing` events and never own a writer; the binary
//! installs a subscriber once, tests install their own with
//! `tracing::subscriber::with_default`.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

/// Default filter directive for the given verbosity.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

/// Install the global subscriber: timestamped lines on stderr.
///
/// `RUST_LOG` wins over `verbose` when it is set.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    // try_init: an already-installed subscriber is kept
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}
