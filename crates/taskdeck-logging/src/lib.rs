//! # taskdeck-logging
//!
//! Structured logging with `tracing` for the taskdeck binary. Library
//! crates only emit events; the subscriber is installed once here, at
//! process start.

#![deny(unsafe_code)]

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// Default level is `info`, raised to `debug` for taskdeck crates when
/// `verbose` is set. An explicit `RUST_LOG` wins over both. Logs go to
/// stderr so command output on stdout stays pipeable. Repeated calls
/// keep the first subscriber.
pub fn init(verbose: bool) {
    let default_directive = if verbose { "info,taskdeck=debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .try_init();
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
