// src/logging.rs
//! Structured logging setup for binaries.
//!
//! The library only emits `tracing` events; installing a subscriber is left to
//! the embedding program. Output goes to stderr so JSON on stdout stays clean.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter used when `RUST_LOG` is not set.
#[must_use]
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "info,chartsmith=debug,chartsmith_core=debug"
    } else {
        "warn,chartsmith=info,chartsmith_core=info"
    }
}

/// Installs the global subscriber. Later calls are no-ops.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}
