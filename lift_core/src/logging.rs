//! Tracing setup for the `liftlog` binary.
//!
//! Storage faults that the repository recovers from (a corrupt
//! `trainingRecords.json`, an unreadable `savedExercises.json`) are reported
//! as warnings, so the default level shows them while keeping per-set debug
//! output quiet.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log recovered faults and errors to stderr.
///
/// Command output goes to stdout, so tables and CSV paths stay pipeable.
/// Set `RUST_LOG=lift_core=debug` to trace every load, upsert and save.
pub fn init() {
    init_with_level("warn")
}

/// Same as [`init`] with a different fallback level; `RUST_LOG` still wins
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

/// Route repository and storage logs into the test harness output
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("lift_core=debug"))
        .try_init();
}
