//! Logging setup.
//!
//! The library only emits `tracing` events; binaries and tests install a
//! subscriber here. Level filtering follows `RUST_LOG` (default `info`),
//! e.g. `RUST_LOG=u_roster=debug` to see individual mutations.

use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global fmt subscriber, writing to stderr.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Installs a verbose subscriber for tests. Safe to call repeatedly.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
