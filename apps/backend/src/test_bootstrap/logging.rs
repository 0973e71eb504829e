#![cfg(test)]

//! Logging for unit tests, installed once per test binary by the crate's
//! `ctor` hook. Integration tests use `backend_test_support::logging`.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Install a test-writer subscriber once. Level comes from `TEST_LOG`, then
/// `RUST_LOG`, else `warn`.
///
/// ```bash
/// TEST_LOG=debug cargo test -p games-backend
/// ```
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}
