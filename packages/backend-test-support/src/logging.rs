//! Test logging bootstrap.
//!
//! Called once per test binary from a `ctor` hook; later calls are no-ops.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Filter directive: `TEST_LOG`, then `RUST_LOG`, then `warn`.
fn directive() -> String {
    std::env::var("TEST_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "warn".to_string())
}

/// Install a quiet, test-captured subscriber.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        // Another subscriber may already be installed; keep it.
        let _ = fmt()
            .with_env_filter(EnvFilter::new(directive()))
            .with_test_writer()
            .without_time()
            .try_init();
    });
}
