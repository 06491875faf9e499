// system-tests/src/logging.rs
// ============================================================================
// Module: System Test Logging
// Description: One-time tracing subscriber setup for test binaries.
// Purpose: Route harness events to the libtest capture writer.
// Dependencies: tracing-subscriber
// ============================================================================

//! ## Overview
//! Test binaries call [`init_test_logging`] first. Library crates only emit
//! `tracing` events and never install a subscriber.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid.
const DEFAULT_FILTER: &str = "info,storefront_harness=debug";

/// Installs a `fmt` subscriber writing through the test capture writer.
///
/// Honors `RUST_LOG`. Later calls in the same process are no-ops.
pub fn init_test_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_test_writer().try_init();
}
