//! Test utilities for cartridge-module-utils
//!
//! Helpers for unit and integration tests:
//! - [`init_test_logging`] to see `tracing` output while a test runs
//! - [`TestProjectBuilder`] to lay out a throwaway host project with a module
//!   installed under `node_modules/`
//! - [`RecordingReporter`] to assert on the lines a lifecycle step prints
//!
//! # Example
//!
//! ```rust,no_run
//! use cartridge_module_utils::test_utils::TestProjectBuilder;
//!
//! let project = TestProjectBuilder::new().build().unwrap();
//! assert!(project.exists(".cartridgerc"));
//! ```

pub mod builder;
pub mod reporter;

pub use builder::{TestProject, TestProjectBuilder};
pub use reporter::RecordingReporter;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses `level` when given, otherwise
/// `RUST_LOG`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}
