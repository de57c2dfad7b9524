//! Tests for config loading.
//!
//! Responsibilities:
//! - Test single-file loading, raw-text fallback and removal.
//! - Test strict structured parsing.
//! - Test ordered and keyed batches and request dispatch.
//! - Test environment variable overrides.
//!
//! Invariants:
//! - Fixtures live in `tempfile` directories and are addressed by absolute path.
//! - Tests touching the environment or the working directory use `serial_test`
//!   and `global_test_lock()`.

use std::sync::{Arc, Mutex};

use crate::loader::ConfigReader;
use crate::options::LoaderOptions;
use crate::test_util::{CountingCallback, RecordingLogger};

pub mod env_tests;
pub mod strict_tests;

/// Returns the global test lock for environment and working-directory isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// A reader wired to a recording logger and a counting callback.
pub struct Harness {
    pub reader: ConfigReader,
    pub logger: RecordingLogger,
    pub callback: CountingCallback,
}

pub fn harness(options: LoaderOptions) -> Harness {
    let logger = RecordingLogger::default();
    let callback = CountingCallback::default();
    let reader = options
        .with_logger(Arc::new(logger.clone()))
        .with_shared_callback(callback.callback())
        .build()
        .unwrap();

    Harness {
        reader,
        logger,
        callback,
    }
}
