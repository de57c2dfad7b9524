//! Shared helpers for config reader integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use config_reader::{ConfigReader, LoadFailure, LoaderOptions, Logger};

/// Logger that keeps every warning it receives.
#[derive(Clone, Default)]
pub struct RecordingLogger {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingLogger {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Logger for RecordingLogger {
    fn warn(&self, failure: &LoadFailure) {
        self.messages.lock().unwrap().push(failure.to_string());
    }
}

/// Build a reader whose warnings and callback invocations are observable.
pub fn observed_reader(options: LoaderOptions) -> (ConfigReader, RecordingLogger, Arc<AtomicUsize>) {
    let logger = RecordingLogger::default();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let reader = options
        .with_logger(Arc::new(logger.clone()))
        .with_error_callback(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .build()
        .expect("options should be valid");
    (reader, logger, calls)
}

pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("failed to write fixture");
    path
}
