//! Error policy: the single place failures are turned into outcomes.
//!
//! Responsibilities:
//! - Parse and represent the error handling mode (`throw`, `warn`, `silent`).
//! - Invoke the optional failure callback once per failure.
//! - Raise, log-and-substitute, or silently substitute the default value.
//!
//! Does NOT handle:
//! - Producing failures (see loader/).
//! - Installing a tracing subscriber; `TracingLogger` only emits events.
//!
//! Invariants:
//! - The callback runs before the mode-specific branch, on every failure.
//! - A panicking callback never aborts reporting.
//! - `observe` never raises; it is used for best-effort cleanup failures.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{LoadFailure, LoaderError, Result};

/// How reported failures are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorMode {
    /// Raise `LoaderError::Reported`.
    #[default]
    Throw,
    /// Log a warning and substitute the default value.
    Warn,
    /// Substitute the default value without logging.
    Silent,
}

impl ErrorMode {
    /// All recognized modes.
    pub const ALL: [ErrorMode; 3] = [ErrorMode::Throw, ErrorMode::Warn, ErrorMode::Silent];

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorMode::Throw => "throw",
            ErrorMode::Warn => "warn",
            ErrorMode::Silent => "silent",
        }
    }
}

impl fmt::Display for ErrorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorMode {
    type Err = LoaderError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ErrorMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| LoaderError::InvalidErrorMode(s.to_string()))
    }
}

/// Warning-level logging capability used in `warn` mode.
pub trait Logger: Send + Sync {
    fn warn(&self, failure: &LoadFailure);
}

/// Default logger: emits a `tracing` warning event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn warn(&self, failure: &LoadFailure) {
        tracing::warn!(
            operation = failure.operation,
            error = %failure.kind,
            "Config load failure"
        );
    }
}

/// Observer invoked with every failure, regardless of mode.
pub type FailureCallback = Arc<dyn Fn(&LoadFailure) + Send + Sync>;

/// Decides what happens when an operation fails.
#[derive(Clone)]
pub struct ErrorPolicy {
    mode: ErrorMode,
    logger: Arc<dyn Logger>,
    default_return: Value,
    callback: Option<FailureCallback>,
}

impl ErrorPolicy {
    pub fn new(
        mode: ErrorMode,
        logger: Arc<dyn Logger>,
        default_return: Value,
        callback: Option<FailureCallback>,
    ) -> Self {
        Self {
            mode,
            logger,
            default_return,
            callback,
        }
    }

    pub fn mode(&self) -> ErrorMode {
        self.mode
    }

    /// Value substituted for failed loads in `warn` and `silent` modes.
    pub fn default_return(&self) -> &Value {
        &self.default_return
    }

    /// Report a failure.
    ///
    /// Returns the default value in `warn` and `silent` modes and
    /// `LoaderError::Reported` in `throw` mode.
    pub fn report(&self, failure: LoadFailure) -> Result<Value> {
        self.notify(&failure);
        match self.mode {
            ErrorMode::Throw => Err(LoaderError::Reported(failure)),
            ErrorMode::Warn => {
                self.logger.warn(&failure);
                Ok(self.default_return.clone())
            }
            ErrorMode::Silent => Ok(self.default_return.clone()),
        }
    }

    /// Report a failure that must not change the outcome of the operation.
    ///
    /// `throw` mode cannot raise here, so it logs like `warn`.
    pub fn observe(&self, failure: &LoadFailure) {
        self.notify(failure);
        match self.mode {
            ErrorMode::Throw | ErrorMode::Warn => self.logger.warn(failure),
            ErrorMode::Silent => {}
        }
    }

    fn notify(&self, failure: &LoadFailure) {
        let Some(callback) = &self.callback else {
            return;
        };
        if panic::catch_unwind(AssertUnwindSafe(|| callback(failure))).is_err() {
            tracing::warn!(
                operation = failure.operation,
                "Failure callback panicked; continuing"
            );
        }
    }
}

impl fmt::Debug for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorPolicy")
            .field("mode", &self.mode)
            .field("default_return", &self.default_return)
            .field("callback", &self.callback.is_some())
            .finish_non_exhaustive()
    }
}
