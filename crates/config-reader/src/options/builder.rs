//! Builder for `ConfigReader`.
//!
//! Responsibilities:
//! - Collect options from builder methods, `LoaderSettings` and the environment.
//! - Validate the error mode and encoding label and build the reader.
//!
//! Does NOT handle:
//! - Environment variable parsing (delegated to env.rs).
//!
//! Invariants / Assumptions:
//! - An unrecognized error mode always fails `build()`; it is never routed
//!   through the error policy because the policy does not exist yet.

use std::fmt;
use std::sync::Arc;

use encoding_rs::Encoding;
use serde_json::Value;

use super::LoaderSettings;
use super::env::apply_env;
use crate::constants::{
    DEFAULT_ENCODING, DEFAULT_ERROR_MODE, DEFAULT_FORCE_JSON, DEFAULT_REMOVE_READ,
    DEFAULT_REQUIRE_ENABLED,
};
use crate::error::{LoadFailure, LoaderError};
use crate::loader::{ConfigReader, ReaderConfig};
use crate::policy::{ErrorMode, ErrorPolicy, FailureCallback, Logger, TracingLogger};

/// Options for building a `ConfigReader`.
#[derive(Default)]
pub struct LoaderOptions {
    errors: Option<String>,
    logger: Option<Arc<dyn Logger>>,
    remove_read: Option<bool>,
    default_return: Option<Value>,
    read_options: Option<String>,
    force_json: Option<bool>,
    require_enabled: Option<bool>,
    error_callback: Option<FailureCallback>,
}

impl LoaderOptions {
    /// Create options with every value at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the error handling mode.
    pub fn with_errors(mut self, mode: ErrorMode) -> Self {
        self.errors = Some(mode.as_str().to_string());
        self
    }

    /// Set the error handling mode by name. Validated in `build()`.
    pub fn with_errors_str(mut self, mode: impl Into<String>) -> Self {
        self.errors = Some(mode.into());
        self
    }

    /// Set the logger used in `warn` mode.
    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Set whether files are deleted after being read.
    pub fn with_remove_read(mut self, remove: bool) -> Self {
        self.remove_read = Some(remove);
        self
    }

    /// Set the value substituted for failed loads.
    pub fn with_default_return(mut self, value: Value) -> Self {
        self.default_return = Some(value);
        self
    }

    /// Set the encoding label used to decode file contents.
    pub fn with_read_options(mut self, encoding: impl Into<String>) -> Self {
        self.read_options = Some(encoding.into());
        self
    }

    /// Disable the raw-text fallback when structured parsing fails.
    pub fn with_force_json(mut self, force: bool) -> Self {
        self.force_json = Some(force);
        self
    }

    /// Enable or disable structured interpretation.
    pub fn with_require_enabled(mut self, enabled: bool) -> Self {
        self.require_enabled = Some(enabled);
        self
    }

    /// Set a callback invoked with every failure.
    pub fn with_error_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&LoadFailure) + Send + Sync + 'static,
    {
        self.error_callback = Some(Arc::new(callback));
        self
    }

    /// Set an already shared failure callback.
    pub fn with_shared_callback(mut self, callback: FailureCallback) -> Self {
        self.error_callback = Some(callback);
        self
    }

    /// Apply every option present in `settings`.
    pub fn from_settings(mut self, settings: LoaderSettings) -> Self {
        if let Some(errors) = settings.errors {
            self.errors = Some(errors);
        }
        if let Some(remove) = settings.remove_read {
            self.remove_read = Some(remove);
        }
        if let Some(value) = settings.default_return {
            self.default_return = Some(value);
        }
        if let Some(encoding) = settings.read_options {
            self.read_options = Some(encoding);
        }
        if let Some(force) = settings.force_json {
            self.force_json = Some(force);
        }
        if let Some(enabled) = settings.require_enabled {
            self.require_enabled = Some(enabled);
        }
        self
    }

    /// Read options from `CONFIG_READER_*` environment variables.
    ///
    /// Environment variables take precedence over values set earlier.
    pub fn from_env(self) -> Result<Self, LoaderError> {
        apply_env(self)
    }

    /// Build the reader.
    ///
    /// # Errors
    ///
    /// - `LoaderError::InvalidErrorMode` if the mode is not `throw`, `warn` or `silent`.
    /// - `LoaderError::InvalidEncoding` if the encoding label is unknown.
    pub fn build(self) -> Result<ConfigReader, LoaderError> {
        let mode: ErrorMode = self
            .errors
            .as_deref()
            .unwrap_or(DEFAULT_ERROR_MODE)
            .parse()?;

        let label = self.read_options.as_deref().unwrap_or(DEFAULT_ENCODING);
        let encoding = Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| LoaderError::InvalidEncoding(label.to_string()))?;

        let policy = ErrorPolicy::new(
            mode,
            self.logger.unwrap_or_else(|| Arc::new(TracingLogger)),
            self.default_return.unwrap_or(Value::Null),
            self.error_callback,
        );

        Ok(ConfigReader::from_config(ReaderConfig {
            policy,
            remove_read: self.remove_read.unwrap_or(DEFAULT_REMOVE_READ),
            encoding,
            force_json: self.force_json.unwrap_or(DEFAULT_FORCE_JSON),
            require_enabled: self.require_enabled.unwrap_or(DEFAULT_REQUIRE_ENABLED),
        }))
    }
}

impl fmt::Debug for LoaderOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoaderOptions")
            .field("errors", &self.errors)
            .field("remove_read", &self.remove_read)
            .field("default_return", &self.default_return)
            .field("read_options", &self.read_options)
            .field("force_json", &self.force_json)
            .field("require_enabled", &self.require_enabled)
            .field("error_callback", &self.error_callback.is_some())
            .finish_non_exhaustive()
    }
}
