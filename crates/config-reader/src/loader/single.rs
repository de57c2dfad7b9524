//! Single-file loading.
//!
//! Responsibilities:
//! - Read one file, try structured interpretation, fall back to raw text.
//! - Delete the file afterwards when `remove_read` is set.
//!
//! Does NOT handle:
//! - Substituting defaults for raw-text I/O failures; those are returned as
//!   `LoaderError::Read` and left to the caller (batches convert them).
//!
//! Invariants:
//! - The file is read once and deleted at most once per load, whichever
//!   branch produced the content.
//! - A deletion failure never changes the load outcome.
//! - `load` and `load_sync` differ only in blocking behavior.

use std::io;
use std::path::Path;

use serde_json::Value;

use super::reader::{ConfigReader, resolve_path};
use crate::error::{FailureKind, LoadFailure, LoaderError, Result};
use crate::format;

const LOAD: &str = "ConfigReader::load";
const LOAD_SYNC: &str = "ConfigReader::load_sync";

impl ConfigReader {
    /// Load one file without blocking the executor.
    ///
    /// # Errors
    ///
    /// - `LoaderError::Read` if the file cannot be read and the raw-text path
    ///   is in use.
    /// - `LoaderError::Reported` in `throw` mode when strict structured
    ///   parsing fails.
    pub async fn load(&self, path: impl AsRef<Path>) -> Result<Value> {
        let path = resolve_path(path.as_ref());
        let contents = tokio::fs::read(&path).await;
        let outcome = self.interpret(&path, contents, LOAD);

        if self.config.remove_read {
            let removed = tokio::fs::remove_file(&path).await;
            self.finish_removal(&path, removed, LOAD);
        }

        outcome
    }

    /// Blocking variant of [`ConfigReader::load`].
    pub fn load_sync(&self, path: impl AsRef<Path>) -> Result<Value> {
        let path = resolve_path(path.as_ref());
        let contents = std::fs::read(&path);
        let outcome = self.interpret(&path, contents, LOAD_SYNC);

        if self.config.remove_read {
            let removed = std::fs::remove_file(&path);
            self.finish_removal(&path, removed, LOAD_SYNC);
        }

        outcome
    }

    fn interpret(
        &self,
        path: &Path,
        contents: io::Result<Vec<u8>>,
        operation: &'static str,
    ) -> Result<Value> {
        let bytes = match contents {
            Ok(bytes) => bytes,
            Err(source) if self.strict() => {
                let kind = FailureKind::Read {
                    path: path.to_path_buf(),
                    source,
                };
                return self.config.policy.report(LoadFailure::new(operation, kind));
            }
            Err(source) => {
                return Err(LoaderError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let text = self.decode(&bytes);
        if !self.config.require_enabled {
            return Ok(Value::String(text));
        }

        match format::parse_structured(path, &text) {
            Ok(value) => {
                tracing::debug!(path = %path.display(), "Loaded structured config");
                Ok(value)
            }
            Err(kind) if self.config.force_json => {
                self.config.policy.report(LoadFailure::new(operation, kind))
            }
            Err(kind) => {
                tracing::debug!(
                    path = %path.display(),
                    reason = %kind,
                    "Structured parse failed; using raw text"
                );
                Ok(Value::String(text))
            }
        }
    }

    fn finish_removal(&self, path: &Path, removed: io::Result<()>, operation: &'static str) {
        match removed {
            Ok(()) => tracing::debug!(path = %path.display(), "Removed config file after read"),
            // Already gone: nothing left to clean up.
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(source) => {
                let kind = FailureKind::Remove {
                    path: path.to_path_buf(),
                    source,
                };
                self.config
                    .policy
                    .observe(&LoadFailure::new(operation, kind));
            }
        }
    }
}
