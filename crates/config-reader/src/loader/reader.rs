//! The `ConfigReader` handle and its immutable configuration.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use encoding_rs::Encoding;
use serde_json::Value;

use crate::options::LoaderOptions;
use crate::policy::{ErrorMode, ErrorPolicy};

/// Immutable configuration shared by every operation of one reader.
#[derive(Debug)]
pub(crate) struct ReaderConfig {
    pub(crate) policy: ErrorPolicy,
    pub(crate) remove_read: bool,
    pub(crate) encoding: &'static Encoding,
    pub(crate) force_json: bool,
    pub(crate) require_enabled: bool,
}

/// Loads config files according to a fixed set of options.
///
/// Cloning is cheap; clones share the same configuration.
#[derive(Debug, Clone)]
pub struct ConfigReader {
    pub(super) config: Arc<ReaderConfig>,
}

impl ConfigReader {
    /// Start building a reader.
    pub fn builder() -> LoaderOptions {
        LoaderOptions::new()
    }

    pub(crate) fn from_config(config: ReaderConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// The error policy every failure is reported through.
    pub fn policy(&self) -> &ErrorPolicy {
        &self.config.policy
    }

    pub fn mode(&self) -> ErrorMode {
        self.config.policy.mode()
    }

    pub fn default_return(&self) -> &Value {
        self.config.policy.default_return()
    }

    pub fn remove_read(&self) -> bool {
        self.config.remove_read
    }

    /// Canonical name of the encoding used for raw reads (e.g. `UTF-8`).
    pub fn encoding_name(&self) -> &'static str {
        self.config.encoding.name()
    }

    pub fn force_json(&self) -> bool {
        self.config.force_json
    }

    pub fn require_enabled(&self) -> bool {
        self.config.require_enabled
    }

    /// Structured parse failures are reported instead of falling back.
    pub(super) fn strict(&self) -> bool {
        self.config.require_enabled && self.config.force_json
    }

    pub(super) fn decode(&self, bytes: &[u8]) -> String {
        let (text, _malformed) = self.config.encoding.decode_without_bom_handling(bytes);
        text.into_owned()
    }
}

/// Resolve `path` against the current working directory.
pub(super) fn resolve_path(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    }
}
