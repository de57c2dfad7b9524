//! Error types for configuration reading.
//!
//! Responsibilities:
//! - Define `LoaderError`, returned by every public operation.
//! - Define `LoadFailure`, the error context handed to the error policy, and
//!   `FailureKind`, the original error it wraps.
//!
//! Does NOT handle:
//! - Deciding whether a failure raises, warns or substitutes (see policy.rs).
//!
//! Invariants:
//! - Every failure carries the path, key or request shape it concerns.
//! - `LoaderError::Read` is the only per-file error that bypasses the policy.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::format::Format;

/// Result type alias for config reader operations.
pub type Result<T> = std::result::Result<T, LoaderError>;

/// Errors returned by config reader construction and operations.
#[derive(Error, Debug)]
pub enum LoaderError {
    /// The error handling mode is not one of `throw`, `warn`, `silent`.
    #[error("Invalid errors option '{0}': expected one of throw, warn, silent")]
    InvalidErrorMode(String),

    /// The raw-text encoding label is not recognized.
    #[error("Unknown text encoding '{0}'")]
    InvalidEncoding(String),

    /// An environment or settings value could not be interpreted.
    #[error("Invalid value for {var}: {message}")]
    InvalidSetting { var: String, message: String },

    /// Raw-text read failed (file missing, permission denied, ...).
    #[error("Failed to read config file at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A failure was reported through the policy while in `throw` mode.
    #[error(transparent)]
    Reported(#[from] LoadFailure),
}

/// A failure together with the operation it occurred in.
#[derive(Error, Debug)]
#[error("{operation}: {kind}")]
pub struct LoadFailure {
    /// Descriptive label of where the failure occurred.
    pub operation: &'static str,
    /// The underlying failure.
    #[source]
    pub kind: FailureKind,
}

impl LoadFailure {
    pub fn new(operation: &'static str, kind: FailureKind) -> Self {
        Self { operation, kind }
    }
}

/// What went wrong while loading.
#[derive(Error, Debug)]
pub enum FailureKind {
    #[error("Failed to parse {format} config at {path}: {message}")]
    Parse {
        path: PathBuf,
        format: Format,
        message: String,
    },

    #[error("Failed to read config file at {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to remove config file at {path}: {source}")]
    Remove { path: PathBuf, source: io::Error },

    /// A request entry held something other than a string path.
    #[error("Path for {entry} must be a string, got {found}")]
    InvalidPath { entry: String, found: &'static str },

    #[error("Request must specify files")]
    MissingFiles,

    #[error("files must be an array or object, got {found}")]
    UnsupportedFiles { found: &'static str },

    #[error("Unsupported request type: {found}")]
    UnsupportedRequest { found: &'static str },
}
