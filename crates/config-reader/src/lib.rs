//! Configuration file reader.
//!
//! This crate loads config files as structured data or raw text, optionally
//! deletes them after reading, and funnels every failure through a single
//! error policy that can raise, warn, or silently substitute a default value.
//! Lists and keyed maps of files are loaded concurrently; one bad file never
//! aborts the rest of the batch.

pub mod constants;
pub mod error;
pub mod format;
mod loader;
pub mod options;
pub mod policy;

pub use error::{FailureKind, LoadFailure, LoaderError, Result};
pub use format::Format;
pub use loader::{ConfigReader, ConfigRequest, FileSet, Loaded, PathEntry};
pub use options::{LoaderOptions, LoaderSettings, env_var_or_none};
pub use policy::{ErrorMode, ErrorPolicy, FailureCallback, Logger, TracingLogger};
