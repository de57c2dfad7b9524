//! Request dispatch.
//!
//! Responsibilities:
//! - Define the request shapes: a single path, an ordered list, a keyed map,
//!   or a dynamic JSON value to be classified.
//! - Route each request to the single-file, list or keyed loader.
//! - Provide the blocking single-file entry point.
//!
//! Does NOT handle:
//! - Loading itself (see single.rs and batch.rs).
//!
//! Invariants:
//! - Malformed requests are reported through the error policy.
//! - Non-string paths become per-entry failures without touching the disk.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::reader::ConfigReader;
use crate::error::{FailureKind, LoadFailure, LoaderError, Result};

const READ_CONFIG: &str = "ConfigReader::read_config";
const READ_CONFIG_SYNC: &str = "ConfigReader::read_config_sync";

/// One path inside a batch request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathEntry {
    Path(PathBuf),
    /// The request held a non-string value here; `found` names its JSON type.
    Invalid { found: &'static str },
}

impl PathEntry {
    /// Interpret a JSON value as a path entry.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(path) => PathEntry::Path(PathBuf::from(path)),
            other => PathEntry::Invalid {
                found: json_type_name(other),
            },
        }
    }
}

impl From<&str> for PathEntry {
    fn from(path: &str) -> Self {
        PathEntry::Path(PathBuf::from(path))
    }
}

impl From<String> for PathEntry {
    fn from(path: String) -> Self {
        PathEntry::Path(PathBuf::from(path))
    }
}

impl From<PathBuf> for PathEntry {
    fn from(path: PathBuf) -> Self {
        PathEntry::Path(path)
    }
}

/// The `files` of a batch request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSet {
    List(Vec<PathEntry>),
    Keyed(Vec<(String, PathEntry)>),
}

/// Input accepted by [`ConfigReader::read_config`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigRequest {
    Path(PathBuf),
    Files(FileSet),
    /// A JSON value classified at dispatch time: a string path, or an object
    /// with a `files` array or object.
    Value(Value),
}

impl From<&str> for ConfigRequest {
    fn from(path: &str) -> Self {
        ConfigRequest::Path(PathBuf::from(path))
    }
}

impl From<String> for ConfigRequest {
    fn from(path: String) -> Self {
        ConfigRequest::Path(PathBuf::from(path))
    }
}

impl From<&Path> for ConfigRequest {
    fn from(path: &Path) -> Self {
        ConfigRequest::Path(path.to_path_buf())
    }
}

impl From<PathBuf> for ConfigRequest {
    fn from(path: PathBuf) -> Self {
        ConfigRequest::Path(path)
    }
}

impl From<FileSet> for ConfigRequest {
    fn from(files: FileSet) -> Self {
        ConfigRequest::Files(files)
    }
}

impl From<Value> for ConfigRequest {
    fn from(value: Value) -> Self {
        ConfigRequest::Value(value)
    }
}

/// Result of [`ConfigReader::read_config`], shaped like the request.
#[derive(Debug, Clone, PartialEq)]
pub enum Loaded {
    Single(Value),
    List(Vec<Value>),
    Keyed(BTreeMap<String, Value>),
}

impl Loaded {
    /// Collapse into one JSON value (lists become arrays, maps objects).
    pub fn into_value(self) -> Value {
        match self {
            Loaded::Single(value) => value,
            Loaded::List(values) => Value::Array(values),
            Loaded::Keyed(values) => Value::Object(values.into_iter().collect()),
        }
    }
}

enum Target {
    Path(PathBuf),
    Files(FileSet),
}

impl ConfigReader {
    /// Load a single path, a list of paths, or a keyed map of paths.
    ///
    /// Single paths go straight to [`ConfigReader::load`]; a raw-text read
    /// failure is returned as `LoaderError::Read`. Malformed requests are
    /// reported through the error policy and yield `Loaded::Single(default)`
    /// in `warn`/`silent` mode.
    pub async fn read_config(&self, request: impl Into<ConfigRequest>) -> Result<Loaded> {
        let target = match request.into() {
            ConfigRequest::Path(path) => Target::Path(path),
            ConfigRequest::Files(files) => Target::Files(files),
            ConfigRequest::Value(value) => match classify(value) {
                Ok(target) => target,
                Err(kind) => {
                    return self
                        .config
                        .policy
                        .report(LoadFailure::new(READ_CONFIG, kind))
                        .map(Loaded::Single);
                }
            },
        };

        match target {
            Target::Path(path) => self.load(&path).await.map(Loaded::Single),
            Target::Files(FileSet::List(entries)) => {
                self.load_entries(entries).await.map(Loaded::List)
            }
            Target::Files(FileSet::Keyed(entries)) => {
                self.load_keyed(entries).await.map(Loaded::Keyed)
            }
        }
    }

    /// Blocking single-file entry point.
    ///
    /// Unlike [`ConfigReader::load_sync`], a raw-text read failure is
    /// reported through the error policy, so `warn` and `silent` modes return
    /// the default value for a missing file.
    pub fn read_config_sync(&self, path: impl AsRef<Path>) -> Result<Value> {
        match self.load_sync(path) {
            Err(LoaderError::Read { path, source }) => {
                let kind = FailureKind::Read { path, source };
                self.config
                    .policy
                    .report(LoadFailure::new(READ_CONFIG_SYNC, kind))
            }
            outcome => outcome,
        }
    }
}

fn classify(value: Value) -> std::result::Result<Target, FailureKind> {
    match value {
        Value::String(path) => Ok(Target::Path(PathBuf::from(path))),
        Value::Object(mut request) => match request.remove("files") {
            // Falsy `files` values count as absent.
            None | Some(Value::Null | Value::Bool(false)) => Err(FailureKind::MissingFiles),
            Some(Value::String(path)) if path.is_empty() => Err(FailureKind::MissingFiles),
            Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Err(FailureKind::MissingFiles),
            Some(Value::Array(items)) => Ok(Target::Files(FileSet::List(
                items.iter().map(PathEntry::from_value).collect(),
            ))),
            Some(Value::Object(map)) => Ok(Target::Files(FileSet::Keyed(
                map.iter()
                    .map(|(key, value)| (key.clone(), PathEntry::from_value(value)))
                    .collect(),
            ))),
            Some(other) => Err(FailureKind::UnsupportedFiles {
                found: json_type_name(&other),
            }),
        },
        other => Err(FailureKind::UnsupportedRequest {
            found: json_type_name(&other),
        }),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
