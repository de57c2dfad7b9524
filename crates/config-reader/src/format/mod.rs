//! Structured interpretation of config file contents.
//!
//! Responsibilities:
//! - Pick a structured format from the file extension.
//! - Parse text into a plain `serde_json::Value`.
//! - Accept relaxed JSON-like syntax (comments, unquoted keys, trailing
//!   commas, `module.exports =` wrapper) when strict JSON fails.
//!
//! Does NOT handle:
//! - File I/O or text decoding (see loader/).
//! - Deciding what a parse failure means (see loader/ and policy.rs).
//!
//! Invariants:
//! - File contents are never executed; only data grammars are accepted.
//! - The whole input must parse; trailing garbage is a failure.

mod relaxed;

use std::ffi::OsStr;
use std::fmt;
use std::path::Path;

use serde_json::Value;

use crate::error::FailureKind;

/// Structured grammar used for a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Strict JSON, then the relaxed JSON-like grammar.
    Json,
    Yaml,
    Toml,
}

impl Format {
    /// Choose a format from the file extension. Unknown extensions are JSON.
    pub fn for_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(OsStr::to_str)
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("yaml" | "yml") => Format::Yaml,
            Some("toml") => Format::Toml,
            _ => Format::Json,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Format::Json => "JSON",
            Format::Yaml => "YAML",
            Format::Toml => "TOML",
        })
    }
}

/// Parse `text` (read from `path`) as structured data.
pub fn parse_structured(path: &Path, text: &str) -> Result<Value, FailureKind> {
    let format = Format::for_path(path);
    let parsed = match format {
        Format::Json => parse_json(text),
        Format::Yaml => serde_yaml::from_str::<Value>(text).map_err(|e| e.to_string()),
        Format::Toml => toml::from_str::<Value>(text).map_err(|e| e.to_string()),
    };

    parsed.map_err(|message| FailureKind::Parse {
        path: path.to_path_buf(),
        format,
        message,
    })
}

fn parse_json(text: &str) -> Result<Value, String> {
    match serde_json::from_str(text) {
        Ok(value) => Ok(value),
        Err(strict) => relaxed::parse(text)
            .map_err(|relaxed| format!("{strict}; relaxed syntax: {relaxed}")),
    }
}
