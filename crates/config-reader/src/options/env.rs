//! Environment variable overrides for loader options.
//!
//! Responsibilities:
//! - Read `CONFIG_READER_*` variables and apply them to `LoaderOptions`.
//! - Provide a helper for reading env vars with empty/whitespace filtering.
//!
//! Does NOT handle:
//! - Validating the error mode or encoding label (done in `build()`).
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Invalid boolean values return `LoaderError::InvalidSetting`.

use super::builder::LoaderOptions;
use crate::constants::{
    ENV_ENCODING, ENV_ERRORS, ENV_FORCE_JSON, ENV_REMOVE_READ, ENV_REQUIRE_ENABLED,
};
use crate::error::LoaderError;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Apply environment variable overrides to the options.
pub(super) fn apply_env(mut options: LoaderOptions) -> Result<LoaderOptions, LoaderError> {
    if let Some(mode) = env_var_or_none(ENV_ERRORS) {
        options = options.with_errors_str(mode);
    }
    if let Some(remove) = env_bool(ENV_REMOVE_READ)? {
        options = options.with_remove_read(remove);
    }
    if let Some(encoding) = env_var_or_none(ENV_ENCODING) {
        options = options.with_read_options(encoding);
    }
    if let Some(force) = env_bool(ENV_FORCE_JSON)? {
        options = options.with_force_json(force);
    }
    if let Some(enabled) = env_bool(ENV_REQUIRE_ENABLED)? {
        options = options.with_require_enabled(enabled);
    }
    Ok(options)
}

fn env_bool(var: &str) -> Result<Option<bool>, LoaderError> {
    let Some(raw) = env_var_or_none(var) else {
        return Ok(None);
    };
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(Some(true)),
        "false" | "0" => Ok(Some(false)),
        _ => Err(LoaderError::InvalidSetting {
            var: var.to_string(),
            message: "must be true, false, 1 or 0".to_string(),
        }),
    }
}
