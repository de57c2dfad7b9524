//! Environment variable override tests.
//!
//! Responsibilities:
//! - Test `CONFIG_READER_*` overrides on top of builder values.
//! - Test handling of empty, whitespace-only and invalid values.

use serde_json::json;
use serial_test::serial;
use tempfile::TempDir;

use super::env_lock;
use crate::constants::{
    ENV_ENCODING, ENV_ERRORS, ENV_FORCE_JSON, ENV_REMOVE_READ, ENV_REQUIRE_ENABLED,
};
use crate::error::LoaderError;
use crate::options::{LoaderOptions, env_var_or_none};
use crate::policy::ErrorMode;
use crate::test_util::write_file;

const ALL_VARS: [&str; 5] = [
    ENV_ERRORS,
    ENV_REMOVE_READ,
    ENV_ENCODING,
    ENV_FORCE_JSON,
    ENV_REQUIRE_ENABLED,
];

fn cleared() -> Vec<(&'static str, Option<&'static str>)> {
    ALL_VARS.iter().map(|var| (*var, None)).collect()
}

#[test]
#[serial]
fn test_env_overrides_builder_values() {
    let _lock = env_lock().lock().unwrap();
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "conf.json", r#"{"a": 1}"#);

    let mut vars = cleared();
    vars.extend([
        (ENV_ERRORS, Some("silent")),
        (ENV_REMOVE_READ, Some("false")),
        (ENV_REQUIRE_ENABLED, Some("0")),
    ]);

    temp_env::with_vars(vars, || {
        let reader = LoaderOptions::new()
            .with_errors(ErrorMode::Warn)
            .with_remove_read(true)
            .from_env()
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(reader.mode(), ErrorMode::Silent);
        assert!(!reader.remove_read());
        assert!(!reader.require_enabled());

        // Structured interpretation is off, so the JSON comes back verbatim.
        assert_eq!(reader.load_sync(&path).unwrap(), json!(r#"{"a": 1}"#));
        assert!(path.exists());
    });
}

#[test]
#[serial]
fn test_unset_env_keeps_builder_values() {
    let _lock = env_lock().lock().unwrap();

    temp_env::with_vars(cleared(), || {
        let reader = LoaderOptions::new()
            .with_errors(ErrorMode::Warn)
            .with_force_json(true)
            .from_env()
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(reader.mode(), ErrorMode::Warn);
        assert!(reader.force_json());
        assert!(reader.remove_read());
    });
}

#[test]
#[serial]
fn test_empty_and_whitespace_env_vars_ignored() {
    let _lock = env_lock().lock().unwrap();

    let mut vars = cleared();
    vars.extend([(ENV_ERRORS, Some("")), (ENV_FORCE_JSON, Some("   "))]);

    temp_env::with_vars(vars, || {
        let reader = LoaderOptions::new().from_env().unwrap().build().unwrap();
        assert_eq!(reader.mode(), ErrorMode::Throw);
        assert!(!reader.force_json());
    });
}

#[test]
#[serial]
fn test_invalid_bool_env_var() {
    let _lock = env_lock().lock().unwrap();

    let mut vars = cleared();
    vars.push((ENV_FORCE_JSON, Some("sometimes")));

    temp_env::with_vars(vars, || {
        let result = LoaderOptions::new().from_env();
        assert!(matches!(
            result,
            Err(LoaderError::InvalidSetting { ref var, .. }) if var == ENV_FORCE_JSON
        ));
    });
}

#[test]
#[serial]
fn test_invalid_error_mode_env_var_fails_build() {
    let _lock = env_lock().lock().unwrap();

    let mut vars = cleared();
    vars.push((ENV_ERRORS, Some("panic")));

    temp_env::with_vars(vars, || {
        let result = LoaderOptions::new().from_env().unwrap().build();
        assert!(matches!(result, Err(LoaderError::InvalidErrorMode(_))));
    });
}

#[test]
#[serial]
fn test_encoding_env_var() {
    let _lock = env_lock().lock().unwrap();

    let mut vars = cleared();
    vars.push((ENV_ENCODING, Some("  latin1  ")));

    temp_env::with_vars(vars, || {
        let reader = LoaderOptions::new().from_env().unwrap().build().unwrap();
        assert_eq!(reader.encoding_name(), "windows-1252");
    });
}

#[test]
#[serial]
fn test_env_var_or_none_trims() {
    let _lock = env_lock().lock().unwrap();

    temp_env::with_vars([(ENV_ERRORS, Some("  warn "))], || {
        assert_eq!(env_var_or_none(ENV_ERRORS).as_deref(), Some("warn"));
    });
    temp_env::with_vars([(ENV_ERRORS, None::<&str>)], || {
        assert_eq!(env_var_or_none(ENV_ERRORS), None);
    });
}
