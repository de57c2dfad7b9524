//! Strict structured parsing tests (`force_json`).

use serde_json::json;
use tempfile::TempDir;

use super::harness;
use crate::error::{FailureKind, LoaderError};
use crate::format::Format;
use crate::options::LoaderOptions;
use crate::policy::ErrorMode;
use crate::test_util::write_file;

fn strict(mode: ErrorMode) -> LoaderOptions {
    LoaderOptions::new()
        .with_force_json(true)
        .with_errors(mode)
        .with_default_return(json!("default"))
}

#[test]
fn test_plain_text_silent_returns_default_and_removes_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "plain.txt", "not structured at all");
    let h = harness(strict(ErrorMode::Silent));

    let value = h.reader.load_sync(&path).unwrap();

    assert_eq!(value, json!("default"));
    assert_eq!(h.callback.count(), 1);
    assert!(h.logger.messages().is_empty());
    assert!(!path.exists());
}

#[tokio::test]
async fn test_plain_text_throw_raises_parse_failure() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "plain.txt", "not structured at all");
    let h = harness(strict(ErrorMode::Throw));

    let err = h.reader.load(&path).await.unwrap_err();

    let LoaderError::Reported(failure) = err else {
        panic!("expected a reported failure");
    };
    assert_eq!(failure.operation, "ConfigReader::load");
    assert!(matches!(
        failure.kind,
        FailureKind::Parse {
            format: Format::Json,
            ..
        }
    ));
    assert_eq!(h.callback.count(), 1);
    assert!(!path.exists());
}

#[tokio::test]
async fn test_plain_text_warn_logs_once() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "plain.txt", "still not structured");
    let h = harness(strict(ErrorMode::Warn));

    let value = h.reader.load(&path).await.unwrap();

    assert_eq!(value, json!("default"));
    let messages = h.logger.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("plain.txt"));
}

#[tokio::test]
async fn test_valid_structured_file_loads() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "conf.json", r#"{"strict": "ok"}"#);
    let h = harness(strict(ErrorMode::Throw));

    assert_eq!(h.reader.load(&path).await.unwrap(), json!({"strict": "ok"}));
    assert_eq!(h.callback.count(), 0);
}

#[tokio::test]
async fn test_relaxed_syntax_is_still_structured() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "conf.js", "module.exports = { a: 1, };");
    let h = harness(strict(ErrorMode::Throw));

    assert_eq!(h.reader.load(&path).await.unwrap(), json!({"a": 1}));
}

#[tokio::test]
async fn test_missing_file_is_reported_in_strict_mode() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.json");
    let h = harness(strict(ErrorMode::Silent));

    let value = h.reader.load(&path).await.unwrap();

    assert_eq!(value, json!("default"));
    assert_eq!(h.callback.count(), 1);
}

#[tokio::test]
async fn test_force_json_ignored_when_structured_disabled() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "plain.txt", "raw");
    let h = harness(strict(ErrorMode::Throw).with_require_enabled(false));

    assert_eq!(h.reader.load(&path).await.unwrap(), json!("raw"));
    assert_eq!(h.callback.count(), 0);
}

#[tokio::test]
async fn test_invalid_yaml_reports_yaml_format() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "conf.yaml", "key: [unclosed");
    let h = harness(strict(ErrorMode::Throw));

    let err = h.reader.load(&path).await.unwrap_err();

    assert!(matches!(
        err,
        LoaderError::Reported(ref failure) if matches!(
            failure.kind,
            FailureKind::Parse { format: Format::Yaml, .. }
        )
    ));
}
