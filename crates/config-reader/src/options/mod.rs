//! Loader configuration.
//!
//! Responsibilities:
//! - Provide the `LoaderOptions` builder that produces a `ConfigReader`.
//! - Accept options from code, from a serde `LoaderSettings` object, and from
//!   environment variables.
//!
//! Does NOT handle:
//! - Loading files (see loader/).
//!
//! Invariants / Assumptions:
//! - Validation (error mode, encoding label) happens once, in `build()`.
//! - The built configuration is immutable for the reader's lifetime.
//! - Later calls override earlier ones; `from_env` overrides whatever was set
//!   before it.

mod builder;
mod env;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use builder::LoaderOptions;
pub use env::env_var_or_none;

/// Serializable option object using the camelCase option names.
///
/// Every field is optional; unset fields keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct LoaderSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove_read: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_return: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_options: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_json: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_enabled: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_settings_deserialize_camel_case() {
        let settings: LoaderSettings = serde_json::from_value(json!({
            "errors": "warn",
            "removeRead": false,
            "defaultReturn": {"fallback": true},
            "readOptions": "latin1",
            "forceJson": true,
            "requireEnabled": false
        }))
        .unwrap();

        assert_eq!(settings.errors.as_deref(), Some("warn"));
        assert_eq!(settings.remove_read, Some(false));
        assert_eq!(settings.default_return, Some(json!({"fallback": true})));
        assert_eq!(settings.read_options.as_deref(), Some("latin1"));
        assert_eq!(settings.force_json, Some(true));
        assert_eq!(settings.require_enabled, Some(false));
    }

    #[test]
    fn test_settings_all_optional() {
        let settings: LoaderSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, LoaderSettings::default());
    }

    #[test]
    fn test_settings_reject_unknown_keys() {
        let result = serde_json::from_str::<LoaderSettings>(r#"{"remove_read": false}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_settings_serialize_skips_unset() {
        let settings = LoaderSettings {
            force_json: Some(true),
            ..LoaderSettings::default()
        };
        assert_eq!(
            serde_json::to_value(&settings).unwrap(),
            json!({"forceJson": true})
        );
    }
}
