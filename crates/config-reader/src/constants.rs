//! Centralized constants for the config reader.
//!
//! Default option values and the environment variable names recognized by
//! `LoaderOptions::from_env`.

// =============================================================================
// Option Defaults
// =============================================================================

/// Default error handling mode name.
pub const DEFAULT_ERROR_MODE: &str = "throw";

/// Default encoding label used for raw-text reads.
pub const DEFAULT_ENCODING: &str = "utf-8";

/// Files are deleted after they are read unless told otherwise.
pub const DEFAULT_REMOVE_READ: bool = true;

/// Raw-text fallback is allowed unless told otherwise.
pub const DEFAULT_FORCE_JSON: bool = false;

/// Structured interpretation is attempted unless told otherwise.
pub const DEFAULT_REQUIRE_ENABLED: bool = true;

// =============================================================================
// Environment Variables
// =============================================================================

/// Overrides the error handling mode (`throw`, `warn`, `silent`).
pub const ENV_ERRORS: &str = "CONFIG_READER_ERRORS";

/// Overrides whether files are deleted after being read.
pub const ENV_REMOVE_READ: &str = "CONFIG_READER_REMOVE_READ";

/// Overrides the encoding label used for raw-text reads.
pub const ENV_ENCODING: &str = "CONFIG_READER_ENCODING";

/// Overrides strict structured parsing.
pub const ENV_FORCE_JSON: &str = "CONFIG_READER_FORCE_JSON";

/// Overrides whether structured interpretation is attempted at all.
pub const ENV_REQUIRE_ENABLED: &str = "CONFIG_READER_REQUIRE_ENABLED";
