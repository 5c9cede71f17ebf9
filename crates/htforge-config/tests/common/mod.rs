// crates/htforge-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Helpers
// Description: Shared helpers for option validation tests.
// Purpose: Reduce duplication across integration tests for htforge-config.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use htforge_config::HtaccessOptions;
use htforge_config::OptionError;
use htforge_config::RawOptions;
use htforge_config::Recognizers;
use htforge_config::merge_defaults;
use htforge_config::parse_options;
use serde_json::Value;

/// Converts a JSON object literal into a raw option bag without defaults.
pub fn raw(value: Value) -> RawOptions {
    match value {
        Value::Object(map) => map,
        _ => RawOptions::new(),
    }
}

/// Overlays a JSON object literal on the documented defaults.
pub fn with_defaults(value: Value) -> RawOptions {
    merge_defaults(raw(value))
}

/// Parses a raw bag with the standard recognizers.
pub fn parse(raw: &RawOptions) -> Result<HtaccessOptions, OptionError> {
    parse_options(raw, &Recognizers::standard())
}

/// Expects validation to fail with exactly `message`.
pub fn expect_error(raw: &RawOptions, message: &str) -> Result<(), String> {
    match parse(raw) {
        Ok(_) => Err(format!("expected error '{message}', options were accepted")),
        Err(error) if error.to_string() == message => Ok(()),
        Err(error) => Err(format!("expected error '{message}', got '{error}'")),
    }
}
