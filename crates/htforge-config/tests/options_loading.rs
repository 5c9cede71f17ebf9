// crates/htforge-config/tests/options_loading.rs
// =============================================================================
// Module: Options Loading Tests
// Description: File resolution, size limits, and format selection.
// Purpose: Ensure option files load fail-closed before validation.
// =============================================================================

//! Options file loading tests for htforge-config.

use std::fs;

use htforge_config::ConfigError;
use htforge_config::load::MAX_OPTIONS_FILE_SIZE;
use htforge_config::load_raw_options;
use htforge_config::merge_defaults;
use serde_json::Value;

mod common;

type TestResult = Result<(), String>;

#[test]
fn toml_file_loads_and_validates() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("htforge.toml");
    fs::write(&path, "forceHttps = true\nblockedIp = [\"10.0.0.1\"]\n")
        .map_err(|err| err.to_string())?;
    let loaded = load_raw_options(Some(&path)).map_err(|err| err.to_string())?;
    if loaded.path != path {
        return Err(format!("unexpected resolved path {}", loaded.path.display()));
    }
    let options = common::parse(&merge_defaults(loaded.raw)).map_err(|err| err.to_string())?;
    if !options.force_https || options.blocked_ip != ["10.0.0.1"] {
        return Err(format!("unexpected options: {options:?}"));
    }
    Ok(())
}

#[test]
fn json_file_is_selected_by_extension() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("options.json");
    fs::write(&path, r#"{ "pingable": false, "customHeaders": { "X-A": "1" } }"#)
        .map_err(|err| err.to_string())?;
    let loaded = load_raw_options(Some(&path)).map_err(|err| err.to_string())?;
    if loaded.raw.get("pingable") != Some(&Value::Bool(false)) {
        return Err(format!("unexpected raw options: {:?}", loaded.raw));
    }
    Ok(())
}

#[test]
fn missing_file_is_an_io_error() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("absent.toml");
    match load_raw_options(Some(&path)) {
        Err(ConfigError::Io(_)) => Ok(()),
        other => Err(format!("expected io error, got {other:?}")),
    }
}

#[test]
fn oversized_file_is_rejected() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("big.toml");
    let padding = format!("# {}\n", "x".repeat(MAX_OPTIONS_FILE_SIZE));
    fs::write(&path, padding).map_err(|err| err.to_string())?;
    match load_raw_options(Some(&path)) {
        Err(ConfigError::Invalid(message)) if message.contains("size limit") => Ok(()),
        other => Err(format!("expected size error, got {other:?}")),
    }
}

#[test]
fn non_utf8_file_is_rejected() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("bad.toml");
    fs::write(&path, [0xff_u8, 0xfe, 0x00]).map_err(|err| err.to_string())?;
    match load_raw_options(Some(&path)) {
        Err(ConfigError::Invalid(message)) if message.contains("utf-8") => Ok(()),
        other => Err(format!("expected utf-8 error, got {other:?}")),
    }
}

#[test]
fn malformed_toml_is_a_parse_error() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("broken.toml");
    fs::write(&path, "forceHttps = \n").map_err(|err| err.to_string())?;
    match load_raw_options(Some(&path)) {
        Err(ConfigError::Parse(_)) => Ok(()),
        other => Err(format!("expected parse error, got {other:?}")),
    }
}
