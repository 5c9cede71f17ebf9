// crates/htforge-config/src/load.rs
// ============================================================================
// Module: Options Loading
// Description: Reads the raw option bag from a TOML or JSON file.
// Purpose: Bounded, fail-closed file loading ahead of validation.
// Dependencies: serde_json, toml
// ============================================================================

//! ## Overview
//! The options file is resolved from an explicit path, then the
//! `HTFORGE_CONFIG` environment variable, then `htforge.toml` in the working
//! directory. Paths and file size are bounded before anything is parsed.
//! Loading yields the raw bag only; shape checks belong to
//! [`crate::parse_options`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde_json::Value;

use crate::error::ConfigError;
use crate::validate::RawOptions;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default options filename when no path is specified.
pub const DEFAULT_OPTIONS_NAME: &str = "htforge.toml";
/// Environment variable naming the options file.
pub const OPTIONS_ENV_VAR: &str = "HTFORGE_CONFIG";
/// Maximum options file size in bytes.
pub const MAX_OPTIONS_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum length of a full path.
pub const MAX_TOTAL_PATH_LENGTH: usize = 4096;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Source format of an options file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionsFormat {
    /// TOML document.
    Toml,
    /// JSON document.
    Json,
}

impl OptionsFormat {
    /// Picks the format from the file extension; anything but `.json` is TOML.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

/// Raw options read from disk.
#[derive(Debug, Clone)]
pub struct LoadedOptions {
    /// Resolved file path.
    pub path: PathBuf,
    /// Raw option bag, in file key order.
    pub raw: RawOptions,
}

// ============================================================================
// SECTION: Loading
// ============================================================================

/// Loads the raw option bag using the default resolution rules.
///
/// # Errors
///
/// Returns [`ConfigError`] when the path is out of bounds, the file cannot be
/// read, or its content is not a TOML/JSON table.
pub fn load_raw_options(path: Option<&Path>) -> Result<LoadedOptions, ConfigError> {
    let resolved = resolve_path(path)?;
    validate_path(&resolved)?;
    let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
    if bytes.len() > MAX_OPTIONS_FILE_SIZE {
        return Err(ConfigError::Invalid("options file exceeds size limit".to_string()));
    }
    let content = std::str::from_utf8(&bytes)
        .map_err(|_| ConfigError::Invalid("options file must be utf-8".to_string()))?;
    let raw = parse_raw_options(content, OptionsFormat::from_path(&resolved))?;
    Ok(LoadedOptions {
        path: resolved,
        raw,
    })
}

/// Parses option file content into a raw option bag.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] for malformed content and
/// [`ConfigError::Invalid`] when the top level is not a table.
pub fn parse_raw_options(content: &str, format: OptionsFormat) -> Result<RawOptions, ConfigError> {
    let value: Value = match format {
        OptionsFormat::Toml => {
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?
        }
        OptionsFormat::Json => {
            serde_json::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?
        }
    };
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ConfigError::Invalid("options must be a table at the top level".to_string())),
    }
}

/// Resolves the options path from the argument, environment, or default name.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(OPTIONS_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("options path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_OPTIONS_NAME))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("options path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("options path component too long".to_string()));
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
