// crates/htforge-config/src/lib.rs
// ============================================================================
// Module: htforge Config Library
// Description: Options model, validation, loading, and artifact generation.
// Purpose: Single source of truth for htforge option semantics.
// Dependencies: mime_guess, serde_json, thiserror, toml, url
// ============================================================================

//! ## Overview
//! `htforge-config` turns an untyped option bag into trusted
//! [`HtaccessOptions`]. Validation is fail-fast and runs in a fixed group
//! order; the first violation is reported as an [`OptionError`] naming the
//! field and the reason. The crate also loads option files and generates the
//! options schema and a canonical example.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod error;
pub mod examples;
pub mod load;
pub mod options;
pub mod path;
pub mod recognizers;
pub mod schema;
pub mod validate;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use error::*;
pub use examples::options_toml_example;
pub use load::LoadedOptions;
pub use load::OptionsFormat;
pub use load::load_raw_options;
pub use load::parse_raw_options;
pub use options::*;
pub use path::FieldPath;
pub use recognizers::*;
pub use schema::options_schema;
pub use validate::RawOptions;
pub use validate::parse_options;
pub use validate::validate_options;
pub use validate::validation_order;
