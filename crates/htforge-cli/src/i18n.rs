// crates/htforge-cli/src/i18n.rs
// ============================================================================
// Module: CLI Internationalization Helpers
// Description: Message catalogs and translation utilities for the CLI.
// Purpose: Keep every user-facing string of the htforge binary in one place.
// Dependencies: Standard library collections and formatting utilities.
// ============================================================================

//! ## Overview
//! The htforge CLI routes all output through the [`t!`](crate::t) macro, which
//! looks up a key in the catalog of the selected locale and substitutes named
//! placeholders.
//!
//! ## Invariants
//! - Catalogs are built once and read-only thereafter.
//! - Missing keys fall back to English and then to the key itself.
//! - Validation diagnostics from the core crates are passed through untranslated.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Supported CLI locales.
///
/// [`Locale::En`] is the fallback locale.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Locale {
    /// English (default).
    En,
    /// Catalan.
    Ca,
}

impl Locale {
    /// Parses a locale value, ignoring case and region tags.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.split(['-', '_']).next() {
            Some("en") => Some(Self::En),
            Some("ca") => Some(Self::Ca),
            _ => None,
        }
    }
}

/// Ordered list of supported CLI locales.
pub const SUPPORTED_LOCALES: &[Locale] = &[Locale::En, Locale::Ca];

/// A formatted message argument captured by the [`macro@crate::t`] macro.
#[derive(Clone)]
pub struct MessageArg {
    /// Placeholder name without braces (e.g., `"path"`).
    pub key: &'static str,
    /// Preformatted value substituted for the placeholder.
    pub value: String,
}

impl MessageArg {
    /// Constructs a new [`MessageArg`] from a key and displayable value.
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

// ============================================================================
// SECTION: Locale Selection
// ============================================================================

/// Global locale selection for CLI output.
static CURRENT_LOCALE: OnceLock<Locale> = OnceLock::new();

/// Sets the CLI locale. Only the first call wins.
pub fn set_locale(locale: Locale) {
    let _ = CURRENT_LOCALE.set(locale);
}

/// Returns the current CLI locale (defaults to English).
#[must_use]
pub fn current_locale() -> Locale {
    CURRENT_LOCALE.get().copied().unwrap_or(Locale::En)
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// English catalog entries.
const CATALOG_EN: &[(&str, &str)] = &[
    ("main.version", "htforge {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "output"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    ("options.load_failed", "Failed to load options: {error}"),
    ("options.invalid", "Invalid options in {path}: {error}"),
    ("check.ok", "Options valid."),
    ("build.observer_failed", "Failed to open event log at {path}: {error}"),
    ("build.failed", "Build failed: {error}"),
    ("build.written", "Wrote {bytes} bytes to {path}"),
    ("build.skipped", "Nothing to write; {path} left untouched."),
    ("build.rejected", "Options rejected; {path} left untouched."),
    ("verify.ok", "{path} is up to date."),
    ("verify.failed", "Verification failed: {error}"),
    ("schema.serialize_failed", "Failed to serialize options schema: {error}"),
    ("defaults.serialize_failed", "Failed to serialize default options: {error}"),
    ("i18n.lang.invalid_env", "Invalid value for {env}: {value}. Expected 'en' or 'ca'."),
    (
        "i18n.disclaimer.machine_translated",
        "Note: non-English output is machine-translated and may be inaccurate.",
    ),
];

/// Catalan catalog entries.
const CATALOG_CA: &[(&str, &str)] = &[
    ("main.version", "htforge {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "sortida"),
    ("output.write_failed", "No s'ha pogut escriure a {stream}: {error}"),
    ("options.load_failed", "No s'han pogut carregar les opcions: {error}"),
    ("options.invalid", "Opcions no vàlides a {path}: {error}"),
    ("check.ok", "Opcions vàlides."),
    ("build.observer_failed", "No s'ha pogut obrir el registre d'esdeveniments a {path}: {error}"),
    ("build.failed", "La construcció ha fallat: {error}"),
    ("build.written", "S'han escrit {bytes} bytes a {path}"),
    ("build.skipped", "No hi ha res a escriure; {path} no s'ha modificat."),
    ("build.rejected", "Opcions rebutjades; {path} no s'ha modificat."),
    ("verify.ok", "{path} està al dia."),
    ("verify.failed", "La verificació ha fallat: {error}"),
    ("schema.serialize_failed", "No s'ha pogut serialitzar l'esquema d'opcions: {error}"),
    ("defaults.serialize_failed", "No s'han pogut serialitzar les opcions per defecte: {error}"),
    ("i18n.lang.invalid_env", "Valor no vàlid per a {env}: {value}. S'esperava 'en' o 'ca'."),
    (
        "i18n.disclaimer.machine_translated",
        "Nota: la sortida que no és en anglès està traduïda automàticament i pot ser inexacta.",
    ),
];

/// Returns the message catalog for the requested locale.
pub(crate) fn catalog_for(locale: Locale) -> &'static HashMap<&'static str, &'static str> {
    static CATALOG_EN_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    static CATALOG_CA_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    match locale {
        Locale::En => CATALOG_EN_MAP.get_or_init(|| CATALOG_EN.iter().copied().collect()),
        Locale::Ca => CATALOG_CA_MAP.get_or_init(|| CATALOG_CA.iter().copied().collect()),
    }
}

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Translates `key` using the selected locale while substituting `args`.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    translate_in(current_locale(), key, args)
}

/// Translates `key` in an explicit locale.
#[must_use]
pub fn translate_in(locale: Locale, key: &str, args: Vec<MessageArg>) -> String {
    let template = catalog_for(locale)
        .get(key)
        .copied()
        .or_else(|| catalog_for(Locale::En).get(key).copied())
        .unwrap_or(key);
    let mut result = template.to_string();
    for arg in args {
        let placeholder = format!("{{{}}}", arg.key);
        result = result.replace(&placeholder, &arg.value);
    }
    result
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Formats a localized message from a key and named arguments.
///
/// # Arguments
///
/// - `$key` must match a catalog entry.
/// - Named arguments are substituted into `{placeholder}` positions.
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {{
        let args = ::std::vec![
            $(
                $crate::i18n::MessageArg::new(stringify!($name), $value.to_string()),
            )*
        ];
        $crate::i18n::translate($key, args)
    }};
}
