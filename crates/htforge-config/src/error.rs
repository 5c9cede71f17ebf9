// crates/htforge-config/src/error.rs
// ============================================================================
// Module: Option Errors
// Description: Error taxonomy for option validation and config loading.
// Purpose: Name the exact field and reason of the first violation found.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Validation never aggregates: the first violation, in the fixed group order,
//! is returned as a single [`OptionError`]. Every message has the shape
//! `"<fieldPath>" <reason>` so the orchestrator can prefix it with the plugin
//! name and print it verbatim.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use thiserror::Error;

use crate::path::FieldPath;

// ============================================================================
// SECTION: Reasons
// ============================================================================

/// Primitive or container kind expected at a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// JSON/TOML boolean.
    Boolean,
    /// Sequence.
    Array,
    /// String scalar.
    String,
    /// Key/value mapping.
    Object,
    /// Numeric scalar.
    Number,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Boolean => "a boolean",
            Self::Array => "an array",
            Self::String => "a string",
            Self::Object => "an object",
            Self::Number => "a number",
        };
        f.write_str(text)
    }
}

/// Wording used when a double quote is rejected.
///
/// File expiration values use the newer wording; every other quoted field keeps
/// the historical one so existing diagnostics stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteReason {
    /// `contains a forbidden double quote`
    Forbidden,
    /// `must not contain any double quote`
    MustNotContain,
}

impl fmt::Display for QuoteReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forbidden => f.write_str("contains a forbidden double quote"),
            Self::MustNotContain => f.write_str("must not contain any double quote"),
        }
    }
}

/// Domain-specific legality failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    /// Not an IPv4 or IPv6 literal.
    Ip,
    /// Not a registered MIME type.
    MimeType,
    /// Neither an absolute path nor an http(s) URL.
    Location,
    /// Not one of the listed literals.
    OneOf(&'static [&'static str]),
    /// Negative where a non-negative number is required.
    Negative,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ip => f.write_str("must be a valid IP"),
            Self::MimeType => f.write_str("must be a valid MIME type"),
            Self::Location => f.write_str("must be an absolute path or a valid HTTP URL"),
            Self::OneOf(allowed) => write!(f, "must be one of [{}]", allowed.join(", ")),
            Self::Negative => f.write_str("must be greater or equal to zero"),
        }
    }
}

// ============================================================================
// SECTION: Option Errors
// ============================================================================

/// Coarse classification of an [`OptionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionErrorKind {
    /// A required field or key is absent.
    MissingField,
    /// A field is present with the wrong primitive or container kind.
    WrongType,
    /// A quoted string contains a double quote.
    ForbiddenCharacter,
    /// A value fails a domain-specific legality check.
    InvalidValue,
}

/// First validation violation found in a raw option bag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionError {
    /// A required field or key is absent.
    #[error("\"{field}\" must be present")]
    MissingField {
        /// Path of the missing field.
        field: FieldPath,
    },
    /// A field has the wrong shape.
    #[error("\"{field}\" must be {expected}")]
    WrongType {
        /// Path of the offending field.
        field: FieldPath,
        /// Kind the field must have.
        expected: ValueKind,
    },
    /// A string destined for quoted interpolation contains `"`.
    #[error("\"{field}\" {reason}")]
    ForbiddenCharacter {
        /// Path of the offending string.
        field: FieldPath,
        /// Message wording for this field.
        reason: QuoteReason,
    },
    /// A value fails a legality check.
    #[error("\"{field}\" {reason}")]
    InvalidValue {
        /// Path of the offending value.
        field: FieldPath,
        /// Which legality rule failed.
        reason: InvalidReason,
    },
}

impl OptionError {
    /// Returns the error classification.
    #[must_use]
    pub const fn kind(&self) -> OptionErrorKind {
        match self {
            Self::MissingField { .. } => OptionErrorKind::MissingField,
            Self::WrongType { .. } => OptionErrorKind::WrongType,
            Self::ForbiddenCharacter { .. } => OptionErrorKind::ForbiddenCharacter,
            Self::InvalidValue { .. } => OptionErrorKind::InvalidValue,
        }
    }

    /// Returns the path of the offending field.
    #[must_use]
    pub const fn field(&self) -> &FieldPath {
        match self {
            Self::MissingField { field }
            | Self::WrongType { field, .. }
            | Self::ForbiddenCharacter { field, .. }
            | Self::InvalidValue { field, .. } => field,
        }
    }
}

// ============================================================================
// SECTION: Config Errors
// ============================================================================

/// Options file loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading the options file.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML or JSON parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid file, path, or top-level shape.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_quote_the_field_path() {
        let error = OptionError::InvalidValue {
            field: FieldPath::root("blockedIp").index(0),
            reason: InvalidReason::Ip,
        };
        assert_eq!(error.to_string(), "\"blockedIp[0]\" must be a valid IP");
        assert_eq!(error.kind(), OptionErrorKind::InvalidValue);
    }

    #[test]
    fn one_of_lists_every_literal() {
        let error = OptionError::InvalidValue {
            field: FieldPath::root("customContent").key("order"),
            reason: InvalidReason::OneOf(&["before", "after"]),
        };
        assert_eq!(error.to_string(), "\"customContent.order\" must be one of [before, after]");
    }

    #[test]
    fn wrong_type_uses_article() {
        let error = OptionError::WrongType {
            field: FieldPath::root("redirections"),
            expected: ValueKind::Array,
        };
        assert_eq!(error.to_string(), "\"redirections\" must be an array");
    }
}
