// crates/htforge-config/src/validate.rs
// ============================================================================
// Module: Option Validation
// Description: Converts a raw option bag into trusted HtaccessOptions.
// Purpose: Fail fast on the first violation, in a fixed group order.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! [`parse_options`] walks [`CHECKS`] in order. Each entry checks one option
//! group and, when it passes, fills the matching field of the typed options.
//! Nothing is returned until every group passes, so callers never see a
//! partially validated value.
//!
//! ## Invariants
//! - Checks stop at the first violation; errors are never aggregated.
//! - Within a group, primitive checks run as: present, container kind,
//!   element kind, domain legality. Container-wide passes complete before the
//!   next pass starts.
//! - Optional groups are skipped only when their key is absent.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Map;
use serde_json::Number;
use serde_json::Value;

use crate::error::InvalidReason;
use crate::error::OptionError;
use crate::error::QuoteReason;
use crate::error::ValueKind;
use crate::options::ContentOrder;
use crate::options::CustomContent;
use crate::options::CustomHeader;
use crate::options::DdosPrevention;
use crate::options::ExpirationRule;
use crate::options::FileExpirations;
use crate::options::HtaccessOptions;
use crate::options::OptionGroup;
use crate::options::PolicyDirective;
use crate::options::Redirection;
use crate::path::FieldPath;
use crate::recognizers::Recognizers;

// ============================================================================
// SECTION: Check Table
// ============================================================================

/// Raw option bag as loaded from TOML or JSON.
pub type RawOptions = Map<String, Value>;

/// Signature shared by every group check.
type CheckFn = fn(&RawOptions, &Recognizers<'_>, &mut HtaccessOptions) -> Result<(), OptionError>;

/// One entry of the validation table.
struct GroupCheck {
    /// Group validated by this entry.
    group: OptionGroup,
    /// Check that validates the group and fills its typed field.
    check: CheckFn,
}

/// Validation table, in reporting order.
const CHECKS: [GroupCheck; 16] = [
    GroupCheck { group: OptionGroup::BlockedIp, check: check_blocked_ip },
    GroupCheck { group: OptionGroup::BlockedUserAgents, check: check_blocked_user_agents },
    GroupCheck { group: OptionGroup::ContentSecurityPolicy, check: check_content_security_policy },
    GroupCheck { group: OptionGroup::CustomContent, check: check_custom_content },
    GroupCheck { group: OptionGroup::CustomHeaders, check: check_custom_headers },
    GroupCheck { group: OptionGroup::DisableDirectoryIndex, check: check_disable_directory_index },
    GroupCheck { group: OptionGroup::FeaturePolicy, check: check_feature_policy },
    GroupCheck { group: OptionGroup::ForceHttps, check: check_force_https },
    GroupCheck { group: OptionGroup::NotCachedFiles, check: check_not_cached_files },
    GroupCheck { group: OptionGroup::Pingable, check: check_pingable },
    GroupCheck { group: OptionGroup::PreventDdosAttacks, check: check_prevent_ddos_attacks },
    GroupCheck {
        group: OptionGroup::PreventScriptInjection,
        check: check_prevent_script_injection,
    },
    GroupCheck { group: OptionGroup::Redirections, check: check_redirections },
    GroupCheck {
        group: OptionGroup::DisableServerSignature,
        check: check_disable_server_signature,
    },
    GroupCheck { group: OptionGroup::TextCompression, check: check_text_compression },
    GroupCheck { group: OptionGroup::FileExpirations, check: check_file_expirations },
];

// ============================================================================
// SECTION: Public API
// ============================================================================

/// Validates a raw option bag and converts it into [`HtaccessOptions`].
///
/// # Errors
///
/// Returns the first [`OptionError`] found, in [`validation_order`] order.
pub fn parse_options(
    raw: &RawOptions,
    recognizers: &Recognizers<'_>,
) -> Result<HtaccessOptions, OptionError> {
    let mut options = HtaccessOptions::default();
    for entry in &CHECKS {
        (entry.check)(raw, recognizers, &mut options)?;
    }
    Ok(options)
}

/// Validates a raw option bag without keeping the typed result.
///
/// # Errors
///
/// Returns the first [`OptionError`] found.
pub fn validate_options(raw: &RawOptions, recognizers: &Recognizers<'_>) -> Result<(), OptionError> {
    parse_options(raw, recognizers).map(|_| ())
}

/// Returns the order in which option groups are validated.
#[must_use]
pub fn validation_order() -> Vec<OptionGroup> {
    CHECKS.iter().map(|entry| entry.group).collect()
}

// ============================================================================
// SECTION: Group Checks
// ============================================================================

/// Checks `blockedIp`.
fn check_blocked_ip(
    raw: &RawOptions,
    recognizers: &Recognizers<'_>,
    options: &mut HtaccessOptions,
) -> Result<(), OptionError> {
    let (value, field) = required(raw, OptionGroup::BlockedIp)?;
    let entries = string_items(expect_array(value, &field)?, &field)?;
    for (index, ip) in entries.iter().enumerate() {
        if !recognizers.ip.is_ip(ip) {
            return Err(invalid(field.index(index), InvalidReason::Ip));
        }
    }
    options.blocked_ip = owned(&entries);
    Ok(())
}

/// Checks `blockedUserAgents`.
fn check_blocked_user_agents(
    raw: &RawOptions,
    _recognizers: &Recognizers<'_>,
    options: &mut HtaccessOptions,
) -> Result<(), OptionError> {
    let (value, field) = required(raw, OptionGroup::BlockedUserAgents)?;
    let entries = string_items(expect_array(value, &field)?, &field)?;
    options.blocked_user_agents = owned(&entries);
    Ok(())
}

/// Checks `contentSecurityPolicy`.
fn check_content_security_policy(
    raw: &RawOptions,
    _recognizers: &Recognizers<'_>,
    options: &mut HtaccessOptions,
) -> Result<(), OptionError> {
    options.content_security_policy = policy_directives(raw, OptionGroup::ContentSecurityPolicy)?;
    Ok(())
}

/// Checks the optional `customContent` group.
fn check_custom_content(
    raw: &RawOptions,
    _recognizers: &Recognizers<'_>,
    options: &mut HtaccessOptions,
) -> Result<(), OptionError> {
    let Some((value, field)) = group_value(raw, OptionGroup::CustomContent)? else {
        return Ok(());
    };
    let object = expect_object(value, &field)?;
    let (order, order_field) = member(object, "order", &field)?;
    let (content, content_field) = member(object, "content", &field)?;
    let order = order
        .as_str()
        .and_then(ContentOrder::parse)
        .ok_or_else(|| invalid(order_field, InvalidReason::OneOf(ContentOrder::NAMES)))?;
    let content = expect_string(content, &content_field)?;
    reject_quote(content, &content_field, QuoteReason::Forbidden)?;
    options.custom_content = Some(CustomContent {
        order,
        content: content.to_string(),
    });
    Ok(())
}

/// Checks `customHeaders`.
fn check_custom_headers(
    raw: &RawOptions,
    _recognizers: &Recognizers<'_>,
    options: &mut HtaccessOptions,
) -> Result<(), OptionError> {
    let (value, field) = required(raw, OptionGroup::CustomHeaders)?;
    let headers = string_values(expect_object(value, &field)?, &field)?;
    for (name, header_value) in &headers {
        reject_quote(header_value, &field.key(name), QuoteReason::Forbidden)?;
    }
    options.custom_headers = headers
        .into_iter()
        .map(|(name, value)| CustomHeader {
            name: name.to_string(),
            value: value.to_string(),
        })
        .collect();
    Ok(())
}

/// Checks `disableDirectoryIndex`.
fn check_disable_directory_index(
    raw: &RawOptions,
    _recognizers: &Recognizers<'_>,
    options: &mut HtaccessOptions,
) -> Result<(), OptionError> {
    options.disable_directory_index = flag(raw, OptionGroup::DisableDirectoryIndex)?;
    Ok(())
}

/// Checks `featurePolicy`.
fn check_feature_policy(
    raw: &RawOptions,
    _recognizers: &Recognizers<'_>,
    options: &mut HtaccessOptions,
) -> Result<(), OptionError> {
    options.feature_policy = policy_directives(raw, OptionGroup::FeaturePolicy)?;
    Ok(())
}

/// Checks `forceHttps`.
fn check_force_https(
    raw: &RawOptions,
    _recognizers: &Recognizers<'_>,
    options: &mut HtaccessOptions,
) -> Result<(), OptionError> {
    options.force_https = flag(raw, OptionGroup::ForceHttps)?;
    Ok(())
}

/// Checks `notCachedFiles`.
fn check_not_cached_files(
    raw: &RawOptions,
    _recognizers: &Recognizers<'_>,
    options: &mut HtaccessOptions,
) -> Result<(), OptionError> {
    let (value, field) = required(raw, OptionGroup::NotCachedFiles)?;
    let entries = string_items(expect_array(value, &field)?, &field)?;
    for (index, file) in entries.iter().enumerate() {
        reject_quote(file, &field.index(index), QuoteReason::Forbidden)?;
    }
    options.not_cached_files = owned(&entries);
    Ok(())
}

/// Checks `pingable`.
fn check_pingable(
    raw: &RawOptions,
    _recognizers: &Recognizers<'_>,
    options: &mut HtaccessOptions,
) -> Result<(), OptionError> {
    options.pingable = flag(raw, OptionGroup::Pingable)?;
    Ok(())
}

/// Checks the optional `preventDdosAttacks` group.
fn check_prevent_ddos_attacks(
    raw: &RawOptions,
    _recognizers: &Recognizers<'_>,
    options: &mut HtaccessOptions,
) -> Result<(), OptionError> {
    let Some((value, field)) = group_value(raw, OptionGroup::PreventDdosAttacks)? else {
        return Ok(());
    };
    let object = expect_object(value, &field)?;
    let (limit, limit_field) = member(object, "downloadedFilesSizeLimit", &field)?;
    let Some(number) = limit.as_number() else {
        return Err(wrong_type(limit_field, ValueKind::Number));
    };
    check_size_limit(number).map_err(|reason| invalid(limit_field, reason))?;
    options.prevent_ddos_attacks = Some(DdosPrevention {
        downloaded_files_size_limit: number.clone(),
    });
    Ok(())
}

/// Checks `preventScriptInjection`.
fn check_prevent_script_injection(
    raw: &RawOptions,
    _recognizers: &Recognizers<'_>,
    options: &mut HtaccessOptions,
) -> Result<(), OptionError> {
    options.prevent_script_injection = flag(raw, OptionGroup::PreventScriptInjection)?;
    Ok(())
}

/// Checks `redirections`, one entry at a time.
fn check_redirections(
    raw: &RawOptions,
    recognizers: &Recognizers<'_>,
    options: &mut HtaccessOptions,
) -> Result<(), OptionError> {
    let (value, field) = required(raw, OptionGroup::Redirections)?;
    let items = expect_array(value, &field)?;
    let mut redirections = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let entry_field = field.index(index);
        let entry = expect_object(item, &entry_field)?;
        let (from, from_field) = member(entry, "from", &entry_field)?;
        let (to, to_field) = member(entry, "to", &entry_field)?;
        let from = expect_string(from, &from_field)?;
        let to = expect_string(to, &to_field)?;
        if !recognizers.location.is_location(from) {
            return Err(invalid(from_field, InvalidReason::Location));
        }
        if !recognizers.location.is_location(to) {
            return Err(invalid(to_field, InvalidReason::Location));
        }
        redirections.push(Redirection {
            from: from.to_string(),
            to: to.to_string(),
        });
    }
    options.redirections = redirections;
    Ok(())
}

/// Checks `disableServerSignature`.
fn check_disable_server_signature(
    raw: &RawOptions,
    _recognizers: &Recognizers<'_>,
    options: &mut HtaccessOptions,
) -> Result<(), OptionError> {
    options.disable_server_signature = flag(raw, OptionGroup::DisableServerSignature)?;
    Ok(())
}

/// Checks `textCompression`.
fn check_text_compression(
    raw: &RawOptions,
    recognizers: &Recognizers<'_>,
    options: &mut HtaccessOptions,
) -> Result<(), OptionError> {
    let (value, field) = required(raw, OptionGroup::TextCompression)?;
    let entries = string_items(expect_array(value, &field)?, &field)?;
    for (index, mime) in entries.iter().enumerate() {
        if !recognizers.mime.is_registered(mime) {
            return Err(invalid(field.index(index), InvalidReason::MimeType));
        }
    }
    options.text_compression = owned(&entries);
    Ok(())
}

/// Checks the optional `fileExpirations` group.
fn check_file_expirations(
    raw: &RawOptions,
    recognizers: &Recognizers<'_>,
    options: &mut HtaccessOptions,
) -> Result<(), OptionError> {
    let Some((value, field)) = group_value(raw, OptionGroup::FileExpirations)? else {
        return Ok(());
    };
    let object = expect_object(value, &field)?;

    let default = match object.get("default") {
        Some(value) => {
            let default_field = field.key("default");
            let text = expect_string(value, &default_field)?;
            reject_quote(text, &default_field, QuoteReason::MustNotContain)?;
            Some(text.to_string())
        }
        None => None,
    };

    let file_types = match object.get("fileTypes") {
        Some(value) => {
            let types_field = field.key("fileTypes");
            let rules = string_values(expect_object(value, &types_field)?, &types_field)?;
            for (mime, _) in &rules {
                if !recognizers.mime.is_registered(mime) {
                    return Err(invalid(types_field.key(mime), InvalidReason::MimeType));
                }
            }
            for (mime, expires) in &rules {
                reject_quote(expires, &types_field.key(mime), QuoteReason::MustNotContain)?;
            }
            rules
                .into_iter()
                .map(|(mime, expires)| ExpirationRule {
                    mime_type: mime.to_string(),
                    expires: expires.to_string(),
                })
                .collect()
        }
        None => Vec::new(),
    };

    options.file_expirations = Some(FileExpirations {
        default,
        file_types,
    });
    Ok(())
}

// ============================================================================
// SECTION: Shared Shapes
// ============================================================================

/// Parses a mapping of string arrays (`featurePolicy`, `contentSecurityPolicy`).
fn policy_directives(
    raw: &RawOptions,
    group: OptionGroup,
) -> Result<Vec<PolicyDirective>, OptionError> {
    let (value, field) = required(raw, group)?;
    let object = expect_object(value, &field)?;

    let mut arrays = Vec::with_capacity(object.len());
    for (name, value) in object {
        arrays.push((name.as_str(), expect_array(value, &field.key(name))?));
    }

    let mut directives = Vec::with_capacity(arrays.len());
    for (name, items) in arrays {
        directives.push((name, string_items(items, &field.key(name))?));
    }

    for (name, tokens) in &directives {
        let directive_field = field.key(name);
        for (index, token) in tokens.iter().enumerate() {
            reject_quote(token, &directive_field.index(index), QuoteReason::Forbidden)?;
        }
    }

    Ok(directives
        .into_iter()
        .map(|(name, tokens)| PolicyDirective {
            name: name.to_string(),
            tokens: owned(&tokens),
        })
        .collect())
}

// ============================================================================
// SECTION: Primitive Checks
// ============================================================================

/// Returns a top-level value and its path.
///
/// A missing optional group yields `None`; any other missing group is a
/// [`OptionError::MissingField`].
fn group_value(
    raw: &RawOptions,
    group: OptionGroup,
) -> Result<Option<(&Value, FieldPath)>, OptionError> {
    let field = FieldPath::root(group.key());
    match raw.get(group.key()) {
        Some(value) => Ok(Some((value, field))),
        None if group.is_optional() => Ok(None),
        None => Err(OptionError::MissingField {
            field,
        }),
    }
}

/// Returns a top-level value that must be present.
fn required(raw: &RawOptions, group: OptionGroup) -> Result<(&Value, FieldPath), OptionError> {
    group_value(raw, group)?.ok_or_else(|| OptionError::MissingField {
        field: FieldPath::root(group.key()),
    })
}

/// Returns a required nested member and its path.
fn member<'a>(
    object: &'a Map<String, Value>,
    key: &str,
    parent: &FieldPath,
) -> Result<(&'a Value, FieldPath), OptionError> {
    let field = parent.key(key);
    match object.get(key) {
        Some(value) => Ok((value, field)),
        None => Err(OptionError::MissingField {
            field,
        }),
    }
}

/// Reads a required boolean option.
fn flag(raw: &RawOptions, group: OptionGroup) -> Result<bool, OptionError> {
    let (value, field) = required(raw, group)?;
    value.as_bool().ok_or_else(|| wrong_type(field, ValueKind::Boolean))
}

/// Requires a sequence.
fn expect_array<'a>(value: &'a Value, field: &FieldPath) -> Result<&'a [Value], OptionError> {
    value.as_array().map(Vec::as_slice).ok_or_else(|| wrong_type(field.clone(), ValueKind::Array))
}

/// Requires a key/value mapping.
fn expect_object<'a>(
    value: &'a Value,
    field: &FieldPath,
) -> Result<&'a Map<String, Value>, OptionError> {
    value.as_object().ok_or_else(|| wrong_type(field.clone(), ValueKind::Object))
}

/// Requires a string.
fn expect_string<'a>(value: &'a Value, field: &FieldPath) -> Result<&'a str, OptionError> {
    value.as_str().ok_or_else(|| wrong_type(field.clone(), ValueKind::String))
}

/// Requires every sequence element to be a string.
fn string_items<'a>(items: &'a [Value], field: &FieldPath) -> Result<Vec<&'a str>, OptionError> {
    items.iter().enumerate().map(|(index, item)| expect_string(item, &field.index(index))).collect()
}

/// Requires every mapping value to be a string, keeping key order.
fn string_values<'a>(
    object: &'a Map<String, Value>,
    field: &FieldPath,
) -> Result<Vec<(&'a str, &'a str)>, OptionError> {
    object
        .iter()
        .map(|(key, value)| Ok((key.as_str(), expect_string(value, &field.key(key))?)))
        .collect()
}

/// Rejects strings containing a double quote.
fn reject_quote(value: &str, field: &FieldPath, reason: QuoteReason) -> Result<(), OptionError> {
    if value.contains('"') {
        return Err(OptionError::ForbiddenCharacter {
            field: field.clone(),
            reason,
        });
    }
    Ok(())
}

/// Rejects negative size limits; fractions and zero pass.
fn check_size_limit(number: &Number) -> Result<(), InvalidReason> {
    let negative = number.as_i64().is_some_and(|value| value < 0)
        || number.as_f64().is_some_and(|value| value < 0.0);
    if negative {
        return Err(InvalidReason::Negative);
    }
    Ok(())
}

/// Builds a [`OptionError::WrongType`].
const fn wrong_type(field: FieldPath, expected: ValueKind) -> OptionError {
    OptionError::WrongType {
        field,
        expected,
    }
}

/// Builds a [`OptionError::InvalidValue`].
const fn invalid(field: FieldPath, reason: InvalidReason) -> OptionError {
    OptionError::InvalidValue {
        field,
        reason,
    }
}

/// Copies borrowed strings into owned ones.
fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_string()).collect()
}

// ============================================================================
// SECTION: Tests
// ============================================================================
