// crates/htforge-config/tests/field_validation.rs
// =============================================================================
// Module: Field Validation Tests
// Description: Exact diagnostics for malformed option groups.
// Purpose: Pin the field path and reason of every documented failure.
// =============================================================================

//! Field-level validation tests for htforge-config.

use serde_json::json;

mod common;

use common::expect_error;
use common::with_defaults;

type TestResult = Result<(), String>;

// ============================================================================
// SECTION: Presence and Types
// ============================================================================

#[test]
fn empty_bag_reports_first_group() -> TestResult {
    expect_error(&common::raw(json!({})), "\"blockedIp\" must be present")
}

#[test]
fn blocked_ip_entries_must_be_strings() -> TestResult {
    expect_error(&with_defaults(json!({ "blockedIp": [42] })), "\"blockedIp[0]\" must be a string")
}

#[test]
fn force_https_must_be_boolean() -> TestResult {
    expect_error(&with_defaults(json!({ "forceHttps": 42 })), "\"forceHttps\" must be a boolean")
}

#[test]
fn feature_policy_values_must_be_arrays() -> TestResult {
    expect_error(
        &with_defaults(json!({ "featurePolicy": { "geolocation": 42 } })),
        "\"featurePolicy.geolocation\" must be an array",
    )
}

#[test]
fn feature_policy_tokens_must_be_strings() -> TestResult {
    expect_error(
        &with_defaults(json!({ "featurePolicy": { "geolocation": [42] } })),
        "\"featurePolicy.geolocation[0]\" must be a string",
    )
}

#[test]
fn custom_headers_values_must_be_strings() -> TestResult {
    expect_error(
        &with_defaults(json!({ "customHeaders": { "X-Generated-By": 42 } })),
        "\"customHeaders.X-Generated-By\" must be a string",
    )
}

#[test]
fn custom_headers_must_be_a_mapping() -> TestResult {
    expect_error(
        &with_defaults(json!({ "customHeaders": ["X-Generated-By"] })),
        "\"customHeaders\" must be an object",
    )
}

// ============================================================================
// SECTION: Redirections
// ============================================================================

#[test]
fn redirections_must_be_an_array() -> TestResult {
    expect_error(&with_defaults(json!({ "redirections": 42 })), "\"redirections\" must be an array")
}

#[test]
fn redirection_entries_must_be_objects() -> TestResult {
    expect_error(
        &with_defaults(json!({ "redirections": [42] })),
        "\"redirections[0]\" must be an object",
    )
}

#[test]
fn redirection_requires_from_then_to() -> TestResult {
    expect_error(
        &with_defaults(json!({ "redirections": [{}] })),
        "\"redirections[0].from\" must be present",
    )?;
    expect_error(
        &with_defaults(json!({ "redirections": [{ "from": "test" }] })),
        "\"redirections[0].to\" must be present",
    )
}

#[test]
fn redirection_endpoints_must_be_strings() -> TestResult {
    expect_error(
        &with_defaults(json!({ "redirections": [{ "from": 42, "to": "test" }] })),
        "\"redirections[0].from\" must be a string",
    )?;
    expect_error(
        &with_defaults(json!({ "redirections": [{ "from": "test", "to": 42 }] })),
        "\"redirections[0].to\" must be a string",
    )
}

#[test]
fn redirection_endpoints_must_be_locations() -> TestResult {
    let reason = "must be an absolute path or a valid HTTP URL";
    expect_error(
        &with_defaults(json!({ "redirections": [{ "from": "/about", "to": "./about-us" }] })),
        &format!("\"redirections[0].to\" {reason}"),
    )?;
    expect_error(
        &with_defaults(json!({ "redirections": [{ "from": "./about", "to": "/about-us" }] })),
        &format!("\"redirections[0].from\" {reason}"),
    )?;
    expect_error(
        &with_defaults(json!({ "redirections": [{ "from": "/about", "to": "example.com/about-us" }] })),
        &format!("\"redirections[0].to\" {reason}"),
    )?;
    expect_error(
        &with_defaults(json!({ "redirections": [{ "from": "example.com/test", "to": "/about-us" }] })),
        &format!("\"redirections[0].from\" {reason}"),
    )
}

#[test]
fn later_redirection_is_reported_with_its_index() -> TestResult {
    expect_error(
        &with_defaults(json!({ "redirections": [
            { "from": "/a", "to": "/b" },
            { "from": "/c", "to": "ftp://example.com/d" }
        ] })),
        "\"redirections[1].to\" must be an absolute path or a valid HTTP URL",
    )
}

// ============================================================================
// SECTION: Optional Groups
// ============================================================================

#[test]
fn ddos_group_shape_and_range() -> TestResult {
    expect_error(
        &with_defaults(json!({ "preventDdosAttacks": 42 })),
        "\"preventDdosAttacks\" must be an object",
    )?;
    expect_error(
        &with_defaults(json!({ "preventDdosAttacks": {} })),
        "\"preventDdosAttacks.downloadedFilesSizeLimit\" must be present",
    )?;
    expect_error(
        &with_defaults(json!({ "preventDdosAttacks": { "downloadedFilesSizeLimit": "42" } })),
        "\"preventDdosAttacks.downloadedFilesSizeLimit\" must be a number",
    )?;
    expect_error(
        &with_defaults(json!({ "preventDdosAttacks": { "downloadedFilesSizeLimit": -42 } })),
        "\"preventDdosAttacks.downloadedFilesSizeLimit\" must be greater or equal to zero",
    )?;
    expect_error(
        &with_defaults(json!({ "preventDdosAttacks": { "downloadedFilesSizeLimit": -0.5 } })),
        "\"preventDdosAttacks.downloadedFilesSizeLimit\" must be greater or equal to zero",
    )
}

#[test]
fn ddos_non_negative_limits_are_kept_as_written() -> TestResult {
    for limit in [json!(0), json!(1.5), json!(10_485_760)] {
        let options = common::parse(&with_defaults(
            json!({ "preventDdosAttacks": { "downloadedFilesSizeLimit": limit.clone() } }),
        ))
        .map_err(|err| err.to_string())?;
        match options.prevent_ddos_attacks {
            Some(ddos) if ddos.downloaded_files_size_limit.to_string() == limit.to_string() => {}
            other => return Err(format!("unexpected ddos options for {limit}: {other:?}")),
        }
    }
    Ok(())
}

#[test]
fn null_optional_group_is_a_shape_error() -> TestResult {
    expect_error(
        &with_defaults(json!({ "customContent": null })),
        "\"customContent\" must be an object",
    )
}

#[test]
fn custom_content_presence_and_order() -> TestResult {
    expect_error(
        &with_defaults(json!({ "customContent": { "order": "before" } })),
        "\"customContent.content\" must be present",
    )?;
    expect_error(
        &with_defaults(json!({ "customContent": { "content": "foo" } })),
        "\"customContent.order\" must be present",
    )?;
    expect_error(
        &with_defaults(json!({ "customContent": { "content": "foo", "order": "bar" } })),
        "\"customContent.order\" must be one of [before, after]",
    )?;
    expect_error(
        &with_defaults(json!({ "customContent": { "content": 42, "order": "before" } })),
        "\"customContent.content\" must be a string",
    )
}

#[test]
fn file_expirations_checks() -> TestResult {
    expect_error(
        &with_defaults(json!({ "fileExpirations": { "default": "access \"plus\" one year" } })),
        "\"fileExpirations.default\" must not contain any double quote",
    )?;
    expect_error(
        &with_defaults(json!({ "fileExpirations": { "default": 42 } })),
        "\"fileExpirations.default\" must be a string",
    )?;
    expect_error(
        &with_defaults(json!({ "fileExpirations": { "fileTypes": 42 } })),
        "\"fileExpirations.fileTypes\" must be an object",
    )?;
    expect_error(
        &with_defaults(json!({ "fileExpirations": { "fileTypes": { "text/unknown": "access plus one year" } } })),
        "\"fileExpirations.fileTypes.text/unknown\" must be a valid MIME type",
    )?;
    expect_error(
        &with_defaults(json!({ "fileExpirations": { "fileTypes": { "text/html": 42 } } })),
        "\"fileExpirations.fileTypes.text/html\" must be a string",
    )?;
    expect_error(
        &with_defaults(json!({ "fileExpirations": { "fileTypes": { "text/html": "access \"plus\" one year" } } })),
        "\"fileExpirations.fileTypes.text/html\" must not contain any double quote",
    )
}

#[test]
fn empty_file_expirations_is_accepted() -> TestResult {
    let options = common::parse(&with_defaults(json!({ "fileExpirations": {} })))
        .map_err(|err| err.to_string())?;
    match options.file_expirations {
        Some(expirations) if expirations.default.is_none() && expirations.file_types.is_empty() => {
            Ok(())
        }
        other => Err(format!("unexpected expirations: {other:?}")),
    }
}

// ============================================================================
// SECTION: Domain Legality
// ============================================================================

#[test]
fn blocked_ip_must_be_complete() -> TestResult {
    expect_error(
        &with_defaults(json!({ "blockedIp": ["192.168.0."] })),
        "\"blockedIp[0]\" must be a valid IP",
    )
}

#[test]
fn text_compression_must_use_registered_types() -> TestResult {
    expect_error(
        &with_defaults(json!({ "textCompression": ["text/foo"] })),
        "\"textCompression[0]\" must be a valid MIME type",
    )
}

#[test]
fn registered_types_without_extensions_are_accepted() -> TestResult {
    let options = common::parse(&with_defaults(json!({
        "textCompression": ["font/otf", "application/vnd.api+json"],
        "fileExpirations": { "fileTypes": { "application/1d-interleaved-parityfec": "access plus 1 day" } }
    })))
    .map_err(|err| err.to_string())?;
    if options.text_compression != ["font/otf", "application/vnd.api+json"] {
        return Err(format!("unexpected compression types: {:?}", options.text_compression));
    }
    Ok(())
}

// ============================================================================
// SECTION: Quote Rejection
// ============================================================================

#[test]
fn quoted_fields_reject_double_quotes() -> TestResult {
    expect_error(
        &with_defaults(json!({ "notCachedFiles": ["\"/service-worker.js\"", "/assets/js/service-worker.js"] })),
        "\"notCachedFiles[0]\" contains a forbidden double quote",
    )?;
    expect_error(
        &with_defaults(json!({ "customHeaders": { "X-Generated-By": "\"htforge\" 0.1.0" } })),
        "\"customHeaders.X-Generated-By\" contains a forbidden double quote",
    )?;
    expect_error(
        &with_defaults(json!({ "featurePolicy": { "geolocation": ["self", "src", "\"google.com\""] } })),
        "\"featurePolicy.geolocation[2]\" contains a forbidden double quote",
    )?;
    expect_error(
        &with_defaults(json!({ "contentSecurityPolicy": { "image-src": ["self", "src", "\"google.com\""] } })),
        "\"contentSecurityPolicy.image-src[2]\" contains a forbidden double quote",
    )?;
    expect_error(
        &with_defaults(json!({ "customContent": { "order": "after", "content": "say \"hi\"" } })),
        "\"customContent.content\" contains a forbidden double quote",
    )
}

// ============================================================================
// SECTION: Accepted Bags
// ============================================================================

#[test]
fn defaults_are_accepted_and_unknown_keys_ignored() -> TestResult {
    let options = common::parse(&with_defaults(json!({
        "preventImageHotLinking": true,
        "hotLinkingRedirectLink": "https://example.com"
    })))
    .map_err(|err| err.to_string())?;
    if options != htforge_config::HtaccessOptions::default() {
        return Err(format!("expected documented defaults, got {options:?}"));
    }
    Ok(())
}

#[test]
fn mapping_groups_keep_author_order() -> TestResult {
    let options = common::parse(&with_defaults(json!({
        "customHeaders": { "X-Zeta": "z", "X-Alpha": "a" },
        "contentSecurityPolicy": { "script-src": ["self"], "default-src": ["none"] }
    })))
    .map_err(|err| err.to_string())?;
    let headers: Vec<&str> = options.custom_headers.iter().map(|h| h.name.as_str()).collect();
    let directives: Vec<&str> =
        options.content_security_policy.iter().map(|d| d.name.as_str()).collect();
    if headers != ["X-Zeta", "X-Alpha"] || directives != ["script-src", "default-src"] {
        return Err(format!("order lost: {headers:?} {directives:?}"));
    }
    Ok(())
}
