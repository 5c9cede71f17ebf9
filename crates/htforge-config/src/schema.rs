// crates/htforge-config/src/schema.rs
// ============================================================================
// Module: Options Schema
// Description: JSON schema builder for the raw option bag.
// Purpose: Canonical machine-readable description of htforge options.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! The schema mirrors the shapes enforced by [`crate::parse_options`] and
//! carries the documented defaults. Registry lookups (IP literals, MIME types,
//! locations) cannot be expressed in JSON Schema and are left to the
//! validator; double-quote rejection is expressed as a pattern.

use serde_json::Value;
use serde_json::json;

use crate::options::ContentOrder;

/// Pattern matching strings without a double quote.
const NO_QUOTE_PATTERN: &str = "^[^\"]*$";

/// Returns the JSON schema for the htforge option bag.
#[must_use]
pub fn options_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "$id": "htforge://schemas/options.schema.json",
        "title": "htforge Options",
        "description": "Options for rendering an Apache .htaccess file at build time.",
        "type": "object",
        "properties": {
            "blockedIp": string_list_schema("IPv4 or IPv6 literals denied access.", None),
            "blockedUserAgents": string_list_schema("User-agent fragments denied access.", None),
            "contentSecurityPolicy": policy_schema("Content-Security-Policy directives."),
            "customContent": custom_content_schema(),
            "customHeaders": {
                "type": "object",
                "additionalProperties": quoted_string_schema(),
                "default": {},
                "description": "Extra response headers, rendered in key order."
            },
            "disableDirectoryIndex": flag_schema(false, "Disable directory listings."),
            "disableServerSignature": flag_schema(false, "Hide the server version."),
            "featurePolicy": policy_schema("Feature-Policy directives."),
            "fileExpirations": file_expirations_schema(),
            "forceHttps": flag_schema(false, "Redirect to HTTPS and send HSTS."),
            "notCachedFiles": string_list_schema(
                "Paths served with cache-busting headers.",
                Some(NO_QUOTE_PATTERN)
            ),
            "pingable": flag_schema(true, "Allow TRACE/TRACK requests."),
            "preventDdosAttacks": {
                "type": "object",
                "properties": {
                    "downloadedFilesSizeLimit": {
                        "type": "number",
                        "minimum": 0,
                        "description": "Maximum request body size in bytes."
                    }
                },
                "required": ["downloadedFilesSizeLimit"]
            },
            "preventScriptInjection": flag_schema(false, "Reject script payloads in query strings."),
            "redirections": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "from": location_schema("Source path or URL."),
                        "to": location_schema("Target path or URL.")
                    },
                    "required": ["from", "to"]
                },
                "default": [],
                "description": "Permanent (301) redirections."
            },
            "textCompression": string_list_schema("MIME types compressed with mod_deflate.", None)
        },
        "additionalProperties": true
    })
}

/// Schema for a boolean flag.
fn flag_schema(default: bool, description: &str) -> Value {
    json!({
        "type": "boolean",
        "default": default,
        "description": description
    })
}

/// Schema for an array of strings.
fn string_list_schema(description: &str, pattern: Option<&str>) -> Value {
    let items = pattern.map_or_else(|| json!({ "type": "string" }), |pattern| {
        json!({ "type": "string", "pattern": pattern })
    });
    json!({
        "type": "array",
        "items": items,
        "default": [],
        "description": description
    })
}

/// Schema for a string interpolated inside double quotes.
fn quoted_string_schema() -> Value {
    json!({ "type": "string", "pattern": NO_QUOTE_PATTERN })
}

/// Schema for a redirection endpoint.
fn location_schema(description: &str) -> Value {
    json!({ "type": "string", "description": description })
}

/// Schema for a directive map of token lists.
fn policy_schema(description: &str) -> Value {
    json!({
        "type": "object",
        "additionalProperties": {
            "type": "array",
            "items": quoted_string_schema()
        },
        "default": {},
        "description": description
    })
}

/// Schema for the `customContent` group.
fn custom_content_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "order": {
                "type": "string",
                "enum": ContentOrder::NAMES,
                "description": "Placement relative to the generated rules."
            },
            "content": quoted_string_schema()
        },
        "required": ["order", "content"]
    })
}

/// Schema for the `fileExpirations` group.
fn file_expirations_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "default": quoted_string_schema(),
            "fileTypes": {
                "type": "object",
                "additionalProperties": quoted_string_schema(),
                "description": "ExpiresByType values keyed by MIME type."
            }
        }
    })
}
