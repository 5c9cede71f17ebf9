// crates/htforge-config/src/options.rs
// ============================================================================
// Module: Options Model
// Description: Strongly typed htaccess options and their documented defaults.
// Purpose: Single source of truth for option groups, keys, and defaults.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! [`HtaccessOptions`] is the trusted form of the option bag, produced only by
//! [`crate::parse_options`]. Mapping-typed options are stored as ordered entry
//! lists so the rendered output follows the author's key order.
//!
//! The raw bag uses camelCase keys; [`OptionGroup::key`] maps each group to
//! its raw key.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Map;
use serde_json::Number;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Option Groups
// ============================================================================

/// Named option groups, one per top-level option key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionGroup {
    /// `blockedIp`
    BlockedIp,
    /// `blockedUserAgents`
    BlockedUserAgents,
    /// `contentSecurityPolicy`
    ContentSecurityPolicy,
    /// `customContent`
    CustomContent,
    /// `customHeaders`
    CustomHeaders,
    /// `disableDirectoryIndex`
    DisableDirectoryIndex,
    /// `disableServerSignature`
    DisableServerSignature,
    /// `featurePolicy`
    FeaturePolicy,
    /// `fileExpirations`
    FileExpirations,
    /// `forceHttps`
    ForceHttps,
    /// `notCachedFiles`
    NotCachedFiles,
    /// `pingable`
    Pingable,
    /// `preventDdosAttacks`
    PreventDdosAttacks,
    /// `preventScriptInjection`
    PreventScriptInjection,
    /// `redirections`
    Redirections,
    /// `textCompression`
    TextCompression,
}

impl OptionGroup {
    /// Returns the raw option key for this group.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::BlockedIp => "blockedIp",
            Self::BlockedUserAgents => "blockedUserAgents",
            Self::ContentSecurityPolicy => "contentSecurityPolicy",
            Self::CustomContent => "customContent",
            Self::CustomHeaders => "customHeaders",
            Self::DisableDirectoryIndex => "disableDirectoryIndex",
            Self::DisableServerSignature => "disableServerSignature",
            Self::FeaturePolicy => "featurePolicy",
            Self::FileExpirations => "fileExpirations",
            Self::ForceHttps => "forceHttps",
            Self::NotCachedFiles => "notCachedFiles",
            Self::Pingable => "pingable",
            Self::PreventDdosAttacks => "preventDdosAttacks",
            Self::PreventScriptInjection => "preventScriptInjection",
            Self::Redirections => "redirections",
            Self::TextCompression => "textCompression",
        }
    }

    /// Returns true when absence of the group is not an error.
    #[must_use]
    pub const fn is_optional(self) -> bool {
        matches!(self, Self::CustomContent | Self::FileExpirations | Self::PreventDdosAttacks)
    }
}

// ============================================================================
// SECTION: Option Types
// ============================================================================

/// Validated htaccess options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtaccessOptions {
    /// IPv4/IPv6 literals denied access.
    pub blocked_ip: Vec<String>,
    /// User-agent fragments denied access.
    pub blocked_user_agents: Vec<String>,
    /// Content-Security-Policy directives in author order.
    pub content_security_policy: Vec<PolicyDirective>,
    /// Literal block placed before or after the generated rules.
    pub custom_content: Option<CustomContent>,
    /// Extra response headers in author order.
    pub custom_headers: Vec<CustomHeader>,
    /// Disable directory listings.
    pub disable_directory_index: bool,
    /// Stop advertising the server version.
    pub disable_server_signature: bool,
    /// Feature-Policy directives in author order.
    pub feature_policy: Vec<PolicyDirective>,
    /// Browser cache expiration settings.
    pub file_expirations: Option<FileExpirations>,
    /// Redirect plain HTTP to HTTPS and send HSTS.
    pub force_https: bool,
    /// Paths served with cache-busting headers.
    pub not_cached_files: Vec<String>,
    /// Allow TRACE/TRACK requests.
    pub pingable: bool,
    /// Request body size cap.
    pub prevent_ddos_attacks: Option<DdosPrevention>,
    /// Reject query strings carrying script payloads.
    pub prevent_script_injection: bool,
    /// Permanent redirections in author order.
    pub redirections: Vec<Redirection>,
    /// MIME types compressed with `mod_deflate`.
    pub text_compression: Vec<String>,
}

impl Default for HtaccessOptions {
    fn default() -> Self {
        Self {
            blocked_ip: Vec::new(),
            blocked_user_agents: Vec::new(),
            content_security_policy: Vec::new(),
            custom_content: None,
            custom_headers: Vec::new(),
            disable_directory_index: false,
            disable_server_signature: false,
            feature_policy: Vec::new(),
            file_expirations: None,
            force_https: false,
            not_cached_files: Vec::new(),
            pingable: true,
            prevent_ddos_attacks: None,
            prevent_script_injection: false,
            redirections: Vec::new(),
            text_compression: Vec::new(),
        }
    }
}

/// One `Redirect 301` rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirection {
    /// Source path or URL.
    pub from: String,
    /// Target path or URL.
    pub to: String,
}

/// One policy directive and its source tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyDirective {
    /// Directive or feature name (e.g. `img-src`, `camera`).
    pub name: String,
    /// Raw tokens before keyword normalization.
    pub tokens: Vec<String>,
}

/// One custom response header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomHeader {
    /// Header name.
    pub name: String,
    /// Header value, free of double quotes.
    pub value: String,
}

/// Request body size limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DdosPrevention {
    /// Maximum request body size in bytes, kept as written.
    pub downloaded_files_size_limit: Number,
}

/// Browser cache expiration settings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileExpirations {
    /// Value for `ExpiresDefault`.
    pub default: Option<String>,
    /// Per-MIME `ExpiresByType` rules in author order.
    pub file_types: Vec<ExpirationRule>,
}

/// One `ExpiresByType` rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpirationRule {
    /// Registered MIME type.
    pub mime_type: String,
    /// Expiration expression, e.g. `access plus one day`.
    pub expires: String,
}

/// Literal block spliced around the generated rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomContent {
    /// Placement relative to the generated rules.
    pub order: ContentOrder,
    /// Literal text.
    pub content: String,
}

/// Placement of [`CustomContent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentOrder {
    /// Prepend before the generated rules.
    Before,
    /// Append after the generated rules.
    After,
}

impl ContentOrder {
    /// Accepted literals, in display order.
    pub const NAMES: &'static [&'static str] = &["before", "after"];

    /// Parses an exact placement literal.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "before" => Some(Self::Before),
            "after" => Some(Self::After),
            _ => None,
        }
    }
}

// ============================================================================
// SECTION: Documented Defaults
// ============================================================================

/// Returns the documented defaults as a raw option bag.
///
/// Optional groups are absent. Callers overlay user options on this bag before
/// validation; the validator itself never fills in defaults.
#[must_use]
pub fn default_options_value() -> Value {
    json!({
        "blockedUserAgents": [],
        "blockedIp": [],
        "contentSecurityPolicy": {},
        "customHeaders": {},
        "disableDirectoryIndex": false,
        "featurePolicy": {},
        "forceHttps": false,
        "notCachedFiles": [],
        "pingable": true,
        "preventScriptInjection": false,
        "redirections": [],
        "disableServerSignature": false,
        "textCompression": [],
    })
}

/// Overlays user options on the documented defaults (shallow, top-level keys).
#[must_use]
pub fn merge_defaults(options: Map<String, Value>) -> Map<String, Value> {
    let mut merged = match default_options_value() {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    for (key, value) in options {
        merged.insert(key, value);
    }
    merged
}

// ============================================================================
// SECTION: Tests
// ============================================================================
