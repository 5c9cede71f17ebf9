// crates/htforge-core/src/render/blocks.rs
// ============================================================================
// Module: Directive Block Builders
// Description: Exact directive text for every option group.
// Purpose: Keep rendered bytes stable across releases.
// Dependencies: htforge-config
// ============================================================================

//! ## Overview
//! Each builder returns one [`DirectiveBlock`] whose first line is a comment.
//! Directive text is reproduced byte for byte, spacing quirks of the
//! script-injection and cache-header rules included.

// ============================================================================
// SECTION: Imports
// ============================================================================

use htforge_config::CustomHeader;
use htforge_config::DdosPrevention;
use htforge_config::FileExpirations;
use htforge_config::PolicyDirective;
use htforge_config::Redirection;

use super::DirectiveBlock;
use super::policy::PolicyKind;
use super::policy::header_value;

// ============================================================================
// SECTION: Fixed Blocks
// ============================================================================

/// Lines of one `<Location>` cache-busting section, minus the opener.
const NO_CACHE_LINES: [&str; 14] = [
    "\t<IfModule mod_expires.c>",
    "\t\tExpiresActive Off",
    "\t</IfModule>",
    "\t<IfModule mod_headers.c>",
    "\t\tFileETag None",
    "\t\tHeader unset ETag",
    "\t\tHeader unset Pragma",
    "\t\tHeader unset Cache - Control",
    "\t\tHeader unset Last - Modified",
    "\t\tHeader set Pragma \"no-cache\"",
    "\t\tHeader set Cache - Control \"max-age=0, no-cache, no-store, must-revalidate\"",
    "\t\tHeader set Expires \"Thu, 1 Jan 1970 00:00:00 GMT\"",
    "\t</IfModule>",
    "</Location>",
];

/// Query-string filters applied when script injection is blocked.
const SCRIPT_INJECTION_LINES: [&str; 6] = [
    "Options + FollowSymLinks",
    "RewriteEngine On",
    "RewriteCond % { QUERY_STRING }(<|% 3C).* script.* (>|% 3E)[NC, OR]",
    "RewriteCond % { QUERY_STRING } GLOBALS(=|[|% [0 - 9A - Z]{ 0, 2})[OR]",
    "RewriteCond % { QUERY_STRING } _REQUEST(=|[|% [0 - 9A - Z]{ 0, 2})",
    "RewriteRule ^ (.*)$ index.html[F, L]",
];

/// Disables directory listings.
pub(crate) fn directory_index() -> DirectiveBlock {
    DirectiveBlock::new("# Disable directory index").line("Options All -Indexes")
}

/// Hides the server signature.
pub(crate) fn server_signature() -> DirectiveBlock {
    DirectiveBlock::new("# Prevent your server from sending the version of the server")
        .line("ServerSignature Off")
}

/// Rejects TRACE/TRACK requests.
pub(crate) fn trace_methods() -> DirectiveBlock {
    DirectiveBlock::new("# Prevent from being able to ping this domain")
        .line("RewriteEngine on")
        .line("RewriteCond %{REQUEST_METHOD} ^(TRACE|TRACK)")
        .line("RewriteRule .* - [F]")
}

/// Redirects to HTTPS and sends HSTS.
pub(crate) fn force_https() -> DirectiveBlock {
    DirectiveBlock::new("# Users' browser will be forced to visit the HTTPS version of your web app")
        .line("RewriteEngine On")
        .line("RewriteCond %{HTTPS} off")
        .line("RewriteRule (.*) https://%{HTTP_HOST}%{REQUEST_URI} [R,L]")
        .line("Header set Strict-Transport-Security \"max-age=31536000; includeSubDomains\"")
}

/// Filters query strings carrying script payloads.
pub(crate) fn script_injection() -> DirectiveBlock {
    SCRIPT_INJECTION_LINES
        .iter()
        .fold(DirectiveBlock::new("# Preventing script injection"), |block, line| block.line(*line))
}

// ============================================================================
// SECTION: Data Blocks
// ============================================================================

/// Enables `mod_deflate` for the given MIME types.
pub(crate) fn text_compression(mime_types: &[String]) -> DirectiveBlock {
    let mut block = DirectiveBlock::new("# Enable text compression").line("<IfModule mod_deflate.c>");
    for mime in mime_types {
        block.push(format!("\tAddOutputFilterByType DEFLATE {mime}"));
    }
    block.line("</IfModule>")
}

/// Disables browser caching for each listed location.
pub(crate) fn not_cached_files(files: &[String]) -> DirectiveBlock {
    let mut block =
        DirectiveBlock::new("# Prevent the following files to be cached by your users' browser");
    for file in files {
        block.push(format!("<Location \"{file}\">"));
        for line in NO_CACHE_LINES {
            block.push(line);
        }
    }
    block
}

/// Emits `Redirect 301` rules.
pub(crate) fn redirections(redirections: &[Redirection]) -> DirectiveBlock {
    let mut block = DirectiveBlock::new("# Permanents redirections (301)");
    for redirection in redirections {
        block.push(format!("Redirect 301 {} {}", redirection.from, redirection.to));
    }
    block
}

/// Caps the request body size.
pub(crate) fn request_body_limit(ddos: &DdosPrevention) -> DirectiveBlock {
    DirectiveBlock::new("# Preventing DDOS Attacks")
        .line(format!("LimitRequestBody {}", ddos.downloaded_files_size_limit))
}

/// Sets custom response headers.
pub(crate) fn custom_headers(headers: &[CustomHeader]) -> DirectiveBlock {
    let mut block = DirectiveBlock::new("# Custom headers");
    for header in headers {
        block.push(format!("Header set {} \"{}\"", header.name, header.value));
    }
    block
}

/// Denies the listed user agents.
pub(crate) fn blocked_user_agents(agents: &[String]) -> DirectiveBlock {
    DirectiveBlock::new("# Blocked user agents")
        .line(format!("SetEnvIfNoCase ^User-Agent$ .*({}) HTTP_SAFE_BADBOT", agents.join("|")))
        .line("Deny from env=HTTP_SAFE_BADBOT")
}

/// Denies the listed IP addresses.
pub(crate) fn blocked_ip(addresses: &[String]) -> DirectiveBlock {
    let mut block = DirectiveBlock::new("# Block IP addresses").line("order allow,deny");
    for address in addresses {
        block.push(format!("deny from {address}"));
    }
    block.line("allow from all")
}

/// Sets the `Feature-Policy` or `Content-Security-Policy` header.
pub(crate) fn policy_header(kind: PolicyKind, directives: &[PolicyDirective]) -> DirectiveBlock {
    let comment = match kind {
        PolicyKind::Feature => "# Feature policy",
        PolicyKind::ContentSecurity => "# Content Security Policy",
    };
    DirectiveBlock::new(comment).line(format!(
        "Header set {} \"{}\"",
        kind.header_name(),
        header_value(kind, directives)
    ))
}

/// Emits the default and per-type expiration blocks that apply.
pub(crate) fn file_expirations(expirations: &FileExpirations) -> Vec<DirectiveBlock> {
    let mut blocks = Vec::with_capacity(2);
    if let Some(default) = &expirations.default {
        blocks.push(
            DirectiveBlock::new("# Default file expiration")
                .line(format!("ExpiresDefault \"{default}\"")),
        );
    }
    if !expirations.file_types.is_empty() {
        let mut block = DirectiveBlock::new("# Files expirations");
        for rule in &expirations.file_types {
            block.push(format!("ExpiresByType {} \"{}\"", rule.mime_type, rule.expires));
        }
        blocks.push(block);
    }
    blocks
}
