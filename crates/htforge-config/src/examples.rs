// crates/htforge-config/src/examples.rs
// ============================================================================
// Module: Options Examples
// Description: Canonical example options file.
// Purpose: Deterministic example for docs and tooling.
// Dependencies: std
// ============================================================================

//! ## Overview
//! The example exercises every option group and is kept valid against both
//! the schema and the validator.

/// Returns a canonical example `htforge.toml`.
#[must_use]
pub fn options_toml_example() -> String {
    String::from(
        r##"disableDirectoryIndex = true
disableServerSignature = true
pingable = false
forceHttps = true
preventScriptInjection = true
blockedUserAgents = ["BadBot", "EvilScraper"]
blockedIp = ["203.0.113.7", "2001:db8::1"]
notCachedFiles = ["/service-worker.js"]
textCompression = ["text/html", "text/css", "image/svg+xml"]

[[redirections]]
from = "/about-us"
to = "https://example.com/about"

[featurePolicy]
camera = ["none"]
geolocation = ["self", "https://maps.example.com"]

[contentSecurityPolicy]
default-src = ["self"]
script-src = ["self", "unsafe-inline", "https://cdn.example.com"]

[customHeaders]
X-Frame-Options = "DENY"
X-Content-Type-Options = "nosniff"

[preventDdosAttacks]
downloadedFilesSizeLimit = 10485760

[fileExpirations]
default = "access plus 1 month"

[fileExpirations.fileTypes]
"text/css" = "access plus 1 year"
"image/png" = "access plus 1 year"

[customContent]
order = "after"
content = "# Managed by htforge"
"##,
    )
}
