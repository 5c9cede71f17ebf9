// crates/htforge-config/src/recognizers.rs
// ============================================================================
// Module: Syntactic Recognizers
// Description: IP literal, MIME registry, and path/URL recognition.
// Purpose: Narrow interfaces for the domain-legality checks of the validator.
// Dependencies: mime_guess, url
// ============================================================================

//! ## Overview
//! The validator never parses IPs, MIME types, or URLs itself; it asks the
//! recognizers bundled in [`Recognizers`]. The standard bundle is backed by the
//! `std::net` parsers, the bundled IANA media-type list with the `mime_guess`
//! table as a second source, and the `url` crate.
//!
//! ## Invariants
//! - Recognition is anchored: a prefix or partial match never passes.
//! - Recognizers are pure and total; they never fail, only answer.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashSet;
use std::net::Ipv4Addr;
use std::net::Ipv6Addr;
use std::path::Path;
use std::sync::OnceLock;

use url::Url;

// ============================================================================
// SECTION: Traits
// ============================================================================

/// Recognizes IP address literals.
pub trait IpRecognizer {
    /// Returns true for a full dotted-quad IPv4 literal.
    fn is_ipv4(&self, value: &str) -> bool;

    /// Returns true for a full IPv6 literal, optionally with a zone suffix.
    fn is_ipv6(&self, value: &str) -> bool;

    /// Returns true for either address family.
    fn is_ip(&self, value: &str) -> bool {
        self.is_ipv4(value) || self.is_ipv6(value)
    }
}

/// Looks up MIME types in a registry.
pub trait MimeRegistry {
    /// Returns true when `mime` is a registered `type/subtype`.
    fn is_registered(&self, mime: &str) -> bool;
}

/// Recognizes redirection endpoints.
pub trait LocationRecognizer {
    /// Returns true for an absolute filesystem-style path.
    fn is_absolute_path(&self, value: &str) -> bool;

    /// Returns true for a well-formed `http`/`https` URL.
    fn is_http_url(&self, value: &str) -> bool;

    /// Returns true for either an absolute path or an HTTP URL.
    fn is_location(&self, value: &str) -> bool {
        self.is_absolute_path(value) || self.is_http_url(value)
    }
}

/// Bundle of recognizers consumed by the validator.
#[derive(Clone, Copy)]
pub struct Recognizers<'a> {
    /// IP literal recognizer.
    pub ip: &'a dyn IpRecognizer,
    /// MIME registry.
    pub mime: &'a dyn MimeRegistry,
    /// Path/URL recognizer.
    pub location: &'a dyn LocationRecognizer,
}

impl Recognizers<'static> {
    /// Returns the standard recognizer bundle.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            ip: &StdIpRecognizer,
            mime: &MediaTypeRegistry,
            location: &UrlLocationRecognizer,
        }
    }
}

impl Default for Recognizers<'static> {
    fn default() -> Self {
        Self::standard()
    }
}

// ============================================================================
// SECTION: Standard Implementations
// ============================================================================

/// IP recognizer backed by the `std::net` address parsers.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdIpRecognizer;

impl IpRecognizer for StdIpRecognizer {
    fn is_ipv4(&self, value: &str) -> bool {
        value.parse::<Ipv4Addr>().is_ok()
    }

    fn is_ipv6(&self, value: &str) -> bool {
        let address = match value.split_once('%') {
            Some((address, zone)) => {
                if zone.is_empty() || !zone.chars().all(|c| c.is_ascii_alphanumeric()) {
                    return false;
                }
                address
            }
            None => value,
        };
        address.parse::<Ipv6Addr>().is_ok()
    }
}

/// IANA media types, one lowercase `type/subtype` per line.
const MEDIA_TYPES: &str = include_str!("../data/media-types.txt");

/// Returns the bundled media-type set, built on first use.
fn media_types() -> &'static HashSet<&'static str> {
    static MEDIA_TYPE_SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    MEDIA_TYPE_SET.get_or_init(|| {
        MEDIA_TYPES
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .collect()
    })
}

/// MIME registry backed by the bundled IANA list and the `mime_guess` table.
///
/// The IANA list covers registered types with no file extension, such as
/// `application/vnd.api+json`. The `mime_guess` table adds the unregistered
/// `x-` types that servers map to extensions.
#[derive(Debug, Clone, Copy, Default)]
pub struct MediaTypeRegistry;

impl MimeRegistry for MediaTypeRegistry {
    fn is_registered(&self, mime: &str) -> bool {
        let Some((kind, subtype)) = mime.split_once('/') else {
            return false;
        };
        // Registry keys are lowercase and concrete; `text/*` is not a type.
        if kind.is_empty()
            || subtype.is_empty()
            || mime.contains('*')
            || mime.chars().any(|c| c.is_ascii_uppercase() || c.is_whitespace())
        {
            return false;
        }
        media_types().contains(mime) || mime_guess::get_mime_extensions_str(mime).is_some()
    }
}

/// Path/URL recognizer backed by `std::path` and the `url` parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlLocationRecognizer;

impl LocationRecognizer for UrlLocationRecognizer {
    fn is_absolute_path(&self, value: &str) -> bool {
        value.starts_with('/') || Path::new(value).is_absolute()
    }

    fn is_http_url(&self, value: &str) -> bool {
        Url::parse(value)
            .is_ok_and(|url| matches!(url.scheme(), "http" | "https") && url.host().is_some())
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
