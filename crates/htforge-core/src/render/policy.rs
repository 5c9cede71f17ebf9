// crates/htforge-core/src/render/policy.rs
// ============================================================================
// Module: Policy Header Values
// Description: Token normalization for Feature-Policy and CSP headers.
// Purpose: Quote keyword tokens and serialize directive lists.
// Dependencies: htforge-config
// ============================================================================

//! ## Overview
//! Keyword tokens (`self`, `none`, ...) are wrapped in single quotes; every
//! other token passes through verbatim. Tokens are joined with one space and
//! directives with `; `.

use std::borrow::Cow;

use htforge_config::PolicyDirective;

/// Feature-Policy keywords.
const FEATURE_KEYWORDS: &[&str] = &["none", "src", "self"];

/// Content-Security-Policy keywords.
const CSP_KEYWORDS: &[&str] = &[
    "none",
    "src",
    "self",
    "unsafe-eval",
    "unsafe-hashes",
    "unsafe-inline",
    "strict-dynamic",
    "report-sample",
];

/// Header whose directive tokens are being normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyKind {
    /// `Feature-Policy`
    Feature,
    /// `Content-Security-Policy`
    ContentSecurity,
}

impl PolicyKind {
    /// Returns the keyword set for this header.
    #[must_use]
    pub const fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Feature => FEATURE_KEYWORDS,
            Self::ContentSecurity => CSP_KEYWORDS,
        }
    }

    /// Returns the response header name.
    #[must_use]
    pub const fn header_name(self) -> &'static str {
        match self {
            Self::Feature => "Feature-Policy",
            Self::ContentSecurity => "Content-Security-Policy",
        }
    }
}

/// Single-quotes `token` when it is a keyword for `kind`.
#[must_use]
pub fn normalize_token(kind: PolicyKind, token: &str) -> Cow<'_, str> {
    if kind.keywords().contains(&token) {
        Cow::Owned(format!("'{token}'"))
    } else {
        Cow::Borrowed(token)
    }
}

/// Serializes directives into a header value.
#[must_use]
pub fn header_value(kind: PolicyKind, directives: &[PolicyDirective]) -> String {
    directives
        .iter()
        .map(|directive| {
            let tokens: Vec<Cow<'_, str>> =
                directive.tokens.iter().map(|token| normalize_token(kind, token)).collect();
            format!("{} {}", directive.name, tokens.join(" "))
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csp_quotes_its_extra_keywords() {
        assert_eq!(normalize_token(PolicyKind::ContentSecurity, "unsafe-inline"), "'unsafe-inline'");
        assert_eq!(normalize_token(PolicyKind::Feature, "unsafe-inline"), "unsafe-inline");
        assert_eq!(normalize_token(PolicyKind::Feature, "self"), "'self'");
        assert_eq!(normalize_token(PolicyKind::Feature, "*"), "*");
    }

    #[test]
    fn keywords_match_whole_tokens_only() {
        assert_eq!(normalize_token(PolicyKind::ContentSecurity, "selfie"), "selfie");
        assert_eq!(normalize_token(PolicyKind::ContentSecurity, "'self'"), "'self'");
    }
}
