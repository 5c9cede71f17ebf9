// crates/htforge-config/tests/validation_order.rs
// =============================================================================
// Module: Validation Order Tests
// Description: Fixed group order and first-failure reporting.
// Purpose: Ensure diagnostics are stable when several groups are invalid.
// =============================================================================

//! Group ordering tests for htforge-config.

use htforge_config::OptionGroup;
use htforge_config::validation_order;
use serde_json::json;

mod common;

type TestResult = Result<(), String>;

#[test]
fn groups_are_checked_in_documented_order() -> TestResult {
    let expected = [
        OptionGroup::BlockedIp,
        OptionGroup::BlockedUserAgents,
        OptionGroup::ContentSecurityPolicy,
        OptionGroup::CustomContent,
        OptionGroup::CustomHeaders,
        OptionGroup::DisableDirectoryIndex,
        OptionGroup::FeaturePolicy,
        OptionGroup::ForceHttps,
        OptionGroup::NotCachedFiles,
        OptionGroup::Pingable,
        OptionGroup::PreventDdosAttacks,
        OptionGroup::PreventScriptInjection,
        OptionGroup::Redirections,
        OptionGroup::DisableServerSignature,
        OptionGroup::TextCompression,
        OptionGroup::FileExpirations,
    ];
    if validation_order() != expected {
        return Err(format!("unexpected order: {:?}", validation_order()));
    }
    Ok(())
}

#[test]
fn first_invalid_group_wins() -> TestResult {
    let raw = common::with_defaults(json!({
        "textCompression": ["text/foo"],
        "forceHttps": "yes",
        "customHeaders": { "X-Test": 1 }
    }));
    common::expect_error(&raw, "\"customHeaders.X-Test\" must be a string")
}

#[test]
fn missing_groups_are_reported_in_order() -> TestResult {
    let mut raw = common::with_defaults(json!({}));
    raw.remove("pingable");
    raw.remove("disableServerSignature");
    common::expect_error(&raw, "\"pingable\" must be present")?;
    raw.insert("pingable".to_string(), json!(true));
    common::expect_error(&raw, "\"disableServerSignature\" must be present")
}

#[test]
fn each_missing_required_group_names_itself() -> TestResult {
    for group in validation_order() {
        if group.is_optional() {
            continue;
        }
        let mut raw = common::with_defaults(json!({}));
        raw.remove(group.key());
        common::expect_error(&raw, &format!("\"{}\" must be present", group.key()))?;
    }
    Ok(())
}
