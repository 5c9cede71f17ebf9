// crates/htforge-cli/src/main_tests.rs
// ============================================================================
// Module: CLI Main Helpers Tests
// Description: Unit tests for argument parsing and exit-code policy.
// Purpose: Keep the command surface and strict-mode behavior stable.
// Dependencies: htforge-cli main helpers
// ============================================================================

//! ## Overview
//! Exercises clap parsing, locale resolution, output path defaults, and the
//! strict-mode exit policy without spawning the binary.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;

use clap::CommandFactory;
use clap::Parser;
use htforge_config::FieldPath;
use htforge_config::OptionError;

use super::BuildOutcome;
use super::Cli;
use super::Commands;
use super::LangArg;
use super::Locale;
use super::output_path;
use super::rejects_build;
use super::resolve_locale;

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn build_arguments_parse() {
    let cli = Cli::try_parse_from([
        "htforge",
        "build",
        "--config",
        "site.json",
        "--output",
        "dist/.htaccess",
        "--trace",
        "--strict",
    ])
    .expect("parse build");
    let Some(Commands::Build(command)) = cli.command else {
        panic!("expected build command");
    };
    assert_eq!(command.options.config.as_deref(), Some(Path::new("site.json")));
    assert_eq!(command.output.as_deref(), Some(Path::new("dist/.htaccess")));
    assert!(command.trace);
    assert!(command.strict);
    assert!(command.events.is_none());
}

#[test]
fn events_and_trace_are_exclusive() {
    let result = Cli::try_parse_from(["htforge", "build", "--events", "events.jsonl", "--trace"]);
    assert!(result.is_err());
}

#[test]
fn version_flag_is_global() {
    let cli = Cli::try_parse_from(["htforge", "--version"]).expect("parse version");
    assert!(cli.show_version);
    assert!(cli.command.is_none());
}

#[test]
fn rejected_options_fail_only_in_strict_mode() {
    let failed = BuildOutcome::Failed(OptionError::MissingField {
        field: FieldPath::root("blockedUserAgents"),
    });
    assert!(!rejects_build(&failed, false));
    assert!(rejects_build(&failed, true));
    assert!(!rejects_build(&BuildOutcome::Skipped, true));
    let written = BuildOutcome::Written {
        path: PathBuf::from("static/.htaccess"),
        bytes: 12,
    };
    assert!(!rejects_build(&written, true));
}

#[test]
fn output_path_defaults_to_static_dir() {
    assert_eq!(output_path(None), PathBuf::from("./static/.htaccess"));
    assert_eq!(output_path(Some(Path::new("out/.htaccess"))), PathBuf::from("out/.htaccess"));
}

#[test]
fn locale_flag_wins_over_environment() {
    assert_eq!(resolve_locale(Some(LangArg::Ca), Some("en")).unwrap(), Locale::Ca);
    assert_eq!(resolve_locale(None, Some("ca-ES")).unwrap(), Locale::Ca);
    assert_eq!(resolve_locale(None, None).unwrap(), Locale::En);
}

#[test]
fn invalid_locale_environment_is_rejected() {
    let err = resolve_locale(None, Some("xx")).unwrap_err();
    assert!(err.to_string().contains("HTFORGE_LANG"));
}
