// crates/htforge-core/src/plugin.rs
// ============================================================================
// Module: htaccess Build Plugin
// Description: Build-hook orchestrator for validation, rendering, and writing.
// Purpose: Run the validate/render/assemble/write pipeline exactly once.
// Dependencies: htforge-config, serde, thiserror
// ============================================================================

//! ## Overview
//! [`HtaccessPlugin`] registers one hook with a [`LifecycleHost`]. When the
//! hook runs it validates the raw options, renders the rule buffer, splices
//! custom content and writes the result when it is non-empty.
//!
//! A validation failure is not an error for the host: it is reported as one
//! diagnostic line (`htforge: "<field>" <reason>`) and the build continues
//! without writing anything. Only write, host, and reuse failures surface as
//! [`BuildError`].
//!
//! Phases: `Idle -> Validating -> {Failed | Rendering} -> Assembling ->
//! {Written | Skipped}`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

use htforge_config::OptionError;
use htforge_config::RawOptions;
use htforge_config::Recognizers;
use htforge_config::parse_options;
use serde::Serialize;
use thiserror::Error;

use crate::assemble::assemble;
use crate::interfaces::ArtifactWriter;
use crate::interfaces::DiagnosticSink;
use crate::interfaces::HostError;
use crate::interfaces::LifecycleHost;
use crate::interfaces::WriteError;
use crate::render::render;
use crate::telemetry::BuildEvent;
use crate::telemetry::BuildEventKind;
use crate::telemetry::BuildObserver;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Plugin name used in diagnostics and events.
pub const PLUGIN_NAME: &str = "htforge";
/// Default output location.
pub const DEFAULT_OUTPUT_PATH: &str = "./static/.htaccess";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Orchestrator phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildPhase {
    /// Hook not yet run.
    Idle,
    /// Checking the raw options.
    Validating,
    /// Options rejected; nothing written.
    Failed,
    /// Emitting directive blocks.
    Rendering,
    /// Joining the buffer and custom content.
    Assembling,
    /// Content written to the output path.
    Written,
    /// Content empty; nothing written.
    Skipped,
}

/// Result of one build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// Options were rejected.
    Failed(OptionError),
    /// Content was written.
    Written {
        /// Output path.
        path: PathBuf,
        /// Bytes written.
        bytes: usize,
    },
    /// Nothing to write.
    Skipped,
}

/// Orchestrator failures.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Writing the rendered file failed.
    #[error(transparent)]
    Write(#[from] WriteError),
    /// The plugin already ran its build.
    #[error("{PLUGIN_NAME}: build already ran")]
    AlreadyRun,
    /// The lifecycle host failed.
    #[error(transparent)]
    Host(#[from] HostError),
}

/// Collaborators used by the orchestrator.
#[derive(Clone, Copy)]
pub struct PluginContext<'a> {
    /// Syntactic recognizers for validation.
    pub recognizers: Recognizers<'a>,
    /// Output writer.
    pub writer: &'a dyn ArtifactWriter,
    /// Event observer.
    pub observer: &'a dyn BuildObserver,
    /// Diagnostic line sink.
    pub diagnostics: &'a dyn DiagnosticSink,
}

// ============================================================================
// SECTION: Plugin
// ============================================================================

/// Build-hook orchestrator.
pub struct HtaccessPlugin<'a> {
    /// Raw options as received from the host.
    options: RawOptions,
    /// Output location.
    output: PathBuf,
    /// Collaborators.
    context: PluginContext<'a>,
    /// Current phase.
    phase: BuildPhase,
}

impl<'a> HtaccessPlugin<'a> {
    /// Creates a plugin writing to [`DEFAULT_OUTPUT_PATH`].
    #[must_use]
    pub fn new(options: RawOptions, context: PluginContext<'a>) -> Self {
        Self {
            options,
            output: PathBuf::from(DEFAULT_OUTPUT_PATH),
            context,
            phase: BuildPhase::Idle,
        }
    }

    /// Overrides the output location.
    #[must_use]
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    /// Returns the current phase.
    #[must_use]
    pub const fn phase(&self) -> BuildPhase {
        self.phase
    }

    /// Returns the output location.
    #[must_use]
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Registers the build hook with `host` and returns its outcome.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] when the host fails, never runs the hook, or the
    /// hook itself fails.
    pub fn register(&mut self, host: &mut dyn LifecycleHost) -> Result<BuildOutcome, BuildError> {
        let mut result = None;
        host.before_build(&mut || result = Some(self.run()))?;
        result.unwrap_or(Err(BuildError::Host(HostError::HookNotInvoked)))
    }

    /// Runs the build hook.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::AlreadyRun`] on reuse and [`BuildError::Write`]
    /// when the output cannot be written.
    pub fn run(&mut self) -> Result<BuildOutcome, BuildError> {
        if self.phase != BuildPhase::Idle {
            return Err(BuildError::AlreadyRun);
        }
        let started = Instant::now();
        self.record(BuildEvent::new(BuildEventKind::SpanStart, self.phase));
        let result = self.execute();
        let mut end = BuildEvent::new(BuildEventKind::SpanEnd, self.phase)
            .with_elapsed(started.elapsed());
        if let Err(error) = &result {
            end = end.with_message(error.to_string());
        }
        self.record(end);
        result
    }

    /// Runs the phases after the reuse check.
    fn execute(&mut self) -> Result<BuildOutcome, BuildError> {
        self.phase = BuildPhase::Validating;
        let options = match parse_options(&self.options, &self.context.recognizers) {
            Ok(options) => options,
            Err(error) => {
                self.phase = BuildPhase::Failed;
                let line = format!("{PLUGIN_NAME}: {error}");
                self.context.diagnostics.emit(&line);
                self.record(BuildEvent::new(BuildEventKind::Diagnostic, self.phase).with_message(line));
                return Ok(BuildOutcome::Failed(error));
            }
        };

        self.phase = BuildPhase::Rendering;
        let buffer = render(&options);

        self.phase = BuildPhase::Assembling;
        let content = assemble(&buffer, options.custom_content.as_ref());
        if content.is_empty() {
            self.phase = BuildPhase::Skipped;
            self.record(BuildEvent::new(BuildEventKind::Skipped, self.phase));
            return Ok(BuildOutcome::Skipped);
        }

        self.context.writer.write(&self.output, &content)?;
        self.phase = BuildPhase::Written;
        self.record(
            BuildEvent::new(BuildEventKind::Written, self.phase)
                .with_message(self.output.display().to_string()),
        );
        Ok(BuildOutcome::Written {
            path: self.output.clone(),
            bytes: content.len(),
        })
    }

    /// Forwards an event to the observer.
    fn record(&self, event: BuildEvent) {
        self.context.observer.record(&event);
    }
}

// ============================================================================
// SECTION: Rendering Helpers
// ============================================================================

/// Validates and renders raw options without writing anything.
///
/// # Errors
///
/// Returns the first [`OptionError`] found.
pub fn render_content(
    options: &RawOptions,
    recognizers: &Recognizers<'_>,
) -> Result<String, OptionError> {
    let options = parse_options(options, recognizers)?;
    Ok(assemble(&render(&options), options.custom_content.as_ref()))
}

/// Drift verification errors.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// The on-disk file could not be read.
    #[error("verify io error: {0}")]
    Io(String),
    /// The on-disk file differs from the rendered content.
    #[error("htaccess drift: {0}")]
    Drift(String),
}

/// Verifies that the file at `path` matches `expected`.
///
/// Empty expected content means no file should exist.
///
/// # Errors
///
/// Returns [`VerifyError`] when the file is unreadable or differs.
pub fn verify_rendered(path: &Path, expected: &str) -> Result<(), VerifyError> {
    let existing = match fs::read_to_string(path) {
        Ok(existing) => Some(existing),
        Err(err) if err.kind() == io::ErrorKind::NotFound => None,
        Err(err) => return Err(VerifyError::Io(err.to_string())),
    };
    match existing {
        None if expected.is_empty() => Ok(()),
        None => Err(VerifyError::Drift(format!("{} is missing", path.display()))),
        Some(_) if expected.is_empty() => {
            Err(VerifyError::Drift(format!("{} should not exist", path.display())))
        }
        Some(existing) if existing != expected => {
            Err(VerifyError::Drift(format!("content mismatch: {}", path.display())))
        }
        Some(_) => Ok(()),
    }
}
