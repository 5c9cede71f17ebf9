// crates/htforge-core/tests/common/mod.rs
// =============================================================================
// Module: Core Test Helpers
// Description: Shared fixtures for rendering and orchestrator tests.
// Purpose: Run the build hook against in-memory collaborators.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use std::path::Path;

use htforge_config::RawOptions;
use htforge_config::Recognizers;
use htforge_config::merge_defaults;
use htforge_core::BuildError;
use htforge_core::BuildOutcome;
use htforge_core::DEFAULT_OUTPUT_PATH;
use htforge_core::HtaccessPlugin;
use htforge_core::ImmediateHost;
use htforge_core::MemoryArtifactWriter;
use htforge_core::MemoryBuildObserver;
use htforge_core::MemoryDiagnosticSink;
use htforge_core::PluginContext;
use serde_json::Value;

/// In-memory collaborators for one build.
#[derive(Default)]
pub struct Harness {
    /// Captured writes.
    pub writer: MemoryArtifactWriter,
    /// Captured events.
    pub observer: MemoryBuildObserver,
    /// Captured diagnostic lines.
    pub diagnostics: MemoryDiagnosticSink,
}

impl Harness {
    /// Returns a plugin context over the harness collaborators.
    pub fn context(&self) -> PluginContext<'_> {
        PluginContext {
            recognizers: Recognizers::standard(),
            writer: &self.writer,
            observer: &self.observer,
            diagnostics: &self.diagnostics,
        }
    }

    /// Runs one build through the immediate host.
    pub fn build(&self, options: RawOptions) -> Result<BuildOutcome, BuildError> {
        let mut plugin = HtaccessPlugin::new(options, self.context());
        plugin.register(&mut ImmediateHost)
    }

    /// Returns the content written to the default output path.
    pub fn written(&self) -> Option<String> {
        self.writer.get(Path::new(DEFAULT_OUTPUT_PATH))
    }
}

/// Overlays a JSON object literal on the documented defaults.
pub fn with_defaults(value: Value) -> RawOptions {
    match value {
        Value::Object(map) => merge_defaults(map),
        _ => merge_defaults(RawOptions::new()),
    }
}

/// Builds `options` over defaults and returns the written content.
pub fn render_written(value: Value) -> Result<String, String> {
    let harness = Harness::default();
    match harness.build(with_defaults(value)).map_err(|err| err.to_string())? {
        BuildOutcome::Written { .. } => {
            harness.written().ok_or_else(|| "outcome written but no content".to_string())
        }
        other => Err(format!("expected written outcome, got {other:?}")),
    }
}

/// Compares rendered output with the expected text.
pub fn assert_rendered(value: Value, expected: &str) -> Result<(), String> {
    let actual = render_written(value)?;
    if actual != expected {
        return Err(format!("rendered mismatch\n--- expected\n{expected:?}\n--- actual\n{actual:?}"));
    }
    Ok(())
}
