// crates/htforge-core/src/lib.rs
// ============================================================================
// Module: htforge Core Library
// Description: Public API surface for rendering and the build orchestrator.
// Purpose: Expose the renderer, assembler, interfaces, and plugin runtime.
// Dependencies: crate::{assemble, interfaces, plugin, render, telemetry}
// ============================================================================

//! ## Overview
//! htforge core renders validated [`htforge_config::HtaccessOptions`] into an
//! Apache `.htaccess` file. Rendering is a fixed emitter table over a line
//! buffer; the orchestrator wires validation, rendering, and writing into a
//! single build hook and reports progress through injected observers.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod assemble;
pub mod interfaces;
pub mod plugin;
pub mod render;
pub mod telemetry;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use assemble::assemble;
pub use interfaces::ArtifactWriter;
pub use interfaces::BuildHook;
pub use interfaces::DiagnosticSink;
pub use interfaces::FileArtifactWriter;
pub use interfaces::HostError;
pub use interfaces::ImmediateHost;
pub use interfaces::LifecycleHost;
pub use interfaces::MemoryArtifactWriter;
pub use interfaces::MemoryDiagnosticSink;
pub use interfaces::StderrDiagnosticSink;
pub use interfaces::WriteError;
pub use plugin::BuildError;
pub use plugin::BuildOutcome;
pub use plugin::BuildPhase;
pub use plugin::DEFAULT_OUTPUT_PATH;
pub use plugin::HtaccessPlugin;
pub use plugin::PLUGIN_NAME;
pub use plugin::PluginContext;
pub use plugin::VerifyError;
pub use plugin::render_content;
pub use plugin::verify_rendered;
pub use render::DirectiveBlock;
pub use render::RuleBuffer;
pub use render::emission_order;
pub use render::render;
pub use telemetry::BuildEvent;
pub use telemetry::BuildEventKind;
pub use telemetry::BuildObserver;
pub use telemetry::FileBuildObserver;
pub use telemetry::MemoryBuildObserver;
pub use telemetry::NoopBuildObserver;
pub use telemetry::StderrBuildObserver;
