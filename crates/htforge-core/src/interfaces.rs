// crates/htforge-core/src/interfaces.rs
// ============================================================================
// Module: htforge Interfaces
// Description: Host lifecycle, artifact writing, and diagnostic surfaces.
// Purpose: Keep the orchestrator free of direct host and filesystem coupling.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! The orchestrator reaches the outside world only through these traits: a
//! [`LifecycleHost`] that schedules the build hook, an [`ArtifactWriter`] that
//! persists the rendered file, and a [`DiagnosticSink`] that receives the
//! human-readable failure line.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;

// ============================================================================
// SECTION: Artifact Writer
// ============================================================================

/// Artifact write errors.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Filesystem write failed.
    #[error("artifact write failed for {path}: {message}")]
    Io {
        /// Target path.
        path: String,
        /// Underlying error text.
        message: String,
    },
    /// In-memory writer state was poisoned.
    #[error("artifact writer unavailable")]
    Unavailable,
}

/// Persists rendered content.
pub trait ArtifactWriter {
    /// Writes `content` to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError`] when the content cannot be persisted.
    fn write(&self, path: &Path, content: &str) -> Result<(), WriteError>;
}

/// Writer backed by `std::fs::write`. Parent directories must exist.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileArtifactWriter;

impl ArtifactWriter for FileArtifactWriter {
    fn write(&self, path: &Path, content: &str) -> Result<(), WriteError> {
        fs::write(path, content.as_bytes()).map_err(|err| WriteError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        })
    }
}

/// Writer that keeps artifacts in memory.
#[derive(Debug, Default)]
pub struct MemoryArtifactWriter {
    /// Written artifacts keyed by path.
    files: Mutex<BTreeMap<PathBuf, String>>,
}

impl MemoryArtifactWriter {
    /// Creates an empty writer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the content written to `path`, if any.
    #[must_use]
    pub fn get(&self, path: &Path) -> Option<String> {
        self.files.lock().ok().and_then(|files| files.get(path).cloned())
    }

    /// Returns the number of distinct paths written.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.lock().map_or(0, |files| files.len())
    }

    /// Returns true when nothing was written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ArtifactWriter for MemoryArtifactWriter {
    fn write(&self, path: &Path, content: &str) -> Result<(), WriteError> {
        let mut files = self.files.lock().map_err(|_| WriteError::Unavailable)?;
        files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }
}

// ============================================================================
// SECTION: Lifecycle Host
// ============================================================================

/// Lifecycle host errors.
#[derive(Debug, Error)]
pub enum HostError {
    /// The host returned without invoking the hook.
    #[error("build hook was not invoked")]
    HookNotInvoked,
}

/// Build hook handed to a [`LifecycleHost`].
pub type BuildHook<'a> = &'a mut dyn FnMut();

/// Host build system that runs hooks at lifecycle points.
pub trait LifecycleHost {
    /// Runs `hook` before the site build.
    ///
    /// # Errors
    ///
    /// Returns [`HostError`] when the hook cannot be run.
    fn before_build(&mut self, hook: BuildHook<'_>) -> Result<(), HostError>;
}

/// Host that runs the hook immediately on registration.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateHost;

impl LifecycleHost for ImmediateHost {
    fn before_build(&mut self, hook: BuildHook<'_>) -> Result<(), HostError> {
        hook();
        Ok(())
    }
}

// ============================================================================
// SECTION: Diagnostics
// ============================================================================

/// Receives human-readable diagnostic lines.
pub trait DiagnosticSink: Send + Sync {
    /// Emits one diagnostic line.
    fn emit(&self, line: &str);
}

/// Diagnostic sink that writes lines to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrDiagnosticSink;

impl DiagnosticSink for StderrDiagnosticSink {
    fn emit(&self, line: &str) {
        let _ = writeln!(std::io::stderr(), "{line}");
    }
}

/// Diagnostic sink that collects lines in memory.
#[derive(Debug, Default)]
pub struct MemoryDiagnosticSink {
    /// Collected lines.
    lines: Mutex<Vec<String>>,
}

impl MemoryDiagnosticSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the collected lines.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|lines| lines.clone()).unwrap_or_default()
    }
}

impl DiagnosticSink for MemoryDiagnosticSink {
    fn emit(&self, line: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Test fixtures use explicit unwraps for clarity.")]

    use super::*;

    #[test]
    fn immediate_host_runs_hook_once() {
        let mut calls = 0;
        let mut hook = || calls += 1;
        ImmediateHost.before_build(&mut hook).unwrap();
        assert_eq!(calls, 1);
    }

    #[test]
    fn memory_writer_overwrites_whole_file() {
        let writer = MemoryArtifactWriter::new();
        let path = Path::new("static/.htaccess");
        writer.write(path, "first").unwrap();
        writer.write(path, "second").unwrap();
        assert_eq!(writer.get(path).as_deref(), Some("second"));
        assert_eq!(writer.len(), 1);
    }
}
