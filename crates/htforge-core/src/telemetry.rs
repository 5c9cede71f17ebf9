// crates/htforge-core/src/telemetry.rs
// ============================================================================
// Module: Build Telemetry
// Description: Structured build events and observer sinks.
// Purpose: Emit build timing and outcome events without a logging backend.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The orchestrator reports a span around each build plus diagnostic and
//! outcome events. Observers decide where events go: JSON lines on stderr,
//! JSON lines appended to a file, nowhere, or an in-memory list.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::plugin::BuildPhase;
use crate::plugin::PLUGIN_NAME;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Build event classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildEventKind {
    /// Build hook started.
    SpanStart,
    /// Build hook finished.
    SpanEnd,
    /// Validation diagnostic emitted.
    Diagnostic,
    /// Rendered file written.
    Written,
    /// Nothing to write.
    Skipped,
}

/// Build event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildEvent {
    /// Event identifier.
    pub event: BuildEventKind,
    /// Emitting plugin.
    pub plugin: &'static str,
    /// Orchestrator phase when the event was recorded.
    pub phase: BuildPhase,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Elapsed build time for span end events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_ms: Option<u128>,
    /// Human-readable detail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl BuildEvent {
    /// Creates an event stamped with the current time.
    #[must_use]
    pub fn new(event: BuildEventKind, phase: BuildPhase) -> Self {
        Self {
            event,
            plugin: PLUGIN_NAME,
            phase,
            timestamp_ms: now_ms(),
            elapsed_ms: None,
            message: None,
        }
    }

    /// Attaches an elapsed duration.
    #[must_use]
    pub fn with_elapsed(mut self, elapsed: Duration) -> Self {
        self.elapsed_ms = Some(elapsed.as_millis());
        self
    }

    /// Attaches a message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Returns the current time in milliseconds since epoch.
fn now_ms() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |duration| duration.as_millis())
}

// ============================================================================
// SECTION: Observers
// ============================================================================

/// Receives build events.
pub trait BuildObserver: Send + Sync {
    /// Records one event.
    fn record(&self, event: &BuildEvent);
}

/// Observer that logs JSON lines to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrBuildObserver;

impl BuildObserver for StderrBuildObserver {
    fn record(&self, event: &BuildEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Observer that appends JSON lines to a file.
pub struct FileBuildObserver {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileBuildObserver {
    /// Opens the event log in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl BuildObserver for FileBuildObserver {
    fn record(&self, event: &BuildEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// No-op observer.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopBuildObserver;

impl BuildObserver for NoopBuildObserver {
    fn record(&self, _event: &BuildEvent) {}
}

/// Observer that keeps events in memory.
#[derive(Debug, Default)]
pub struct MemoryBuildObserver {
    /// Recorded events.
    events: Mutex<Vec<BuildEvent>>,
}

impl MemoryBuildObserver {
    /// Creates an empty observer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<BuildEvent> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }

    /// Returns the recorded event kinds.
    #[must_use]
    pub fn kinds(&self) -> Vec<BuildEventKind> {
        self.events().iter().map(|event| event.event).collect()
    }
}

impl BuildObserver for MemoryBuildObserver {
    fn record(&self, event: &BuildEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
