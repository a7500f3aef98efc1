// trust-router-config/src/audit.rs
// ============================================================================
// Module: Trust Router Config Audit Logging
// Description: Structured audit events for configuration reloads.
// Purpose: Emit severity-filtered JSON lines without a logging framework.
// Dependencies: serde, serde_json, trust-router-core
// ============================================================================

//! ## Overview
//! Reload passes report progress and failures as [`ConfigAuditEvent`]s. Sinks
//! write one JSON object per line and drop events below the threshold that
//! the active configuration published.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;
use serde_json::Number;
use trust_router_core::Severity;
use trust_router_core::SeverityThresholds;

// ============================================================================
// SECTION: Event Labels
// ============================================================================

/// A document is about to be parsed.
pub const EVENT_FILE_PARSING: &str = "config_file_parsing";
/// A document declared a revision number.
pub const EVENT_REVISION: &str = "config_revision";
/// A document failed to parse or reference resolution failed.
pub const EVENT_PARSE_FAILED: &str = "config_parse_failed";
/// The merged configuration is incomplete.
pub const EVENT_INVALID: &str = "config_invalid";
/// A new configuration became active.
pub const EVENT_APPLIED: &str = "config_applied";
/// One community of the running configuration.
pub const EVENT_COMMUNITY: &str = "config_community";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Configuration audit event payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Event severity.
    pub severity: Severity,
    /// Source document name, when the event concerns one document.
    pub file: Option<String>,
    /// Document revision number when declared.
    pub serial_number: Option<Number>,
    /// Human-readable description.
    pub message: String,
}

impl ConfigAuditEvent {
    /// Creates an event stamped with the current time.
    #[must_use]
    pub fn new(event: &'static str, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            event,
            timestamp_ms: now_ms(),
            severity,
            file: None,
            serial_number: None,
            message: message.into(),
        }
    }

    /// Attaches the source document name.
    #[must_use]
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Attaches the document revision number.
    #[must_use]
    pub fn with_serial_number(mut self, serial_number: Number) -> Self {
        self.serial_number = Some(serial_number);
        self
    }
}

/// Returns the current time in milliseconds since the epoch.
fn now_ms() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |duration| duration.as_millis())
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Audit sink for configuration events.
pub trait ConfigAuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &ConfigAuditEvent);
}

/// Audit sink that logs JSON lines to stderr, filtered by the console
/// threshold.
pub struct StderrConfigAuditSink {
    /// Shared thresholds updated on promotion.
    thresholds: Arc<SeverityThresholds>,
}

impl StderrConfigAuditSink {
    /// Creates a stderr sink reading `thresholds`.
    #[must_use]
    pub const fn new(thresholds: Arc<SeverityThresholds>) -> Self {
        Self {
            thresholds,
        }
    }
}

impl ConfigAuditSink for StderrConfigAuditSink {
    fn record(&self, event: &ConfigAuditEvent) {
        if !self.thresholds.allows_console(event.severity) {
            return;
        }
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that appends JSON lines to a file, filtered by the log
/// threshold.
pub struct FileConfigAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<File>,
    /// Shared thresholds updated on promotion.
    thresholds: Arc<SeverityThresholds>,
}

impl FileConfigAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path, thresholds: Arc<SeverityThresholds>) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
            thresholds,
        })
    }
}

impl ConfigAuditSink for FileConfigAuditSink {
    fn record(&self, event: &ConfigAuditEvent) {
        if !self.thresholds.allows_log(event.severity) {
            return;
        }
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// No-op audit sink.
pub struct NoopConfigAuditSink;

impl ConfigAuditSink for NoopConfigAuditSink {
    fn record(&self, _event: &ConfigAuditEvent) {}
}

// ============================================================================
// SECTION: Tests
// ============================================================================
