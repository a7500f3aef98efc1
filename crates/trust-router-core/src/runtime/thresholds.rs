// trust-router-core/src/runtime/thresholds.rs
// ============================================================================
// Module: Trust Router Severity Thresholds
// Description: Shared, lock-free log and console severity thresholds.
// Purpose: Carry promoted threshold values to the logging pipeline.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! [`SeverityThresholds`] is updated by the configuration manager on every
//! promotion and consulted by audit sinks before writing. Values are stored
//! as syslog levels in atomics so checks never block a reload.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::atomic::AtomicU8;
use std::sync::atomic::Ordering;

use crate::core::DEFAULT_CONSOLE_THRESHOLD;
use crate::core::DEFAULT_LOG_THRESHOLD;
use crate::core::Severity;
use crate::interfaces::ThresholdSink;

// ============================================================================
// SECTION: Thresholds
// ============================================================================

/// Log file and console severity thresholds.
#[derive(Debug)]
pub struct SeverityThresholds {
    /// Log file threshold level.
    log: AtomicU8,
    /// Console threshold level.
    console: AtomicU8,
}

impl Default for SeverityThresholds {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_THRESHOLD, DEFAULT_CONSOLE_THRESHOLD)
    }
}

impl SeverityThresholds {
    /// Creates thresholds with explicit starting values.
    #[must_use]
    pub const fn new(log_threshold: Severity, console_threshold: Severity) -> Self {
        Self {
            log: AtomicU8::new(log_threshold.level()),
            console: AtomicU8::new(console_threshold.level()),
        }
    }

    /// Returns the current log file threshold.
    #[must_use]
    pub fn log_threshold(&self) -> Severity {
        load(&self.log)
    }

    /// Returns the current console threshold.
    #[must_use]
    pub fn console_threshold(&self) -> Severity {
        load(&self.console)
    }

    /// Returns true when `severity` should reach the log file.
    #[must_use]
    pub fn allows_log(&self, severity: Severity) -> bool {
        severity.passes(self.log_threshold())
    }

    /// Returns true when `severity` should reach the console.
    #[must_use]
    pub fn allows_console(&self, severity: Severity) -> bool {
        severity.passes(self.console_threshold())
    }
}

impl ThresholdSink for SeverityThresholds {
    fn apply_thresholds(&self, log_threshold: Severity, console_threshold: Severity) {
        self.log.store(log_threshold.level(), Ordering::Release);
        self.console.store(console_threshold.level(), Ordering::Release);
    }
}

/// Reads a stored level, falling back to `debug` for an impossible value.
fn load(slot: &AtomicU8) -> Severity {
    Severity::from_level(slot.load(Ordering::Acquire)).unwrap_or(Severity::Debug)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
