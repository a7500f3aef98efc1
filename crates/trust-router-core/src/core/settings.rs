// trust-router-core/src/core/settings.rs
// ============================================================================
// Module: Trust Router Internal Settings
// Description: Process-level settings carried by a configuration generation.
// Purpose: Hold hostname, ports, intervals, and log thresholds with defaults.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Internal settings come from the `tr_internal` section of a configuration
//! document. Every field except the hostname has a documented default; a
//! missing hostname is accepted here and rejected by whole-config validation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Serialize;

use crate::core::name::Name;

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default bound on downstream trust-path search depth.
pub const DEFAULT_MAX_TREE_DEPTH: u32 = 12;
/// Default trust-identity server port.
pub const DEFAULT_TIDS_PORT: u16 = 12309;
/// Default trust-path-query server port.
pub const DEFAULT_TRPS_PORT: u16 = 12308;
/// Default config directory poll interval in seconds.
pub const DEFAULT_CFG_POLL_INTERVAL: u32 = 1;
/// Default settling time after a config change in seconds.
pub const DEFAULT_CFG_SETTLING_TIME: u32 = 5;
/// Default peer connect interval in seconds.
pub const DEFAULT_TRP_CONNECT_INTERVAL: u32 = 10;
/// Default route sweep interval in seconds.
pub const DEFAULT_TRP_SWEEP_INTERVAL: u32 = 30;
/// Default route update interval in seconds.
pub const DEFAULT_TRP_UPDATE_INTERVAL: u32 = 30;
/// Default log file threshold.
pub const DEFAULT_LOG_THRESHOLD: Severity = Severity::Notice;
/// Default console threshold.
pub const DEFAULT_CONSOLE_THRESHOLD: Severity = Severity::Notice;

// ============================================================================
// SECTION: Severity
// ============================================================================

/// Syslog-style message severity, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Severity {
    /// System is unusable.
    Emerg = 0,
    /// Action must be taken immediately.
    Alert = 1,
    /// Critical conditions.
    Crit = 2,
    /// Error conditions.
    Err = 3,
    /// Warning conditions.
    Warning = 4,
    /// Normal but significant condition.
    Notice = 5,
    /// Informational messages.
    Info = 6,
    /// Debug-level messages.
    Debug = 7,
}

impl Severity {
    /// All severities in ascending numeric order.
    pub const ALL: [Self; 8] = [
        Self::Emerg,
        Self::Alert,
        Self::Crit,
        Self::Err,
        Self::Warning,
        Self::Notice,
        Self::Info,
        Self::Debug,
    ];

    /// Converts a configuration label into a severity.
    ///
    /// Unknown labels map to [`Severity::Debug`] so that nothing is hidden.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "emerg" => Self::Emerg,
            "alert" => Self::Alert,
            "crit" => Self::Crit,
            "err" => Self::Err,
            "warning" => Self::Warning,
            "notice" => Self::Notice,
            "info" => Self::Info,
            _ => Self::Debug,
        }
    }

    /// Returns the configuration label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Emerg => "emerg",
            Self::Alert => "alert",
            Self::Crit => "crit",
            Self::Err => "err",
            Self::Warning => "warning",
            Self::Notice => "notice",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }

    /// Returns the numeric syslog level.
    #[must_use]
    pub const fn level(self) -> u8 {
        self as u8
    }

    /// Converts a numeric syslog level back into a severity.
    #[must_use]
    pub const fn from_level(level: u8) -> Option<Self> {
        match level {
            0 => Some(Self::Emerg),
            1 => Some(Self::Alert),
            2 => Some(Self::Crit),
            3 => Some(Self::Err),
            4 => Some(Self::Warning),
            5 => Some(Self::Notice),
            6 => Some(Self::Info),
            7 => Some(Self::Debug),
            _ => None,
        }
    }

    /// Returns true when a message at `self` passes `threshold`.
    #[must_use]
    pub fn passes(self, threshold: Self) -> bool {
        self <= threshold
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// SECTION: Internal Settings
// ============================================================================

/// Internal settings for one configuration generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InternalSettings {
    /// Hostname advertised by this trust router.
    pub hostname: Option<Name>,
    /// Bound on downstream trust-path search depth (consumed, not enforced).
    pub max_tree_depth: u32,
    /// Trust-identity server port.
    pub tids_port: u16,
    /// Trust-path-query server port.
    pub trps_port: u16,
    /// Config directory poll interval in seconds.
    pub cfg_poll_interval: u32,
    /// Settling time after a config change in seconds.
    pub cfg_settling_time: u32,
    /// Peer connect interval in seconds.
    pub trp_connect_interval: u32,
    /// Route sweep interval in seconds.
    pub trp_sweep_interval: u32,
    /// Route update interval in seconds.
    pub trp_update_interval: u32,
    /// Log file threshold.
    pub log_threshold: Severity,
    /// Console threshold.
    pub console_threshold: Severity,
}

impl Default for InternalSettings {
    fn default() -> Self {
        Self {
            hostname: None,
            max_tree_depth: DEFAULT_MAX_TREE_DEPTH,
            tids_port: DEFAULT_TIDS_PORT,
            trps_port: DEFAULT_TRPS_PORT,
            cfg_poll_interval: DEFAULT_CFG_POLL_INTERVAL,
            cfg_settling_time: DEFAULT_CFG_SETTLING_TIME,
            trp_connect_interval: DEFAULT_TRP_CONNECT_INTERVAL,
            trp_sweep_interval: DEFAULT_TRP_SWEEP_INTERVAL,
            trp_update_interval: DEFAULT_TRP_UPDATE_INTERVAL,
            log_threshold: DEFAULT_LOG_THRESHOLD,
            console_threshold: DEFAULT_CONSOLE_THRESHOLD,
        }
    }
}

impl InternalSettings {
    /// Returns true when a non-empty hostname is configured.
    #[must_use]
    pub fn has_hostname(&self) -> bool {
        self.hostname.as_ref().is_some_and(|name| !name.is_empty())
    }

    /// Overlays settings from a later document.
    ///
    /// Later values win; a hostname absent from `later` keeps the current one.
    pub fn merge_from(&mut self, later: Self) {
        let hostname = later.hostname.or_else(|| self.hostname.take());
        *self = Self {
            hostname,
            ..later
        };
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
