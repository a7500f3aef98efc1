// trust-router-core/src/interfaces/mod.rs
// ============================================================================
// Module: Trust Router Interfaces
// Description: Contract surfaces between the policy core and its collaborators.
// Purpose: Define pattern matching, filter inputs, and log threshold plumbing.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! The policy core does not own pattern matching, request decoding, or the
//! logging pipeline. These traits describe what it needs from each so
//! protocol servers and the reload scheduler can plug in their own pieces.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::Name;
use crate::core::Severity;

// ============================================================================
// SECTION: Pattern Matching
// ============================================================================

/// Tests a concrete value against a configured match pattern.
///
/// Implementations must be pure and compare bytes exactly outside of any
/// wildcard syntax they define.
pub trait PatternMatcher: Send + Sync {
    /// Returns true when `value` satisfies `pattern`.
    fn matches(&self, value: &Name, pattern: &Name) -> bool;
}

// ============================================================================
// SECTION: Filter Inputs
// ============================================================================

/// Supplies request field values to filter evaluation.
pub trait FilterTarget {
    /// Returns the value of `field`, or `None` when the request lacks it.
    fn field(&self, field: &Name) -> Option<&Name>;
}

// ============================================================================
// SECTION: Logging Thresholds
// ============================================================================

/// Receives severity thresholds when a configuration is promoted.
pub trait ThresholdSink: Send + Sync {
    /// Applies the log file and console thresholds.
    fn apply_thresholds(&self, log_threshold: Severity, console_threshold: Severity);
}
