// trust-router-core/src/runtime/mod.rs
// ============================================================================
// Module: Trust Router Runtime
// Description: Configuration manager, thresholds, and default matcher.
// Purpose: Serve the active configuration to concurrent readers.
// Dependencies: arc-swap, crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Runtime modules hold live state: the active and staged configuration
//! generations, the severity thresholds they publish, and the default
//! pattern matcher used by filters and constraints.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod manager;
pub mod matcher;
pub mod thresholds;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use manager::ConfigManager;
pub use manager::ManagerError;
pub use matcher::PrefixWildcardMatcher;
pub use thresholds::SeverityThresholds;
