// trust-router-core/src/lib.rs
// ============================================================================
// Module: Trust Router Core Library
// Description: Public API surface for the trust router policy core.
// Purpose: Expose the configuration model, interfaces, and runtime manager.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Trust router core owns the configuration a trust router serves: RP
//! clients and their request filters, IdP realms, default AAA servers, and
//! communities. It validates whole configuration generations and swaps them
//! in atomically while protocol servers keep reading the previous one. It
//! does no I/O; parsing lives in `trust-router-config`.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::FilterTarget;
pub use interfaces::PatternMatcher;
pub use interfaces::ThresholdSink;
pub use runtime::ConfigManager;
pub use runtime::ManagerError;
pub use runtime::PrefixWildcardMatcher;
pub use runtime::SeverityThresholds;
