// trust-router-core/src/core/error.rs
// ============================================================================
// Module: Trust Router Model Errors
// Description: Construction and validation failures for the trust graph.
// Purpose: Report bound violations, dangling references, and incomplete configs.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Model errors are raised while assembling entities from already-decoded
//! input. Every constructor fails closed: no partially built entity escapes
//! an error path.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use thiserror::Error;

// ============================================================================
// SECTION: Model Errors
// ============================================================================

/// Errors raised while constructing trust graph entities.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A bounded collection exceeded its maximum size.
    #[error("{field} has {actual} entries, maximum is {max}")]
    TooMany {
        /// Collection label.
        field: &'static str,
        /// Maximum allowed entries.
        max: usize,
        /// Entries supplied.
        actual: usize,
    },
    /// A collection that requires at least one entry was empty.
    #[error("{field} must not be empty")]
    Empty {
        /// Collection label.
        field: &'static str,
    },
    /// A community of interest did not name a governing APC.
    #[error("community {community} of type coi requires an apc")]
    MissingApc {
        /// Community identifier.
        community: String,
    },
    /// A community referenced an IdP realm that is not configured.
    #[error("community {community} references unknown idp realm {realm}")]
    UnknownRealm {
        /// Community identifier.
        community: String,
        /// Realm identifier that failed to resolve.
        realm: String,
    },
    /// The assembled configuration is incomplete.
    #[error(transparent)]
    Invalid(#[from] ValidationReport),
}

/// Checks a collection length against inclusive `1 ..= max` bounds.
///
/// # Errors
///
/// Returns [`ModelError::Empty`] or [`ModelError::TooMany`] on violation.
pub const fn check_bounds(field: &'static str, len: usize, max: usize) -> Result<(), ModelError> {
    if len == 0 {
        return Err(ModelError::Empty {
            field,
        });
    }
    if len > max {
        return Err(ModelError::TooMany {
            field,
            max,
            actual: len,
        });
    }
    Ok(())
}

// ============================================================================
// SECTION: Validation Report
// ============================================================================

/// Single completeness rule violated by a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationIssue {
    /// Internal settings are absent or carry an empty hostname.
    MissingHostname,
    /// No RP clients are configured.
    NoRpClients,
    /// No communities are configured.
    NoCommunities,
    /// Neither IdP realms nor default AAA servers are configured.
    NoIdpRealmsOrDefaultServers,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::MissingHostname => "no internal configuration or no hostname",
            Self::NoRpClients => "no rp clients configured",
            Self::NoCommunities => "no communities configured",
            Self::NoIdpRealmsOrDefaultServers => "no default servers or idp realms configured",
        };
        f.write_str(message)
    }
}

/// Every completeness rule a configuration failed.
///
/// # Invariants
/// - `issues` is non-empty when returned as an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ValidationReport {
    /// Violated rules in evaluation order.
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Returns true when the report names the given issue.
    #[must_use]
    pub fn contains(&self, issue: ValidationIssue) -> bool {
        self.issues.contains(&issue)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid configuration: ")?;
        for (idx, issue) in self.issues.iter().enumerate() {
            if idx > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}
