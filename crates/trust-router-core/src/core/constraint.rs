// trust-router-core/src/core/constraint.rs
// ============================================================================
// Module: Trust Router Constraints
// Description: Typed, bounded pattern lists narrowing a filter line.
// Purpose: Restrict accepted requests by realm or domain.
// Dependencies: crate::core::{name, error}, crate::interfaces, serde
// ============================================================================

//! ## Overview
//! A [`Constraint`] carries between one and [`MAX_CONST_MATCHES`] patterns of a
//! single kind. A value satisfies the constraint when any pattern matches it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Serialize;

use crate::core::error::ModelError;
use crate::core::error::check_bounds;
use crate::core::name::Name;
use crate::interfaces::PatternMatcher;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum number of match patterns in one constraint.
pub const MAX_CONST_MATCHES: usize = 24;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Axis a constraint restricts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    /// Restricts by realm.
    Realm,
    /// Restricts by domain.
    Domain,
}

impl ConstraintKind {
    /// Returns the configuration label for the kind.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Realm => "realm",
            Self::Domain => "domain",
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Bounded list of match patterns of one kind.
///
/// # Invariants
/// - `matches` holds `1 ..= MAX_CONST_MATCHES` entries.
/// - `kind` is fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Constraint {
    /// Axis restricted by the constraint.
    kind: ConstraintKind,
    /// Patterns, any of which may match.
    matches: Vec<Name>,
}

impl Constraint {
    /// Creates a constraint after checking the pattern count.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] when `matches` is empty or too long.
    pub fn new(kind: ConstraintKind, matches: Vec<Name>) -> Result<Self, ModelError> {
        check_bounds(constraint_field(kind), matches.len(), MAX_CONST_MATCHES)?;
        Ok(Self {
            kind,
            matches,
        })
    }

    /// Returns the constraint kind.
    #[must_use]
    pub const fn kind(&self) -> ConstraintKind {
        self.kind
    }

    /// Returns the match patterns.
    #[must_use]
    pub fn matches(&self) -> &[Name] {
        &self.matches
    }

    /// Returns true when any pattern accepts `value`.
    #[must_use]
    pub fn permits(&self, value: &Name, matcher: &dyn PatternMatcher) -> bool {
        self.matches.iter().any(|pattern| matcher.matches(value, pattern))
    }
}

/// Returns the collection label used in bound errors.
pub(crate) const fn constraint_field(kind: ConstraintKind) -> &'static str {
    match kind {
        ConstraintKind::Realm => "realm_constraints",
        ConstraintKind::Domain => "domain_constraints",
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
