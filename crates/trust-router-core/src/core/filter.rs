// trust-router-core/src/core/filter.rs
// ============================================================================
// Module: Trust Router Filters
// Description: Ordered accept/reject policy gating relying-party requests.
// Purpose: Represent and evaluate rp_permitted filters, first line wins.
// Dependencies: crate::core::{constraint, error, name}, crate::interfaces, serde
// ============================================================================

//! ## Overview
//! A [`Filter`] is an ordered list of [`FilterLine`]s. Evaluation walks the
//! lines in order and the first line whose specs all match decides the
//! outcome. When no line matches, the request is rejected.
//!
//! Security posture: filters are a trust boundary and fail closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Serialize;

use crate::core::constraint::Constraint;
use crate::core::error::ModelError;
use crate::core::error::check_bounds;
use crate::core::name::Name;
use crate::interfaces::FilterTarget;
use crate::interfaces::PatternMatcher;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum number of lines in one filter.
pub const MAX_FILTER_LINES: usize = 8;
/// Maximum number of specs in one filter line.
pub const MAX_FILTER_SPECS: usize = 8;

// ============================================================================
// SECTION: Filter Model
// ============================================================================

/// Filter kinds. Only `rp_permitted` exists today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    /// Decides which requests an RP client may make.
    RpPermitted,
}

impl FilterKind {
    /// Parses a configuration label.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "rp_permitted" => Some(Self::RpPermitted),
            _ => None,
        }
    }

    /// Returns the configuration label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::RpPermitted => "rp_permitted",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome a matching filter line applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterAction {
    /// Permit the request.
    Accept,
    /// Refuse the request.
    Reject,
}

impl FilterAction {
    /// Parses a configuration label.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "accept" => Some(Self::Accept),
            "reject" => Some(Self::Reject),
            _ => None,
        }
    }

    /// Returns the configuration label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Reject => "reject",
        }
    }
}

/// Single `(field, match)` test within a filter line.
///
/// # Invariants
/// - `field` and `pattern` are both non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterSpec {
    /// Request field to test.
    pub field: Name,
    /// Pattern the field value must satisfy.
    pub pattern: Name,
}

impl FilterSpec {
    /// Creates a filter spec.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Empty`] when `field` or `pattern` is empty.
    pub fn new(field: Name, pattern: Name) -> Result<Self, ModelError> {
        if field.is_empty() {
            return Err(ModelError::Empty {
                field: "field",
            });
        }
        if pattern.is_empty() {
            return Err(ModelError::Empty {
                field: "match",
            });
        }
        Ok(Self {
            field,
            pattern,
        })
    }

    /// Returns true when the target supplies the field and it matches.
    #[must_use]
    pub fn matches(&self, target: &dyn FilterTarget, matcher: &dyn PatternMatcher) -> bool {
        target.field(&self.field).is_some_and(|value| matcher.matches(value, &self.pattern))
    }
}

/// One ordered line of a filter.
///
/// # Invariants
/// - `specs` holds `1 ..= MAX_FILTER_SPECS` entries, all of which must match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterLine {
    /// Action applied when the line matches.
    action: FilterAction,
    /// Specs combined with AND semantics.
    specs: Vec<FilterSpec>,
    /// Optional realm restriction attached to the decision.
    realm_constraint: Option<Constraint>,
    /// Optional domain restriction attached to the decision.
    domain_constraint: Option<Constraint>,
}

impl FilterLine {
    /// Creates a filter line after checking the spec count.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] when `specs` is empty or too long.
    pub fn new(
        action: FilterAction,
        specs: Vec<FilterSpec>,
        realm_constraint: Option<Constraint>,
        domain_constraint: Option<Constraint>,
    ) -> Result<Self, ModelError> {
        check_bounds("filter_specs", specs.len(), MAX_FILTER_SPECS)?;
        Ok(Self {
            action,
            specs,
            realm_constraint,
            domain_constraint,
        })
    }

    /// Returns the line action.
    #[must_use]
    pub const fn action(&self) -> FilterAction {
        self.action
    }

    /// Returns the line specs.
    #[must_use]
    pub fn specs(&self) -> &[FilterSpec] {
        &self.specs
    }

    /// Returns the realm constraint, if any.
    #[must_use]
    pub const fn realm_constraint(&self) -> Option<&Constraint> {
        self.realm_constraint.as_ref()
    }

    /// Returns the domain constraint, if any.
    #[must_use]
    pub const fn domain_constraint(&self) -> Option<&Constraint> {
        self.domain_constraint.as_ref()
    }

    /// Returns true when every spec matches the target.
    #[must_use]
    pub fn matches(&self, target: &dyn FilterTarget, matcher: &dyn PatternMatcher) -> bool {
        self.specs.iter().all(|spec| spec.matches(target, matcher))
    }
}

/// Ordered, bounded list of filter lines.
///
/// # Invariants
/// - `lines` holds `1 ..= MAX_FILTER_LINES` entries; order is significant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Filter {
    /// Filter kind.
    kind: FilterKind,
    /// Lines evaluated in order.
    lines: Vec<FilterLine>,
}

impl Filter {
    /// Creates a filter after checking the line count.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] when `lines` is empty or too long.
    pub fn new(kind: FilterKind, lines: Vec<FilterLine>) -> Result<Self, ModelError> {
        check_bounds("filter_lines", lines.len(), MAX_FILTER_LINES)?;
        Ok(Self {
            kind,
            lines,
        })
    }

    /// Returns the filter kind.
    #[must_use]
    pub const fn kind(&self) -> FilterKind {
        self.kind
    }

    /// Returns the filter lines in evaluation order.
    #[must_use]
    pub fn lines(&self) -> &[FilterLine] {
        &self.lines
    }

    /// Evaluates the filter against a request.
    #[must_use]
    pub fn evaluate<'a>(
        &'a self,
        target: &dyn FilterTarget,
        matcher: &dyn PatternMatcher,
    ) -> FilterDecision<'a> {
        for (index, line) in self.lines.iter().enumerate() {
            if line.matches(target, matcher) {
                return FilterDecision {
                    action: line.action,
                    line: Some(index),
                    realm_constraint: line.realm_constraint.as_ref(),
                    domain_constraint: line.domain_constraint.as_ref(),
                };
            }
        }
        FilterDecision::no_match()
    }
}

// ============================================================================
// SECTION: Decisions
// ============================================================================

/// Result of evaluating a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterDecision<'a> {
    /// Action to apply.
    pub action: FilterAction,
    /// Index of the deciding line, `None` when no line matched.
    pub line: Option<usize>,
    /// Realm constraint carried by the deciding line.
    pub realm_constraint: Option<&'a Constraint>,
    /// Domain constraint carried by the deciding line.
    pub domain_constraint: Option<&'a Constraint>,
}

impl FilterDecision<'_> {
    /// Default decision when no line matches.
    const fn no_match() -> Self {
        Self {
            action: FilterAction::Reject,
            line: None,
            realm_constraint: None,
            domain_constraint: None,
        }
    }

    /// Returns true when the request is accepted.
    #[must_use]
    pub fn is_accept(&self) -> bool {
        self.action == FilterAction::Accept
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
