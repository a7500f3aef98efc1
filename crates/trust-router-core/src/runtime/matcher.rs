// trust-router-core/src/runtime/matcher.rs
// ============================================================================
// Module: Trust Router Pattern Matcher
// Description: Default leading-wildcard pattern matcher.
// Purpose: Provide a deterministic PatternMatcher for constraints and filters.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! [`PrefixWildcardMatcher`] understands a single wildcard form: a pattern
//! beginning with `*` matches any value ending with the rest of the pattern.
//! Every other pattern must equal the value byte for byte. Comparison is
//! case-sensitive.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::Name;
use crate::interfaces::PatternMatcher;

// ============================================================================
// SECTION: Matcher
// ============================================================================

/// Matcher supporting `*suffix` patterns and exact matches.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrefixWildcardMatcher;

impl PatternMatcher for PrefixWildcardMatcher {
    fn matches(&self, value: &Name, pattern: &Name) -> bool {
        match pattern.as_bytes().split_first() {
            Some((b'*', suffix)) => value.as_bytes().ends_with(suffix),
            _ => value.as_bytes() == pattern.as_bytes(),
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
