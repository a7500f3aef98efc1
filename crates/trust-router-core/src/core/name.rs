// trust-router-core/src/core/name.rs
// ============================================================================
// Module: Trust Router Names
// Description: Immutable byte-string identifiers for realms, communities, and
//              GSS identities.
// Purpose: Provide exact-byte comparison keys shared by reference.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`Name`] is the lookup key for every entity in the trust graph. Equality is
//! exact byte comparison with no normalization, trimming, or case folding, and
//! embedded NUL bytes are significant. Names are immutable once constructed, so
//! cloning shares the underlying buffer without coupling owners.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde::Serializer;

// ============================================================================
// SECTION: Name
// ============================================================================

/// Immutable, length-prefixed byte-string identifier.
///
/// # Invariants
/// - Bytes are never modified after construction.
/// - Equality, ordering, and hashing operate on the raw bytes.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Name(Arc<[u8]>);

impl Name {
    /// Creates a name from raw bytes. Empty input is accepted.
    #[must_use]
    pub fn new(bytes: impl AsRef<[u8]>) -> Self {
        Self(Arc::from(bytes.as_ref()))
    }

    /// Returns the raw bytes of the name.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the byte length of the name.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when the name holds no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the name as UTF-8 when it is valid UTF-8.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }

    /// Returns an independent copy that shares no storage with `self`.
    #[must_use]
    pub fn duplicate(&self) -> Self {
        Self::new(self.as_bytes())
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({:?})", String::from_utf8_lossy(&self.0))
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        String::from_utf8_lossy(&self.0).fmt(f)
    }
}

impl From<&str> for Name {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Name {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&[u8]> for Name {
    fn from(value: &[u8]) -> Self {
        Self::new(value)
    }
}

impl AsRef<[u8]> for Name {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Serialize for Name {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&String::from_utf8_lossy(&self.0))
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
