// trust-router-core/src/core/community.rs
// ============================================================================
// Module: Trust Router Communities
// Description: APC and COI communities with realm membership.
// Purpose: Scope trust between IdP and RP realms.
// Dependencies: crate::core::{error, name, realm}, serde
// ============================================================================

//! ## Overview
//! Communities are declared as a [`CommunityDecl`] naming their member realms
//! by id. Declarations resolve into a [`Community`] only once every document of
//! a reload pass has been read, so a community may name a realm declared in
//! any file. IdP membership is a [`RealmRef`] into the owning realm list and
//! never a copy of the realm.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Serialize;

use crate::core::error::ModelError;
use crate::core::name::Name;
use crate::core::realm::Apc;
use crate::core::realm::IdpRealm;

// ============================================================================
// SECTION: Expiration Interval
// ============================================================================

/// Default APC expiration interval in minutes (30 days).
pub const DEFAULT_EXPIRATION_INTERVAL: u32 = 43_200;
/// Smallest accepted expiration interval in minutes.
pub const MIN_EXPIRATION_INTERVAL: u32 = 11;
/// Largest accepted expiration interval in minutes (90 days).
pub const MAX_EXPIRATION_INTERVAL: u32 = 129_600;

/// Clamps a configured expiration interval into the accepted range.
///
/// Values at or below ten minutes would expire before a client's next
/// successful query, so they are raised to the minimum.
#[must_use]
pub fn clamp_expiration_interval(minutes: i64) -> u32 {
    let clamped =
        minutes.clamp(i64::from(MIN_EXPIRATION_INTERVAL), i64::from(MAX_EXPIRATION_INTERVAL));
    u32::try_from(clamped).unwrap_or(MAX_EXPIRATION_INTERVAL)
}

// ============================================================================
// SECTION: Community Types
// ============================================================================

/// Community kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CommunityKind {
    /// Governing community; its own id is the APC.
    Apc {
        /// Expiration interval in minutes.
        expiration_interval: u32,
    },
    /// Community of interest governed by an APC.
    Coi {
        /// Governing APC.
        apc: Apc,
    },
}

impl CommunityKind {
    /// Returns the configuration label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Apc {
                ..
            } => "apc",
            Self::Coi {
                ..
            } => "coi",
        }
    }
}

impl fmt::Display for CommunityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Non-owning reference to an IdP realm in the configuration's realm list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RealmRef {
    /// Realm identifier.
    pub id: Name,
    /// Position of the referenced realm in the owning list.
    #[serde(skip)]
    pub(crate) slot: usize,
}

/// Community as declared in a document, before membership resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommunityDecl {
    /// Community identifier.
    pub id: Name,
    /// Community kind.
    pub kind: CommunityKind,
    /// IdP realm ids in declaration order.
    pub idp_realms: Vec<Name>,
    /// RP realm names in declaration order.
    pub rp_realms: Vec<Name>,
}

impl CommunityDecl {
    /// Resolves IdP membership against the complete realm list.
    ///
    /// Lookup is first match by id, consistent with [`crate::core::TrustConfig::find_idp`].
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownRealm`] when a member id is not configured.
    pub fn resolve(self, realms: &[IdpRealm]) -> Result<Community, ModelError> {
        let mut idp_members = Vec::with_capacity(self.idp_realms.len());
        for realm_id in self.idp_realms {
            let Some(slot) = realms.iter().position(|realm| realm.id() == &realm_id) else {
                return Err(ModelError::UnknownRealm {
                    community: self.id.to_string(),
                    realm: realm_id.to_string(),
                });
            };
            idp_members.push(RealmRef {
                id: realm_id,
                slot,
            });
        }
        Ok(Community {
            id: self.id,
            kind: self.kind,
            idp_members,
            rp_members: self.rp_realms,
        })
    }
}

/// Trust-scoping group of IdP and RP realms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Community {
    /// Community identifier.
    id: Name,
    /// Community kind.
    #[serde(flatten)]
    kind: CommunityKind,
    /// IdP member realms.
    idp_members: Vec<RealmRef>,
    /// RP member realm names. Not checked against any registry.
    rp_members: Vec<Name>,
}

impl Community {
    /// Returns the community identifier.
    #[must_use]
    pub const fn id(&self) -> &Name {
        &self.id
    }

    /// Returns the community kind.
    #[must_use]
    pub const fn kind(&self) -> &CommunityKind {
        &self.kind
    }

    /// Returns the governing APC for a COI.
    #[must_use]
    pub const fn apc(&self) -> Option<&Apc> {
        match &self.kind {
            CommunityKind::Coi {
                apc,
            } => Some(apc),
            CommunityKind::Apc {
                ..
            } => None,
        }
    }

    /// Returns the expiration interval for an APC community.
    #[must_use]
    pub const fn expiration_interval(&self) -> Option<u32> {
        match &self.kind {
            CommunityKind::Apc {
                expiration_interval,
            } => Some(*expiration_interval),
            CommunityKind::Coi {
                ..
            } => None,
        }
    }

    /// Returns the IdP membership references.
    #[must_use]
    pub fn idp_members(&self) -> &[RealmRef] {
        &self.idp_members
    }

    /// Returns the RP member realm names.
    #[must_use]
    pub fn rp_members(&self) -> &[Name] {
        &self.rp_members
    }

    /// Returns true when `realm_id` is an IdP member.
    #[must_use]
    pub fn has_idp_member(&self, realm_id: &Name) -> bool {
        self.idp_members.iter().any(|member| &member.id == realm_id)
    }

    /// Returns true when `realm` is an RP member.
    #[must_use]
    pub fn has_rp_member(&self, realm: &Name) -> bool {
        self.rp_members.iter().any(|member| member == realm)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
