// trust-router-core/src/core/realm.rs
// ============================================================================
// Module: Trust Router Realms and Clients
// Description: IdP realms, AAA servers, APCs, and relying-party clients.
// Purpose: Model the entities owned by a configuration generation.
// Dependencies: crate::core::{error, filter, name}, serde
// ============================================================================

//! ## Overview
//! IdP realms and RP clients are owned once, by the configuration that parsed
//! them. Communities refer to realms through [`crate::core::RealmRef`] and never
//! hold a second copy of a realm's AAA server list.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

use crate::core::error::ModelError;
use crate::core::error::check_bounds;
use crate::core::filter::Filter;
use crate::core::name::Name;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum number of GSS names on one RP client.
pub const MAX_GSS_NAMES: usize = 5;

// ============================================================================
// SECTION: AAA Servers and APCs
// ============================================================================

/// Authentication backend identified by hostname.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AaaServer {
    /// Server hostname.
    pub hostname: Name,
}

impl AaaServer {
    /// Creates an AAA server entry.
    #[must_use]
    pub const fn new(hostname: Name) -> Self {
        Self {
            hostname,
        }
    }
}

/// Governing community identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Apc {
    /// APC identifier.
    pub id: Name,
}

impl Apc {
    /// Creates an APC reference.
    #[must_use]
    pub const fn new(id: Name) -> Self {
        Self {
            id,
        }
    }
}

// ============================================================================
// SECTION: IdP Realms
// ============================================================================

/// Where an IdP realm's configuration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RealmOrigin {
    /// Configured locally with its own AAA servers.
    Local,
    /// Learned remotely; local-only fields are absent.
    RemoteIncomplete,
}

/// Identity realm served by this trust router or learned remotely.
///
/// # Invariants
/// - Local realms own at least one AAA server.
/// - Remote realms own no AAA servers and are never shared-config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdpRealm {
    /// Realm identifier, the lookup key.
    id: Name,
    /// Realm origin.
    origin: RealmOrigin,
    /// Shared-config flag, meaningful for local realms only.
    shared_config: bool,
    /// Owned AAA servers.
    aaa_servers: Vec<AaaServer>,
    /// Governing APC, if declared.
    apc: Option<Apc>,
}

impl IdpRealm {
    /// Creates a local realm.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Empty`] when `aaa_servers` is empty.
    pub fn local(
        id: Name,
        shared_config: bool,
        aaa_servers: Vec<AaaServer>,
        apc: Option<Apc>,
    ) -> Result<Self, ModelError> {
        if aaa_servers.is_empty() {
            return Err(ModelError::Empty {
                field: "aaa_servers",
            });
        }
        Ok(Self {
            id,
            origin: RealmOrigin::Local,
            shared_config,
            aaa_servers,
            apc,
        })
    }

    /// Creates a remote, incomplete realm.
    #[must_use]
    pub const fn remote(id: Name, apc: Option<Apc>) -> Self {
        Self {
            id,
            origin: RealmOrigin::RemoteIncomplete,
            shared_config: false,
            aaa_servers: Vec::new(),
            apc,
        }
    }

    /// Returns the realm identifier.
    #[must_use]
    pub const fn id(&self) -> &Name {
        &self.id
    }

    /// Returns the realm origin.
    #[must_use]
    pub const fn origin(&self) -> RealmOrigin {
        self.origin
    }

    /// Returns the shared-config flag.
    #[must_use]
    pub const fn shared_config(&self) -> bool {
        self.shared_config
    }

    /// Returns the realm's AAA servers.
    #[must_use]
    pub fn aaa_servers(&self) -> &[AaaServer] {
        &self.aaa_servers
    }

    /// Returns the governing APC, if declared.
    #[must_use]
    pub const fn apc(&self) -> Option<&Apc> {
        self.apc.as_ref()
    }
}

// ============================================================================
// SECTION: RP Clients
// ============================================================================

/// Relying-party client permitted to query this trust router.
///
/// # Invariants
/// - The client holds `1 ..= MAX_GSS_NAMES` GSS names; the first is primary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RpClient {
    /// Primary GSS identity, used for logging and lookup.
    primary: Name,
    /// Remaining GSS identities in declaration order.
    aliases: Vec<Name>,
    /// Request filter for the client.
    filter: Filter,
}

impl RpClient {
    /// Creates an RP client.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] when the GSS name count is out of bounds.
    pub fn new(gss_names: Vec<Name>, filter: Filter) -> Result<Self, ModelError> {
        check_bounds("gss_names", gss_names.len(), MAX_GSS_NAMES)?;
        let mut names = gss_names.into_iter();
        let Some(primary) = names.next() else {
            return Err(ModelError::Empty {
                field: "gss_names",
            });
        };
        Ok(Self {
            primary,
            aliases: names.collect(),
            filter,
        })
    }

    /// Returns the client's primary GSS name.
    #[must_use]
    pub const fn primary_name(&self) -> &Name {
        &self.primary
    }

    /// Returns all GSS names, primary first.
    pub fn gss_names(&self) -> impl Iterator<Item = &Name> {
        std::iter::once(&self.primary).chain(self.aliases.iter())
    }

    /// Returns true when `gss_name` identifies this client.
    #[must_use]
    pub fn has_gss_name(&self, gss_name: &Name) -> bool {
        self.gss_names().any(|name| name == gss_name)
    }

    /// Returns the client's filter.
    #[must_use]
    pub const fn filter(&self) -> &Filter {
        &self.filter
    }
}
