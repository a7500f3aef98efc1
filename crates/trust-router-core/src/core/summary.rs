// trust-router-core/src/core/summary.rs
// ============================================================================
// Module: Trust Router Configuration Summaries
// Description: Serializable overview of a configuration generation.
// Purpose: Report what a reload produced without exposing filter internals.
// Dependencies: crate::core::{config, name, settings}, serde
// ============================================================================

//! ## Overview
//! Summaries are what operators see after a reload: settings, entity counts,
//! and community membership. They are derived from a [`TrustConfig`] and carry
//! no references back into it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

use crate::core::config::TrustConfig;
use crate::core::name::Name;
use crate::core::settings::InternalSettings;

// ============================================================================
// SECTION: Summaries
// ============================================================================

/// Overview of one community.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommunitySummary {
    /// Community identifier.
    pub id: Name,
    /// Community kind label.
    pub kind: &'static str,
    /// Governing APC for a COI.
    pub apc: Option<Name>,
    /// Expiration interval in minutes for an APC.
    pub expiration_interval: Option<u32>,
    /// IdP member realm ids.
    pub idp_realms: Vec<Name>,
    /// RP member realm names.
    pub rp_realms: Vec<Name>,
}

/// Overview of a configuration generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigSummary {
    /// Internal settings.
    pub internal: InternalSettings,
    /// Primary GSS names of RP clients, in lookup order.
    pub rp_clients: Vec<Name>,
    /// IdP realm ids, in lookup order.
    pub idp_realms: Vec<Name>,
    /// Default AAA server hostnames, in lookup order.
    pub default_servers: Vec<Name>,
    /// Communities, in lookup order.
    pub communities: Vec<CommunitySummary>,
}

impl ConfigSummary {
    /// Builds a summary of `config`.
    #[must_use]
    pub fn from_config(config: &TrustConfig) -> Self {
        Self {
            internal: config.internal().clone(),
            rp_clients: config
                .rp_clients()
                .iter()
                .map(|client| client.primary_name().clone())
                .collect(),
            idp_realms: config.idp_realms().iter().map(|realm| realm.id().clone()).collect(),
            default_servers: config
                .default_servers()
                .iter()
                .map(|server| server.hostname.clone())
                .collect(),
            communities: config
                .communities()
                .iter()
                .map(|community| CommunitySummary {
                    id: community.id().clone(),
                    kind: community.kind().label(),
                    apc: community.apc().map(|apc| apc.id.clone()),
                    expiration_interval: community.expiration_interval(),
                    idp_realms: config
                        .community_idps(community)
                        .map(|realm| realm.id().clone())
                        .collect(),
                    rp_realms: community.rp_members().to_vec(),
                })
                .collect(),
        }
    }
}
