// trust-router-core/tests/common/mod.rs
// =============================================================================
// Module: Core Test Helpers
// Description: Shared fixtures for trust-router-core integration tests.
// Purpose: Build small, valid configuration generations.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use std::sync::Arc;

use trust_router_core::AaaServer;
use trust_router_core::Apc;
use trust_router_core::CommunityDecl;
use trust_router_core::CommunityKind;
use trust_router_core::ConfigManager;
use trust_router_core::Filter;
use trust_router_core::FilterAction;
use trust_router_core::FilterKind;
use trust_router_core::FilterLine;
use trust_router_core::FilterSpec;
use trust_router_core::IdpRealm;
use trust_router_core::InternalSettings;
use trust_router_core::ModelError;
use trust_router_core::Name;
use trust_router_core::RpClient;
use trust_router_core::TrustConfig;
use trust_router_core::TrustConfigBuilder;

/// Returns an RP client accepting every request whose `rp_realm` matches.
pub fn rp_client(gss_name: &str, rp_realm_pattern: &str) -> Result<RpClient, ModelError> {
    let line = FilterLine::new(
        FilterAction::Accept,
        vec![FilterSpec::new(Name::from("rp_realm"), Name::from(rp_realm_pattern))?],
        None,
        None,
    )?;
    let filter = Filter::new(FilterKind::RpPermitted, vec![line])?;
    RpClient::new(vec![Name::from(gss_name)], filter)
}

/// Returns a builder holding one of every required entity.
pub fn builder(hostname: &str) -> Result<TrustConfigBuilder, ModelError> {
    let mut builder = TrustConfigBuilder::new();
    builder.apply_internal(InternalSettings {
        hostname: Some(Name::from(hostname)),
        ..InternalSettings::default()
    });
    builder.add_rp_client(rp_client("rp@example.org", "*.example.org")?);
    builder.add_idp_realm(IdpRealm::local(
        Name::from("idp.example.org"),
        true,
        vec![AaaServer::new(Name::from("aaa.example.org"))],
        Some(Apc::new(Name::from("apc.example.org"))),
    )?);
    builder.add_community(CommunityDecl {
        id: Name::from("coi.example.org"),
        kind: CommunityKind::Coi {
            apc: Apc::new(Name::from("apc.example.org")),
        },
        idp_realms: vec![Name::from("idp.example.org")],
        rp_realms: vec![Name::from("rp.example.org")],
    });
    Ok(builder)
}

/// Returns a complete configuration advertising `hostname`.
pub fn config(hostname: &str) -> Result<TrustConfig, ModelError> {
    builder(hostname)?.build()
}

/// Stages and promotes a configuration advertising `hostname`.
pub fn promote(manager: &ConfigManager, hostname: &str) -> Result<Arc<TrustConfig>, String> {
    let config = config(hostname).map_err(|err| err.to_string())?;
    manager.stage(config).map_err(|err| err.to_string())?;
    manager.promote().map_err(|err| err.to_string())
}
