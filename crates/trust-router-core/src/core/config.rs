// trust-router-core/src/core/config.rs
// ============================================================================
// Module: Trust Router Configuration Graph
// Description: Root configuration generation and its two-pass builder.
// Purpose: Assemble, resolve, and validate a complete trust graph.
// Dependencies: crate::core::{community, error, name, realm, settings}
// ============================================================================

//! ## Overview
//! A [`TrustConfigBuilder`] accumulates entities from any number of documents.
//! Entities from later documents take lookup precedence over earlier ones, and
//! within a document later entries precede earlier entries. Building resolves
//! community membership against the complete realm list and then checks
//! completeness, so a [`TrustConfig`] is always whole and consistent. Once
//! built, a configuration is never mutated.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::community::Community;
use crate::core::community::CommunityDecl;
use crate::core::community::RealmRef;
use crate::core::error::ModelError;
use crate::core::error::ValidationIssue;
use crate::core::error::ValidationReport;
use crate::core::name::Name;
use crate::core::realm::AaaServer;
use crate::core::realm::IdpRealm;
use crate::core::realm::RpClient;
use crate::core::settings::InternalSettings;
use crate::core::summary::ConfigSummary;

// ============================================================================
// SECTION: Builder
// ============================================================================

/// Staging area for one reload pass.
#[derive(Debug, Clone, Default)]
pub struct TrustConfigBuilder {
    /// Internal settings, merged across documents.
    internal: Option<InternalSettings>,
    /// RP clients in appearance order.
    rp_clients: Vec<RpClient>,
    /// IdP realms in appearance order.
    idp_realms: Vec<IdpRealm>,
    /// Default AAA servers in appearance order.
    default_servers: Vec<AaaServer>,
    /// Unresolved community declarations in appearance order.
    communities: Vec<CommunityDecl>,
}

impl TrustConfigBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges internal settings from a document.
    pub fn apply_internal(&mut self, settings: InternalSettings) {
        match &mut self.internal {
            Some(current) => current.merge_from(settings),
            None => self.internal = Some(settings),
        }
    }

    /// Adds an RP client.
    pub fn add_rp_client(&mut self, client: RpClient) {
        self.rp_clients.push(client);
    }

    /// Adds an IdP realm.
    pub fn add_idp_realm(&mut self, realm: IdpRealm) {
        self.idp_realms.push(realm);
    }

    /// Adds a default AAA server.
    pub fn add_default_server(&mut self, server: AaaServer) {
        self.default_servers.push(server);
    }

    /// Adds a community declaration.
    pub fn add_community(&mut self, community: CommunityDecl) {
        self.communities.push(community);
    }

    /// Returns the internal settings staged so far.
    #[must_use]
    pub const fn internal(&self) -> Option<&InternalSettings> {
        self.internal.as_ref()
    }

    /// Checks completeness of the staged entities.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationReport`] listing every violated rule.
    pub fn validate(&self) -> Result<(), ValidationReport> {
        completeness(
            self.internal.as_ref(),
            self.rp_clients.len(),
            self.communities.len(),
            self.idp_realms.len() + self.default_servers.len(),
        )
    }

    /// Resolves community membership and validates the result.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownRealm`] for a dangling membership and
    /// [`ModelError::Invalid`] for an incomplete configuration.
    pub fn build(self) -> Result<TrustConfig, ModelError> {
        let Self {
            internal,
            mut rp_clients,
            mut idp_realms,
            mut default_servers,
            mut communities,
        } = self;
        rp_clients.reverse();
        idp_realms.reverse();
        default_servers.reverse();
        communities.reverse();

        let communities = communities
            .into_iter()
            .map(|decl| decl.resolve(&idp_realms))
            .collect::<Result<Vec<_>, _>>()?;

        completeness(
            internal.as_ref(),
            rp_clients.len(),
            communities.len(),
            idp_realms.len() + default_servers.len(),
        )?;
        let Some(internal) = internal else {
            return Err(ModelError::Invalid(ValidationReport {
                issues: vec![ValidationIssue::MissingHostname],
            }));
        };

        Ok(TrustConfig {
            internal,
            rp_clients,
            idp_realms,
            default_servers,
            communities,
        })
    }
}

/// Collects the completeness rules a configuration violates.
fn completeness(
    internal: Option<&InternalSettings>,
    rp_clients: usize,
    communities: usize,
    idp_sources: usize,
) -> Result<(), ValidationReport> {
    let mut issues = Vec::new();
    if !internal.is_some_and(InternalSettings::has_hostname) {
        issues.push(ValidationIssue::MissingHostname);
    }
    if rp_clients == 0 {
        issues.push(ValidationIssue::NoRpClients);
    }
    if communities == 0 {
        issues.push(ValidationIssue::NoCommunities);
    }
    if idp_sources == 0 {
        issues.push(ValidationIssue::NoIdpRealmsOrDefaultServers);
    }
    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationReport {
            issues,
        })
    }
}

// ============================================================================
// SECTION: Trust Configuration
// ============================================================================

/// Immutable, validated configuration generation.
///
/// # Invariants
/// - The hostname is non-empty.
/// - At least one RP client and one community exist.
/// - At least one IdP realm or default AAA server exists.
/// - Every community IdP member refers to a realm in `idp_realms`.
/// - Collections are stored in lookup order (latest declaration first).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustConfig {
    /// Internal settings.
    internal: InternalSettings,
    /// RP clients in lookup order.
    rp_clients: Vec<RpClient>,
    /// IdP realms in lookup order.
    idp_realms: Vec<IdpRealm>,
    /// Default AAA servers in lookup order.
    default_servers: Vec<AaaServer>,
    /// Communities in lookup order.
    communities: Vec<Community>,
}

impl TrustConfig {
    /// Returns the internal settings.
    #[must_use]
    pub const fn internal(&self) -> &InternalSettings {
        &self.internal
    }

    /// Returns the RP clients.
    #[must_use]
    pub fn rp_clients(&self) -> &[RpClient] {
        &self.rp_clients
    }

    /// Returns the IdP realms.
    #[must_use]
    pub fn idp_realms(&self) -> &[IdpRealm] {
        &self.idp_realms
    }

    /// Returns the default AAA servers.
    #[must_use]
    pub fn default_servers(&self) -> &[AaaServer] {
        &self.default_servers
    }

    /// Returns the communities.
    #[must_use]
    pub fn communities(&self) -> &[Community] {
        &self.communities
    }

    /// Finds an IdP realm by id, first match wins.
    #[must_use]
    pub fn find_idp(&self, realm_id: &Name) -> Option<&IdpRealm> {
        self.idp_realms.iter().find(|realm| realm.id() == realm_id)
    }

    /// Finds the RP client identified by any of its GSS names.
    #[must_use]
    pub fn find_rp_client(&self, gss_name: &Name) -> Option<&RpClient> {
        self.rp_clients.iter().find(|client| client.has_gss_name(gss_name))
    }

    /// Finds a community by id, first match wins.
    #[must_use]
    pub fn find_community(&self, community_id: &Name) -> Option<&Community> {
        self.communities.iter().find(|community| community.id() == community_id)
    }

    /// Returns the realm a community membership refers to.
    #[must_use]
    pub fn member_realm(&self, member: &RealmRef) -> Option<&IdpRealm> {
        self.idp_realms.get(member.slot).filter(|realm| realm.id() == &member.id)
    }

    /// Returns the IdP realms belonging to a community.
    pub fn community_idps<'a>(
        &'a self,
        community: &'a Community,
    ) -> impl Iterator<Item = &'a IdpRealm> + 'a {
        community.idp_members().iter().filter_map(|member| self.member_realm(member))
    }

    /// Returns a serializable description of the running configuration.
    #[must_use]
    pub fn summary(&self) -> ConfigSummary {
        ConfigSummary::from_config(self)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test fixtures use explicit asserts and unwraps for clarity."
    )]

    use super::TrustConfigBuilder;
    use crate::core::community::CommunityDecl;
    use crate::core::community::CommunityKind;
    use crate::core::error::ModelError;
    use crate::core::error::ValidationIssue;
    use crate::core::filter::Filter;
    use crate::core::filter::FilterAction;
    use crate::core::filter::FilterKind;
    use crate::core::filter::FilterLine;
    use crate::core::filter::FilterSpec;
    use crate::core::name::Name;
    use crate::core::realm::AaaServer;
    use crate::core::realm::Apc;
    use crate::core::realm::IdpRealm;
    use crate::core::realm::RpClient;
    use crate::core::settings::InternalSettings;

    fn rp_client(names: &[&str]) -> RpClient {
        let line = FilterLine::new(
            FilterAction::Accept,
            vec![FilterSpec::new(Name::from("rp_realm"), Name::from("*")).unwrap()],
            None,
            None,
        )
        .unwrap();
        let filter = Filter::new(FilterKind::RpPermitted, vec![line]).unwrap();
        RpClient::new(names.iter().map(|name| Name::from(*name)).collect(), filter).unwrap()
    }

    fn idp(id: &str, aaa: &str) -> IdpRealm {
        IdpRealm::local(Name::from(id), true, vec![AaaServer::new(Name::from(aaa))], None).unwrap()
    }

    fn coi(id: &str, idps: &[&str]) -> CommunityDecl {
        CommunityDecl {
            id: Name::from(id),
            kind: CommunityKind::Coi {
                apc: Apc::new(Name::from("apc.example.org")),
            },
            idp_realms: idps.iter().map(|realm| Name::from(*realm)).collect(),
            rp_realms: vec![Name::from("rp.example.org")],
        }
    }

    fn complete() -> TrustConfigBuilder {
        let mut builder = TrustConfigBuilder::new();
        builder.apply_internal(InternalSettings {
            hostname: Some(Name::from("tr.example.org")),
            ..InternalSettings::default()
        });
        builder.add_rp_client(rp_client(&["rp@example.org", "rp2@example.org"]));
        builder.add_idp_realm(idp("idp.example.org", "aaa1.example.org"));
        builder.add_community(coi("coi.example.org", &["idp.example.org"]));
        builder
    }

    #[test]
    fn empty_builder_reports_every_issue() {
        let report = TrustConfigBuilder::new().validate().unwrap_err();
        assert_eq!(
            report.issues,
            vec![
                ValidationIssue::MissingHostname,
                ValidationIssue::NoRpClients,
                ValidationIssue::NoCommunities,
                ValidationIssue::NoIdpRealmsOrDefaultServers,
            ]
        );
    }

    #[test]
    fn default_servers_satisfy_the_idp_rule() {
        let mut builder = TrustConfigBuilder::new();
        builder.add_default_server(AaaServer::new(Name::from("aaa.example.org")));
        let report = builder.validate().unwrap_err();
        assert!(!report.contains(ValidationIssue::NoIdpRealmsOrDefaultServers));
    }

    #[test]
    fn empty_hostname_is_missing() {
        let mut builder = complete();
        builder.apply_internal(InternalSettings {
            hostname: Some(Name::from("")),
            ..InternalSettings::default()
        });
        let err = builder.build().unwrap_err();
        let ModelError::Invalid(report) = err else {
            panic!("expected validation failure, got {err}");
        };
        assert_eq!(report.issues, vec![ValidationIssue::MissingHostname]);
    }

    #[test]
    fn later_entries_are_found_first() {
        let mut builder = complete();
        builder.add_idp_realm(idp("idp.example.org", "aaa2.example.org"));
        let config = builder.build().unwrap();
        let realm = config.find_idp(&Name::from("idp.example.org")).unwrap();
        assert_eq!(realm.aaa_servers()[0].hostname, Name::from("aaa2.example.org"));
        let community = config.find_community(&Name::from("coi.example.org")).unwrap();
        let members: Vec<_> = config.community_idps(community).collect();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].aaa_servers()[0].hostname, Name::from("aaa2.example.org"));
    }

    #[test]
    fn community_may_precede_its_realm() {
        let mut builder = TrustConfigBuilder::new();
        builder.add_community(coi("coi.example.org", &["late.example.org"]));
        builder.apply_internal(InternalSettings {
            hostname: Some(Name::from("tr.example.org")),
            ..InternalSettings::default()
        });
        builder.add_rp_client(rp_client(&["rp@example.org"]));
        builder.add_idp_realm(idp("late.example.org", "aaa.example.org"));
        let config = builder.build().unwrap();
        let community = config.find_community(&Name::from("coi.example.org")).unwrap();
        assert!(community.has_idp_member(&Name::from("late.example.org")));
    }

    #[test]
    fn dangling_membership_is_unknown_realm() {
        let mut builder = complete();
        builder.add_community(coi("other.example.org", &["missing.example.org"]));
        let err = builder.build().unwrap_err();
        assert!(matches!(err, ModelError::UnknownRealm { .. }));
    }

    #[test]
    fn lookups_return_none_on_miss() {
        let config = complete().build().unwrap();
        assert!(config.find_idp(&Name::from("nobody.example.org")).is_none());
        assert!(config.find_rp_client(&Name::from("nobody@example.org")).is_none());
        assert!(config.find_community(&Name::from("nobody.example.org")).is_none());
        assert!(config.find_rp_client(&Name::from("rp2@example.org")).is_some());
    }

    #[test]
    fn summary_lists_community_members() {
        let summary = complete().build().unwrap().summary();
        assert_eq!(summary.rp_clients, vec![Name::from("rp@example.org")]);
        assert_eq!(summary.communities.len(), 1);
        let community = &summary.communities[0];
        assert_eq!(community.kind, "coi");
        assert_eq!(community.apc, Some(Name::from("apc.example.org")));
        assert_eq!(community.idp_realms, vec![Name::from("idp.example.org")]);
        assert_eq!(community.rp_realms, vec![Name::from("rp.example.org")]);
    }
}
