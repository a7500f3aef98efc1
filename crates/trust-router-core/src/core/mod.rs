// trust-router-core/src/core/mod.rs
// ============================================================================
// Module: Trust Router Core Types
// Description: Configuration entities, settings, and the validated trust graph.
// Purpose: Provide the typed model that reloads produce and readers consume.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Core types describe one configuration generation: internal settings, RP
//! clients and their filters, IdP realms, default AAA servers, and
//! communities. Every bounded collection is checked at construction, so a
//! value of these types is always within limits.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod community;
pub mod config;
pub mod constraint;
pub mod error;
pub mod filter;
pub mod name;
pub mod realm;
pub mod settings;
pub mod summary;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use community::Community;
pub use community::CommunityDecl;
pub use community::CommunityKind;
pub use community::DEFAULT_EXPIRATION_INTERVAL;
pub use community::MAX_EXPIRATION_INTERVAL;
pub use community::MIN_EXPIRATION_INTERVAL;
pub use community::RealmRef;
pub use community::clamp_expiration_interval;
pub use config::TrustConfig;
pub use config::TrustConfigBuilder;
pub use constraint::Constraint;
pub use constraint::ConstraintKind;
pub use constraint::MAX_CONST_MATCHES;
pub use error::ModelError;
pub use error::ValidationIssue;
pub use error::ValidationReport;
pub use filter::Filter;
pub use filter::FilterAction;
pub use filter::FilterDecision;
pub use filter::FilterKind;
pub use filter::FilterLine;
pub use filter::FilterSpec;
pub use filter::MAX_FILTER_LINES;
pub use filter::MAX_FILTER_SPECS;
pub use name::Name;
pub use realm::AaaServer;
pub use realm::Apc;
pub use realm::IdpRealm;
pub use realm::MAX_GSS_NAMES;
pub use realm::RealmOrigin;
pub use realm::RpClient;
pub use settings::DEFAULT_CFG_POLL_INTERVAL;
pub use settings::DEFAULT_CFG_SETTLING_TIME;
pub use settings::DEFAULT_CONSOLE_THRESHOLD;
pub use settings::DEFAULT_LOG_THRESHOLD;
pub use settings::DEFAULT_MAX_TREE_DEPTH;
pub use settings::DEFAULT_TIDS_PORT;
pub use settings::DEFAULT_TRP_CONNECT_INTERVAL;
pub use settings::DEFAULT_TRP_SWEEP_INTERVAL;
pub use settings::DEFAULT_TRP_UPDATE_INTERVAL;
pub use settings::DEFAULT_TRPS_PORT;
pub use settings::InternalSettings;
pub use settings::Severity;
pub use summary::CommunitySummary;
pub use summary::ConfigSummary;
