// trust-router-config/src/lib.rs
// ============================================================================
// Module: Trust Router Config Library
// Description: JSON configuration parsing, merging, and reload transactions.
// Purpose: Single source of truth for trust router config file semantics.
// Dependencies: trust-router-core, serde, serde_json
// ============================================================================

//! ## Overview
//! `trust-router-config` turns a directory of `*.cfg` JSON documents into a
//! validated [`trust_router_core::TrustConfig`] and promotes it through a
//! [`trust_router_core::ConfigManager`]. Reloads are all-or-nothing and
//! report progress through structured audit events.
//!
//! Security posture: config inputs are untrusted and parsers fail closed.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod discovery;
pub mod error;
pub mod loader;
pub mod parse;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::*;
pub use discovery::CONFIG_FILE_SUFFIX;
pub use discovery::find_config_files;
pub use discovery::is_config_file_name;
pub use discovery::load_documents_from_dir;
pub use error::ConfigError;
pub use loader::ConfigDocument;
pub use loader::MAX_CONFIG_FILE_SIZE;
pub use loader::build_config;
pub use loader::load_config;
pub use loader::log_running_config;
pub use loader::reload;
pub use parse::ConfigFragment;
pub use parse::parse_aaa_server;
pub use parse::parse_aaa_servers;
pub use parse::parse_apcs;
pub use parse::parse_community;
pub use parse::parse_constraint;
pub use parse::parse_document;
pub use parse::parse_filter;
pub use parse::parse_idp_realm;
pub use parse::parse_internal;
pub use parse::parse_rp_client;
