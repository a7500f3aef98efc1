// trust-router-config/src/loader.rs
// ============================================================================
// Module: Trust Router Config Loader
// Description: Document reading, multi-document merge, and reload passes.
// Purpose: Build and promote a configuration generation all-or-nothing.
// Dependencies: serde_json, trust-router-core
// ============================================================================

//! ## Overview
//! A reload pass reads an ordered list of [`ConfigDocument`]s, decodes each one
//! into the same staged builder, resolves community membership, validates the
//! result, and promotes it. Any failure discards the staged configuration and
//! leaves the active one serving. Every step is reported to a
//! [`ConfigAuditSink`].
//!
//! Security posture: documents are untrusted; size and encoding are checked
//! before parsing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use trust_router_core::ConfigManager;
use trust_router_core::Severity;
use trust_router_core::TrustConfig;
use trust_router_core::TrustConfigBuilder;

use crate::audit::ConfigAuditEvent;
use crate::audit::ConfigAuditSink;
use crate::audit::EVENT_APPLIED;
use crate::audit::EVENT_COMMUNITY;
use crate::audit::EVENT_FILE_PARSING;
use crate::audit::EVENT_INVALID;
use crate::audit::EVENT_PARSE_FAILED;
use crate::audit::EVENT_REVISION;
use crate::error::ConfigError;
use crate::parse::ConfigFragment;
use crate::parse::parse_document;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum configuration document size in bytes.
pub const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;

// ============================================================================
// SECTION: Documents
// ============================================================================

/// One configuration document and the name it is reported under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDocument {
    /// Display name, usually the file name.
    name: String,
    /// Raw JSON text.
    contents: String,
}

impl ConfigDocument {
    /// Wraps in-memory document text.
    #[must_use]
    pub fn new(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }

    /// Reads a document from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read and
    /// [`ConfigError::NoParse`] when it is too large or not UTF-8.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned());
        let file = File::open(path)
            .map_err(|err| ConfigError::Io(format!("cannot open {}: {err}", path.display())))?;
        let limit = u64::try_from(MAX_CONFIG_FILE_SIZE).unwrap_or(u64::MAX).saturating_add(1);
        let mut bytes = Vec::new();
        file.take(limit)
            .read_to_end(&mut bytes)
            .map_err(|err| ConfigError::Io(format!("cannot read {}: {err}", path.display())))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::no_parse(name, "config file exceeds size limit"));
        }
        let contents = String::from_utf8(bytes)
            .map_err(|_| ConfigError::no_parse(&name, "config file must be utf-8"))?;
        Ok(Self {
            name,
            contents,
        })
    }

    /// Returns the document name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the raw document text.
    #[must_use]
    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// Decodes the document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoParse`] when the text is not valid JSON or any
    /// entity is malformed. The error path is prefixed with the document name.
    pub fn parse(&self) -> Result<ConfigFragment, ConfigError> {
        if self.contents.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::no_parse(&self.name, "config file exceeds size limit"));
        }
        let value: Value = serde_json::from_str(&self.contents)
            .map_err(|err| ConfigError::no_parse(&self.name, format!("invalid json: {err}")))?;
        parse_document(&value).map_err(|err| err.in_document(&self.name))
    }
}

// ============================================================================
// SECTION: Merge and Reload
// ============================================================================

/// Decodes `documents` into `builder` and builds a validated configuration.
///
/// # Errors
///
/// Returns [`ConfigError::BadParams`] when `documents` is empty, and the
/// first parse, resolution, or validation failure otherwise.
pub fn build_config(
    documents: &[ConfigDocument],
    mut builder: TrustConfigBuilder,
    sink: &dyn ConfigAuditSink,
) -> Result<TrustConfig, ConfigError> {
    if documents.is_empty() {
        return Err(ConfigError::BadParams("no configuration documents supplied".to_string()));
    }
    for document in documents {
        sink.record(
            &ConfigAuditEvent::new(
                EVENT_FILE_PARSING,
                Severity::Debug,
                format!("parsing {}", document.name()),
            )
            .with_file(document.name()),
        );
        let fragment = document.parse().inspect_err(|err| {
            sink.record(
                &ConfigAuditEvent::new(EVENT_PARSE_FAILED, Severity::Err, err.to_string())
                    .with_file(document.name()),
            );
        })?;
        if let Some(serial_number) = fragment.serial_number.clone() {
            sink.record(
                &ConfigAuditEvent::new(
                    EVENT_REVISION,
                    Severity::Notice,
                    format!("attempting to load revision {serial_number} of {}", document.name()),
                )
                .with_file(document.name())
                .with_serial_number(serial_number),
            );
        }
        fragment.merge_into(&mut builder);
    }
    builder.build().map_err(ConfigError::from).inspect_err(|err| {
        let event = match err {
            ConfigError::Validation(_) => EVENT_INVALID,
            _ => EVENT_PARSE_FAILED,
        };
        sink.record(&ConfigAuditEvent::new(event, Severity::Err, err.to_string()));
    })
}

/// Decodes and validates `documents` without touching any manager.
///
/// # Errors
///
/// Returns the same errors as [`build_config`].
pub fn load_config(
    documents: &[ConfigDocument],
    sink: &dyn ConfigAuditSink,
) -> Result<TrustConfig, ConfigError> {
    build_config(documents, TrustConfigBuilder::new(), sink)
}

/// Runs one reload pass and promotes the result.
///
/// # Errors
///
/// Returns the first parse, resolution, validation, or manager failure. The
/// active configuration is unchanged on error.
pub fn reload(
    manager: &ConfigManager,
    documents: &[ConfigDocument],
    sink: &dyn ConfigAuditSink,
) -> Result<Arc<TrustConfig>, ConfigError> {
    let builder = manager.stage_new()?;
    let config = build_config(documents, builder, sink)?;
    manager.stage(config)?;
    let active = manager.promote()?;
    sink.record(&ConfigAuditEvent::new(
        EVENT_APPLIED,
        Severity::Notice,
        format!("configuration generation {} applied", manager.generation()),
    ));
    log_running_config(&active, sink);
    Ok(active)
}

/// Reports every community of `config` with its member realms.
pub fn log_running_config(config: &TrustConfig, sink: &dyn ConfigAuditSink) {
    for community in config.summary().communities {
        let idps: Vec<String> =
            community.idp_realms.iter().map(|realm| format!("@{realm}")).collect();
        let rps: Vec<String> = community.rp_realms.iter().map(ToString::to_string).collect();
        sink.record(&ConfigAuditEvent::new(
            EVENT_COMMUNITY,
            Severity::Notice,
            format!(
                "community {} ({}): member idps [{}]; member rps [{}]",
                community.id,
                community.kind,
                idps.join(", "),
                rps.join(", ")
            ),
        ));
    }
}
