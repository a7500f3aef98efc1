// trust-router-config/src/error.rs
// ============================================================================
// Module: Trust Router Config Errors
// Description: Error kinds raised while loading and applying configuration.
// Purpose: Classify reload failures for callers and audit logs.
// Dependencies: thiserror, trust-router-core
// ============================================================================

//! ## Overview
//! Every reload failure maps onto one [`ConfigError`] kind. None of them is
//! fatal: the previously active configuration keeps serving and the caller
//! decides when to retry.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;
use trust_router_core::ManagerError;
use trust_router_core::ModelError;
use trust_router_core::ValidationReport;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading, parsing, or promotion errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid arguments to a loader API.
    #[error("config bad parameters: {0}")]
    BadParams(String),
    /// Structurally invalid configuration input.
    #[error("config parse error at {path}: {reason}")]
    NoParse {
        /// Location of the offending value.
        path: String,
        /// What was wrong with it.
        reason: String,
    },
    /// Structurally valid but incomplete configuration.
    #[error(transparent)]
    Validation(ValidationReport),
    /// A referenced entity is not configured.
    #[error("config reference not found: {0}")]
    NotFound(String),
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// The configuration manager could not be used.
    #[error(transparent)]
    Manager(ManagerError),
}

impl ConfigError {
    /// Builds a parse error for `path`.
    pub(crate) fn no_parse(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::NoParse {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Builds a parse error for `path` from a model constraint violation.
    pub(crate) fn model(path: &str, error: ModelError) -> Self {
        match error {
            ModelError::UnknownRealm {
                ..
            } => Self::NotFound(error.to_string()),
            ModelError::Invalid(report) => Self::Validation(report),
            ModelError::TooMany {
                ..
            }
            | ModelError::Empty {
                ..
            }
            | ModelError::MissingApc {
                ..
            } => Self::no_parse(path, error.to_string()),
        }
    }

    /// Prefixes a parse error location with the source document name.
    #[must_use]
    pub(crate) fn in_document(self, document: &str) -> Self {
        match self {
            Self::NoParse {
                path,
                reason,
            } => Self::NoParse {
                path: format!("{document}:{path}"),
                reason,
            },
            other => other,
        }
    }

    /// Returns a stable label for the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::BadParams(_) => "bad_params",
            Self::NoParse {
                ..
            } => "no_parse",
            Self::Validation(_) => "validation",
            Self::NotFound(_) => "not_found",
            Self::Io(_) => "io",
            Self::Manager(_) => "manager",
        }
    }
}

impl From<ModelError> for ConfigError {
    fn from(error: ModelError) -> Self {
        Self::model("", error)
    }
}

impl From<ManagerError> for ConfigError {
    fn from(error: ManagerError) -> Self {
        match error {
            ManagerError::NothingStaged => Self::BadParams(error.to_string()),
            ManagerError::Poisoned => Self::Manager(error),
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
