// trust-router-config/src/discovery.rs
// ============================================================================
// Module: Trust Router Config Discovery
// Description: Selection of configuration files within a directory.
// Purpose: Decide which files a reload pass reads, and in what order.
// Dependencies: std::fs
// ============================================================================

//! ## Overview
//! A configuration directory may hold any number of `*.cfg` files. Hidden
//! files are skipped. Selected files are processed in ascending byte order of
//! their names, so later files take lookup precedence.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::loader::ConfigDocument;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Required configuration file extension, including the dot.
pub const CONFIG_FILE_SUFFIX: &str = ".cfg";

// ============================================================================
// SECTION: Discovery
// ============================================================================

/// Returns true when `name` selects a configuration file.
///
/// The name must be at least four bytes long, must not start with `.`, and
/// must end in `.cfg`.
#[must_use]
pub fn is_config_file_name(name: impl AsRef<OsStr>) -> bool {
    let bytes = name.as_ref().as_encoded_bytes();
    bytes.len() >= CONFIG_FILE_SUFFIX.len()
        && !bytes.starts_with(b".")
        && bytes.ends_with(CONFIG_FILE_SUFFIX.as_bytes())
}

/// Lists the configuration files in `dir`, sorted by name.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] when the directory cannot be read.
pub fn find_config_files(dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let entries = fs::read_dir(dir)
        .map_err(|err| ConfigError::Io(format!("cannot read {}: {err}", dir.display())))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| ConfigError::Io(err.to_string()))?;
        if !is_config_file_name(entry.file_name()) {
            continue;
        }
        let path = entry.path();
        if fs::metadata(&path).is_ok_and(|meta| meta.is_file()) {
            files.push(path);
        }
    }
    files.sort_by(|left, right| {
        let left = left.file_name().map(OsStr::as_encoded_bytes);
        let right = right.file_name().map(OsStr::as_encoded_bytes);
        left.cmp(&right)
    });
    Ok(files)
}

/// Reads every configuration file in `dir`, in processing order.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] when the directory or a file cannot be read,
/// and [`ConfigError::NoParse`] when a file is too large or not UTF-8.
pub fn load_documents_from_dir(dir: &Path) -> Result<Vec<ConfigDocument>, ConfigError> {
    find_config_files(dir)?.iter().map(|path| ConfigDocument::read(path)).collect()
}

// ============================================================================
// SECTION: Tests
// ============================================================================
