// trust-router-core/src/runtime/manager.rs
// ============================================================================
// Module: Trust Router Configuration Manager
// Description: Staged and active configuration generations.
// Purpose: Promote a validated configuration atomically under live readers.
// Dependencies: arc-swap, crate::core, crate::interfaces, thiserror
// ============================================================================

//! ## Overview
//! [`ConfigManager`] holds at most one staged [`TrustConfig`] and at most one
//! active one. Promotion swaps the active handle in a single atomic store.
//! Readers take an [`Arc`] snapshot through [`ConfigManager::active`] and keep
//! using it for as long as they like; a retired generation is freed when its
//! last snapshot is dropped.
//!
//! Reloads must be serialized by the caller. The staging slot is guarded so a
//! misbehaving caller cannot corrupt it, but interleaved reload passes may
//! overwrite each other's staged result.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use arc_swap::ArcSwapOption;
use thiserror::Error;

use crate::core::TrustConfig;
use crate::core::TrustConfigBuilder;
use crate::interfaces::ThresholdSink;
use crate::runtime::thresholds::SeverityThresholds;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration manager errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ManagerError {
    /// `promote` was called with nothing staged.
    #[error("no staged configuration to promote")]
    NothingStaged,
    /// The staging lock was poisoned by a panicking writer.
    #[error("configuration staging lock poisoned")]
    Poisoned,
}

// ============================================================================
// SECTION: Manager
// ============================================================================

/// Owner of the staged and active configuration generations.
pub struct ConfigManager {
    /// Active generation, read concurrently.
    active: ArcSwapOption<TrustConfig>,
    /// Staged generation awaiting promotion.
    staged: Mutex<Option<TrustConfig>>,
    /// Number of successful promotions.
    generation: AtomicU64,
    /// Receiver of promoted log thresholds.
    thresholds: Arc<dyn ThresholdSink>,
}

impl fmt::Debug for ConfigManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigManager")
            .field("has_active", &self.active.load().is_some())
            .field("generation", &self.generation())
            .finish_non_exhaustive()
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new(Arc::new(SeverityThresholds::default()))
    }
}

impl ConfigManager {
    /// Creates an empty manager that reports thresholds to `thresholds`.
    #[must_use]
    pub fn new(thresholds: Arc<dyn ThresholdSink>) -> Self {
        Self {
            active: ArcSwapOption::empty(),
            staged: Mutex::new(None),
            generation: AtomicU64::new(0),
            thresholds,
        }
    }

    /// Discards any staged configuration and returns a fresh builder.
    ///
    /// # Errors
    ///
    /// Returns [`ManagerError::Poisoned`] when the staging lock is poisoned.
    pub fn stage_new(&self) -> Result<TrustConfigBuilder, ManagerError> {
        self.staged_slot()?.take();
        Ok(TrustConfigBuilder::new())
    }

    /// Stages a built configuration, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`ManagerError::Poisoned`] when the staging lock is poisoned.
    pub fn stage(&self, config: TrustConfig) -> Result<(), ManagerError> {
        *self.staged_slot()? = Some(config);
        Ok(())
    }

    /// Drops the staged configuration, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ManagerError::Poisoned`] when the staging lock is poisoned.
    pub fn discard_staged(&self) -> Result<(), ManagerError> {
        self.staged_slot()?.take();
        Ok(())
    }

    /// Returns true when a configuration is staged.
    ///
    /// # Errors
    ///
    /// Returns [`ManagerError::Poisoned`] when the staging lock is poisoned.
    pub fn has_staged(&self) -> Result<bool, ManagerError> {
        Ok(self.staged_slot()?.is_some())
    }

    /// Makes the staged configuration active and applies its thresholds.
    ///
    /// The previously active generation stays alive until its last reader
    /// drops its snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ManagerError::NothingStaged`] when nothing is staged and
    /// [`ManagerError::Poisoned`] when the staging lock is poisoned.
    pub fn promote(&self) -> Result<Arc<TrustConfig>, ManagerError> {
        let config = self.staged_slot()?.take().ok_or(ManagerError::NothingStaged)?;
        let config = Arc::new(config);
        self.active.store(Some(Arc::clone(&config)));
        self.generation.fetch_add(1, Ordering::AcqRel);
        let internal = config.internal();
        self.thresholds.apply_thresholds(internal.log_threshold, internal.console_threshold);
        Ok(config)
    }

    /// Returns a snapshot of the active configuration.
    #[must_use]
    pub fn active(&self) -> Option<Arc<TrustConfig>> {
        self.active.load_full()
    }

    /// Returns the number of successful promotions.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Locks the staging slot.
    fn staged_slot(&self) -> Result<MutexGuard<'_, Option<TrustConfig>>, ManagerError> {
        self.staged.lock().map_err(|_| ManagerError::Poisoned)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
