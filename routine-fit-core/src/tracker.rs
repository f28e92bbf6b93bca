//! Unsaved-change tracking for one editing session.
//!
//! # States
//!
//! 1. **Uninitialized** - baseline not loaded yet; no diff is reported
//! 2. **Initialized** - baseline loaded (possibly none, on first use)
//! 3. **Clean / Dirty** - steady state, flipping as the observed working
//!    snapshot drifts from or returns to the baseline
//! 4. **Saving** - transient, while a save is in flight
//!
//! The tracker does not own the working snapshot. The hosting application
//! pushes each new value in through [`ChangeTracker::observe`], which keeps
//! the engine free of any ambient state and testable in isolation.

use thiserror::Error;

use crate::changes::RoutineChanges;
use crate::compare::compare;
use crate::models::{RoutineSnapshot, RoutineVersion, SnapshotError};
use crate::store::{StoreError, VersionStore};

/// Errors from tracker operations.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Tracker is not initialized - call initialize() first")]
    NotInitialized,

    #[error("A save is already in flight")]
    SaveInFlight,

    #[error("Failed to load baseline: {0}")]
    Load(#[source] StoreError),

    #[error("Failed to save version: {0}")]
    Save(#[source] StoreError),

    #[error(transparent)]
    MalformedSnapshot(#[from] SnapshotError),
}

/// Session-scoped tracker of unsaved routine changes.
///
/// Holds the last-saved baseline and the most recently observed working
/// snapshot, and keeps a [`RoutineChanges`] diff between them current. Each
/// editing session owns its own tracker; nothing is shared across instances.
pub struct ChangeTracker<S> {
    store: S,
    baseline: Option<RoutineSnapshot>,
    current: Option<RoutineSnapshot>,
    changes: Option<RoutineChanges>,
    initialized: bool,
    loading: bool,
    saving: bool,
}

impl<S: VersionStore> ChangeTracker<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            baseline: None,
            current: None,
            changes: None,
            initialized: false,
            loading: false,
            saving: false,
        }
    }

    /// Loads the baseline from the most recently persisted version.
    ///
    /// Idempotent: only the first successful call performs the load. A load
    /// failure leaves the tracker uninitialized; calling again retries.
    pub async fn initialize(&mut self) -> Result<(), TrackerError> {
        if self.initialized {
            return Ok(());
        }

        self.loading = true;
        let result = self.store.load_latest_version().await;
        self.loading = false;

        let latest = result.map_err(TrackerError::Load)?;
        self.baseline = latest.map(|version| version.snapshot);
        self.initialized = true;
        self.changes = Some(compare(self.baseline.as_ref(), self.current.as_ref()));
        Ok(())
    }

    /// Accepts a new value of the working snapshot and recomputes the diff
    /// against the baseline.
    ///
    /// The snapshot is validated first; a malformed snapshot is rejected and
    /// the previously published diff stays as it was.
    pub fn observe(&mut self, snapshot: RoutineSnapshot) -> Result<&RoutineChanges, TrackerError> {
        if !self.initialized {
            return Err(TrackerError::NotInitialized);
        }
        snapshot.validate()?;

        self.current = Some(snapshot);
        let changes = compare(self.baseline.as_ref(), self.current.as_ref());
        Ok(self.changes.insert(changes))
    }

    /// The current diff, or `None` while uninitialized.
    pub fn changes(&self) -> Option<&RoutineChanges> {
        self.changes.as_ref()
    }

    /// True when the working snapshot differs from the baseline in any way.
    /// Derived from the published diff, never stored independently.
    pub fn has_unsaved_changes(&self) -> bool {
        self.changes.as_ref().is_some_and(|c| !c.is_empty())
    }

    /// Persists the current working state as a new version.
    ///
    /// On success the returned version's snapshot becomes the new baseline
    /// and the diff is recomputed (immediately empty when the store persisted
    /// exactly what was observed). On failure baseline and diff are left
    /// untouched, so they still describe the unsaved work. At most one save
    /// may be in flight; an overlapping call is rejected.
    pub async fn save(&mut self, reason: Option<&str>) -> Result<RoutineVersion, TrackerError> {
        if !self.initialized {
            return Err(TrackerError::NotInitialized);
        }
        if self.saving {
            return Err(TrackerError::SaveInFlight);
        }

        self.saving = true;
        let result = self.store.save_version(reason).await;
        self.saving = false;

        let version = result.map_err(TrackerError::Save)?;
        self.baseline = Some(version.snapshot.clone());
        self.current = Some(version.snapshot.clone());
        self.changes = Some(compare(self.baseline.as_ref(), self.current.as_ref()));
        Ok(version)
    }

    /// Resets the working snapshot to the baseline, emptying the diff.
    /// Returns the snapshot the working state was reset to.
    pub fn discard(&mut self) -> Option<&RoutineSnapshot> {
        self.current = self.baseline.clone();
        if self.initialized {
            self.changes = Some(compare(self.baseline.as_ref(), self.current.as_ref()));
        }
        self.current.as_ref()
    }

    pub fn baseline(&self) -> Option<&RoutineSnapshot> {
        self.baseline.as_ref()
    }

    pub fn current(&self) -> Option<&RoutineSnapshot> {
        self.current.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }
}
