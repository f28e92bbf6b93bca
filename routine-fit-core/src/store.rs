//! Version store gateway.
//!
//! The engine never talks to a database or an API directly; the hosting
//! application supplies a [`VersionStore`] and the tracker goes through it
//! for the three operations it needs. Retry policy, wire formats, and
//! encryption at rest all live behind this seam.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{RoutineSnapshot, RoutineVersion};

/// Errors surfaced by a version store implementation.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to load from version store: {0}")]
    Load(String),

    #[error("Failed to persist version: {0}")]
    Save(String),
}

/// Persistence collaborator for routine versions and the live working
/// snapshot.
///
/// `save_version` assembles the snapshot to persist from the live working
/// state the store has access to; the caller only supplies the optional
/// reason and gets back the version as actually stored. Versions are
/// append-only: a save never rewrites history.
#[async_trait]
pub trait VersionStore {
    /// Loads the most recently persisted version, or `None` when no version
    /// has ever been saved.
    async fn load_latest_version(&self) -> Result<Option<RoutineVersion>, StoreError>;

    /// Loads the current live working snapshot.
    async fn load_current_snapshot(&self) -> Result<RoutineSnapshot, StoreError>;

    /// Persists the current working snapshot as a new version.
    async fn save_version(&mut self, reason: Option<&str>) -> Result<RoutineVersion, StoreError>;
}
