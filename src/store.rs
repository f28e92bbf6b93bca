//! File-backed version store.
//!
//! Plays the persistence collaborator role for the CLI: the live working
//! snapshot lives in `current.json` and the append-only version history in
//! `versions.json`, both under the configured data directory.

use std::fs;
use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use routine_fit_core::{RoutineSnapshot, RoutineVersion, StoreError, VersionStore};

const CURRENT_FILE: &str = "current.json";
const VERSIONS_FILE: &str = "versions.json";

/// Stores the working snapshot and version history as JSON files.
#[derive(Debug, Clone)]
pub struct FileVersionStore {
    data_dir: PathBuf,
}

impl FileVersionStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    fn current_path(&self) -> PathBuf {
        self.data_dir.join(CURRENT_FILE)
    }

    fn versions_path(&self) -> PathBuf {
        self.data_dir.join(VERSIONS_FILE)
    }

    /// Reads the working snapshot. A missing file means nothing has been
    /// configured yet and yields the default (untracked, empty) snapshot.
    pub fn read_current(&self) -> Result<RoutineSnapshot, FileStoreError> {
        let path = self.current_path();
        match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|e| FileStoreError::ParseError(path, e.to_string())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(RoutineSnapshot::default()),
            Err(e) => Err(FileStoreError::IoError(path, e)),
        }
    }

    /// Writes the working snapshot, creating the data directory if needed.
    pub fn write_current(&self, snapshot: &RoutineSnapshot) -> Result<(), FileStoreError> {
        fs::create_dir_all(&self.data_dir)
            .map_err(|e| FileStoreError::IoError(self.data_dir.clone(), e))?;

        let path = self.current_path();
        let contents = serde_json::to_string_pretty(snapshot)
            .map_err(|e| FileStoreError::ParseError(path.clone(), e.to_string()))?;
        fs::write(&path, contents).map_err(|e| FileStoreError::IoError(path, e))?;

        tracing::debug!(path = %self.current_path().display(), "wrote working snapshot");
        Ok(())
    }

    /// Reads the full version history, oldest first. A missing file means no
    /// version has ever been saved.
    pub fn read_versions(&self) -> Result<Vec<RoutineVersion>, FileStoreError> {
        let path = self.versions_path();
        match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|e| FileStoreError::ParseError(path, e.to_string())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(FileStoreError::IoError(path, e)),
        }
    }

    fn append_version(&self, version: &RoutineVersion) -> Result<(), FileStoreError> {
        let mut versions = self.read_versions()?;
        versions.push(version.clone());

        fs::create_dir_all(&self.data_dir)
            .map_err(|e| FileStoreError::IoError(self.data_dir.clone(), e))?;

        let path = self.versions_path();
        let contents = serde_json::to_string_pretty(&versions)
            .map_err(|e| FileStoreError::ParseError(path.clone(), e.to_string()))?;
        fs::write(&path, contents).map_err(|e| FileStoreError::IoError(path, e))
    }
}

#[async_trait]
impl VersionStore for FileVersionStore {
    async fn load_latest_version(&self) -> Result<Option<RoutineVersion>, StoreError> {
        let versions = self
            .read_versions()
            .map_err(|e| StoreError::Load(e.to_string()))?;
        Ok(versions.into_iter().last())
    }

    async fn load_current_snapshot(&self) -> Result<RoutineSnapshot, StoreError> {
        self.read_current()
            .map_err(|e| StoreError::Load(e.to_string()))
    }

    async fn save_version(&mut self, reason: Option<&str>) -> Result<RoutineVersion, StoreError> {
        let snapshot = self
            .read_current()
            .map_err(|e| StoreError::Save(e.to_string()))?;
        let version = RoutineVersion::new(snapshot, reason.map(String::from));

        self.append_version(&version)
            .map_err(|e| StoreError::Save(e.to_string()))?;

        tracing::info!(version = %version.id, "saved routine version");
        Ok(version)
    }
}

/// Errors reading or writing the store files.
#[derive(Debug)]
pub enum FileStoreError {
    /// I/O error reading or writing a file.
    IoError(PathBuf, io::Error),
    /// Error parsing or serializing the JSON contents of a file.
    ParseError(PathBuf, String),
}

impl std::fmt::Display for FileStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileStoreError::IoError(path, e) => {
                write!(f, "I/O error for {}: {}", path.display(), e)
            }
            FileStoreError::ParseError(path, e) => {
                write!(f, "Failed to parse {}: {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for FileStoreError {}
