//! Snapshot file persistence
//!
//! The snapshot is a single JSON document holding the `links` and
//! `folders` collections. Writes are atomic (temp file, fsync, rename)
//! so the file is never left partially written.
//!
//! Storage location: `<data_dir>/linksaver.json` (configurable via
//! `Config`).

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::models::{Folder, Link};
use crate::storage::error::{StorageError, StorageResult};

/// Snapshot file name inside the data directory
pub const SNAPSHOT_FILE: &str = "linksaver.json";

/// The whole persisted data set
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub folders: Vec<Folder>,
}

/// Persistence layer for the whole-collection snapshot
pub struct SnapshotPersistence {
    path: PathBuf,
}

impl SnapshotPersistence {
    /// Create a persistence handler for the configured data directory
    pub fn new(config: &Config) -> Self {
        Self {
            path: config.snapshot_path(),
        }
    }

    /// Create a persistence handler for an explicit snapshot path
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The snapshot file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if a snapshot exists on disk
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the snapshot from disk
    ///
    /// Returns `None` if no snapshot file exists yet. Returns an error
    /// if the file exists but cannot be read or parsed.
    pub fn load(&self) -> StorageResult<Option<Snapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&self.path)
            .map_err(|e| StorageError::read_io(e, self.path.clone()))?;

        let snapshot = serde_json::from_slice(&bytes).map_err(|e| StorageError::Corrupt {
            path: self.path.clone(),
            source: e,
        })?;

        Ok(Some(snapshot))
    }

    /// Load the snapshot, or start empty when none exists
    pub fn load_or_default(&self) -> StorageResult<Snapshot> {
        Ok(self.load()?.unwrap_or_default())
    }

    /// Save the snapshot to disk using an atomic write
    pub fn save(&self, snapshot: &Snapshot) -> StorageResult<()> {
        let json = serde_json::to_vec_pretty(snapshot).map_err(|e| StorageError::Corrupt {
            path: self.path.clone(),
            source: e,
        })?;
        atomic_write(&self.path, &json)
    }
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| StorageError::CreateDirectory {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    // Temp file in the same directory so the rename stays on one filesystem
    let temp_path = path.with_extension("tmp");

    let mut file =
        File::create(&temp_path).map_err(|e| StorageError::write_io(e, temp_path.clone()))?;

    file.write_all(data)
        .map_err(|e| StorageError::write_io(e, temp_path.clone()))?;

    file.sync_all()
        .map_err(|e| StorageError::write_io(e, temp_path.clone()))?;

    fs::rename(&temp_path, path).map_err(|e| StorageError::Rename {
        from: temp_path,
        to: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
