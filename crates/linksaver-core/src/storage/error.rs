//! Storage error handling
//!
//! Typed errors for snapshot reads and writes, classified from the
//! underlying I/O failure where that helps the caller.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during snapshot persistence
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to create the data directory
    #[error("failed to create data directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Permission denied accessing a path
    #[error("permission denied: cannot access '{path}'")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to read the snapshot file
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to write the snapshot file
    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Snapshot file exists but cannot be parsed
    #[error("snapshot at '{path}' is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Atomic write failed during rename
    #[error("atomic write failed: could not rename '{from}' to '{to}': {source}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StorageError {
    /// Classify a read failure by its I/O error kind
    pub fn read_io(source: io::Error, path: PathBuf) -> Self {
        match source.kind() {
            io::ErrorKind::PermissionDenied => StorageError::PermissionDenied { path, source },
            _ => StorageError::Read { path, source },
        }
    }

    /// Classify a write failure by its I/O error kind
    pub fn write_io(source: io::Error, path: PathBuf) -> Self {
        match source.kind() {
            io::ErrorKind::PermissionDenied => StorageError::PermissionDenied { path, source },
            _ => StorageError::Write { path, source },
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
