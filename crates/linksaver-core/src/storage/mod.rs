//! Snapshot persistence
//!
//! The whole data set is one snapshot with two keys, `links` and
//! `folders`, read and written together on every mutation.

mod error;
mod persistence;

pub use error::{StorageError, StorageResult};
pub use persistence::{Snapshot, SnapshotPersistence, SNAPSHOT_FILE};
