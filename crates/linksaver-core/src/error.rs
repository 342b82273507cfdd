//! Typed errors for store operations
//!
//! Validation and not-found errors are surfaced synchronously and never
//! leave the store partially mutated. Persistence errors carry the
//! underlying storage failure.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors returned by store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// A required field is missing, empty, or malformed
    #[error("validation failed: {0}")]
    Validation(String),

    /// An operation referenced a nonexistent id
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// An import document does not have the required shape
    #[error("invalid import document: {0}")]
    Format(String),

    /// Reading or writing the persisted snapshot failed
    #[error("storage failure: {0}")]
    Persistence(#[from] StorageError),
}

impl StoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        StoreError::Validation(message.into())
    }

    pub fn link_not_found(id: impl Into<String>) -> Self {
        StoreError::NotFound {
            kind: "link",
            id: id.into(),
        }
    }

    pub fn folder_not_found(id: impl Into<String>) -> Self {
        StoreError::NotFound {
            kind: "folder",
            id: id.into(),
        }
    }

    /// Whether this error refers to a missing record
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
