//! LinkSaver Core Library
//!
//! This crate provides the core functionality for LinkSaver: saving
//! links with auto-tagging, organizing them into folders, and deriving
//! filtered/sorted views for a dashboard.
//!
//! # Architecture
//!
//! Both collections live entirely in memory and are written back as one
//! snapshot after every mutation. There is no incremental persistence;
//! the whole-blob model is intentional.
//!
//! # Quick Start
//!
//! ```text
//! let mut store = Store::open()?;
//!
//! // Save a link (auto-tagged from its domain and title)
//! let link = store.add_link(NewLink::new("Example", "https://example.com"))?;
//!
//! // Query links
//! let results = store.query(&QuerySpec::default());
//! ```
//!
//! # Modules
//!
//! - `store`: Unified storage interface (main entry point)
//! - `models`: Data structures for links and folders
//! - `links`, `folders`: The two collections and their mutations
//! - `query`: Pure filtered/sorted view derivation and tag ranking
//! - `autotag`: Table-driven automatic tag derivation
//! - `transfer`: Import/export document format
//! - `storage`: Snapshot persistence
//! - `config`: Application configuration

pub mod autotag;
pub mod config;
pub mod error;
pub mod folders;
pub mod links;
pub mod models;
pub mod query;
pub mod storage;
pub mod store;
pub mod transfer;

pub use config::Config;
pub use error::{StoreError, StoreResult};
pub use folders::FolderStore;
pub use links::{LinkStore, MAX_LINKS};
pub use models::{Folder, Link, LinkPatch, NewLink};
pub use query::{Category, QuerySpec, SortOrder, TagCount};
pub use storage::{Snapshot, SnapshotPersistence, StorageError};
pub use store::Store;
pub use transfer::{ExportDocument, ImportSummary, EXPORT_VERSION};
