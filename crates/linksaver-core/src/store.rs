//! Unified storage interface
//!
//! The `Store` composes the link and folder collections with snapshot
//! persistence and configuration:
//!
//! - Every mutation applies in memory, then writes the whole snapshot.
//! - A failed snapshot write rolls the in-memory state back, so memory
//!   and disk never diverge.
//! - Mutations take `&mut self`, which serializes the read-modify-write
//!   cycle per store instance.
//! - Cross-store operations (folder deletion, import merges) run inside
//!   one commit, so their effects are observed together.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = Store::open()?;
//!
//! let link = store.add_link(NewLink::new("Example", "https://example.com"))?;
//! let results = store.query(&QuerySpec::default());
//! ```

use anyhow::Context;
use chrono::Utc;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{StoreError, StoreResult};
use crate::folders::FolderStore;
use crate::links::LinkStore;
use crate::models::{Folder, Link, LinkPatch, NewLink};
use crate::query::{self, QuerySpec, TagCount};
use crate::storage::{Snapshot, SnapshotPersistence};
use crate::transfer::{ExportDocument, ImportSummary};

/// Unified storage interface for LinkSaver
pub struct Store {
    /// Link collection
    links: LinkStore,
    /// Folder collection
    folders: FolderStore,
    /// Snapshot persistence handler
    persistence: SnapshotPersistence,
    /// Configuration
    config: Config,
}

impl Store {
    /// Open the store using the default configuration
    pub fn open() -> anyhow::Result<Self> {
        let config = Config::load().context("Failed to load configuration")?;
        Ok(Self::open_with_config(config)?)
    }

    /// Open the store with a specific configuration
    ///
    /// Loads the persisted snapshot, or starts empty on first run.
    pub fn open_with_config(config: Config) -> StoreResult<Self> {
        let persistence = SnapshotPersistence::new(&config);
        let snapshot = persistence.load_or_default()?;
        info!(
            links = snapshot.links.len(),
            folders = snapshot.folders.len(),
            "opened store"
        );

        Ok(Self {
            links: LinkStore::from_links(snapshot.links),
            folders: FolderStore::from_folders(snapshot.folders),
            persistence,
            config,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    // ==================== Reads ====================

    /// All links, most recent first
    pub fn links(&self) -> &[Link] {
        self.links.links()
    }

    /// All folders in creation order
    pub fn folders(&self) -> &[Folder] {
        self.folders.folders()
    }

    /// Look up a link by id
    pub fn get_link(&self, id: &str) -> Option<&Link> {
        self.links.get(id)
    }

    /// Look up a folder by id
    pub fn get_folder(&self, id: &str) -> Option<&Folder> {
        self.folders.get(id)
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn folder_count(&self) -> usize {
        self.folders.len()
    }

    /// Run a query against the current collections
    pub fn query(&self, spec: &QuerySpec) -> Vec<Link> {
        query::filter_links(self.links.links(), spec, Utc::now())
    }

    /// Rank tags by occurrence, up to `limit`
    pub fn popular_tags(&self, limit: usize) -> Vec<TagCount> {
        query::popular_tags(self.links.links(), limit)
    }

    /// Build an export document from the full collections
    pub fn export(&self) -> ExportDocument {
        ExportDocument::new(self.links.links(), self.folders.folders(), Utc::now())
    }

    // ==================== Link Operations ====================

    /// Create a link
    ///
    /// A folder reference, if given, must name an existing folder.
    pub fn add_link(&mut self, input: NewLink) -> StoreResult<Link> {
        self.ensure_folder_ref(input.folder_id.as_deref())?;
        let auto_tag = self.config.auto_tag;
        self.commit(|links, _| links.create(input, auto_tag))
    }

    /// Apply a partial update to a link
    pub fn update_link(&mut self, id: &str, patch: LinkPatch) -> StoreResult<Link> {
        if let Some(Some(folder_id)) = &patch.folder_id {
            self.ensure_folder_ref(Some(folder_id))?;
        }
        self.commit(|links, _| links.update(id, patch))
    }

    /// Delete a link
    pub fn delete_link(&mut self, id: &str) -> StoreResult<Link> {
        self.commit(|links, _| links.delete(id))
    }

    /// Flip a link's favorite flag, returning the new value
    pub fn toggle_favorite(&mut self, id: &str) -> StoreResult<bool> {
        self.commit(|links, _| links.toggle_favorite(id))
    }

    /// Flip a link's pinned flag, returning the new value
    pub fn toggle_pin(&mut self, id: &str) -> StoreResult<bool> {
        self.commit(|links, _| links.toggle_pin(id))
    }

    /// Record that a link was opened through the application
    pub fn record_visit(&mut self, id: &str) -> StoreResult<u32> {
        self.commit(|links, _| links.record_visit(id))
    }

    /// Move several links into a folder (or unfile them) in one commit
    ///
    /// Every id must resolve and the target folder must exist; an
    /// unknown id or folder leaves all links where they were. Returns
    /// how many links moved.
    pub fn move_links(&mut self, ids: &[String], folder_id: Option<&str>) -> StoreResult<usize> {
        self.ensure_folder_ref(folder_id)?;
        self.commit(|links, _| links.set_folder(ids, folder_id))
    }

    // ==================== Folder Operations ====================

    /// Create a folder
    pub fn create_folder(
        &mut self,
        name: impl Into<String>,
        description: Option<String>,
        color: Option<String>,
    ) -> StoreResult<Folder> {
        let name = name.into();
        self.commit(|_, folders| folders.create(name, description, color))
    }

    /// Delete a folder and unfile its member links
    ///
    /// Both effects land in the same commit; no reader can observe the
    /// folder gone while links still point to it, or vice versa.
    pub fn delete_folder(&mut self, id: &str) -> StoreResult<(Folder, usize)> {
        self.commit(|links, folders| folders.delete(id, links))
    }

    // ==================== Import ====================

    /// Merge an import document into the store
    ///
    /// Skips incoming links whose URL already exists and incoming
    /// folders whose name already exists; folder references that do not
    /// resolve after the merge are cleared.
    pub fn import(&mut self, doc: ExportDocument) -> StoreResult<ImportSummary> {
        let auto_tag = self.config.auto_tag;
        let ExportDocument {
            links: incoming_links,
            folders: incoming_folders,
            ..
        } = doc;

        self.commit(move |links, folders| {
            let folders_added = match incoming_folders {
                Some(incoming) => folders.merge_imported(incoming),
                None => 0,
            };
            let links_added = links.merge_imported(incoming_links, auto_tag);
            links.prune_folder_references(|id| folders.contains(id));

            Ok(ImportSummary {
                links_added,
                folders_added,
            })
        })
    }

    // ==================== Internals ====================

    fn ensure_folder_ref(&self, folder_id: Option<&str>) -> StoreResult<()> {
        if let Some(id) = folder_id {
            if !self.folders.contains(id) {
                return Err(StoreError::folder_not_found(id));
            }
        }
        Ok(())
    }

    /// Apply a mutation and persist the whole snapshot
    ///
    /// On a persistence failure the collections are restored to their
    /// pre-mutation state before the error is returned.
    fn commit<T>(
        &mut self,
        op: impl FnOnce(&mut LinkStore, &mut FolderStore) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let prior_links = self.links.clone();
        let prior_folders = self.folders.clone();

        let out = op(&mut self.links, &mut self.folders)?;

        let snapshot = Snapshot {
            links: self.links.links().to_vec(),
            folders: self.folders.folders().to_vec(),
        };
        if let Err(err) = self.persistence.save(&snapshot) {
            warn!(error = %err, "snapshot write failed, rolling back in-memory state");
            self.links = prior_links;
            self.folders = prior_folders;
            return Err(err.into());
        }

        Ok(out)
    }
}
