//! Folder collection
//!
//! Folders are a flat list; links reference them by id. Deleting a
//! folder unfiles its member links through the link store rather than
//! cascading the delete.

use chrono::Utc;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::links::LinkStore;
use crate::models::{default_folder_color, new_id, Folder};

/// Authoritative in-memory collection of folders
#[derive(Debug, Clone, Default)]
pub struct FolderStore {
    folders: Vec<Folder>,
}

impl FolderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from persisted records
    pub fn from_folders(folders: Vec<Folder>) -> Self {
        Self { folders }
    }

    /// All folders in creation order
    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    pub fn len(&self) -> usize {
        self.folders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }

    /// Look up a folder by id
    pub fn get(&self, id: &str) -> Option<&Folder> {
        self.folders.iter().find(|f| f.id == id)
    }

    /// Whether a folder with this id exists
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Create a folder
    pub fn create(
        &mut self,
        name: impl Into<String>,
        description: Option<String>,
        color: Option<String>,
    ) -> StoreResult<Folder> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(StoreError::validation("folder name must not be empty"));
        }

        let folder = Folder {
            id: new_id(),
            name,
            description: description.filter(|d| !d.is_empty()),
            color: color.unwrap_or_else(default_folder_color),
            created_at: Utc::now(),
        };

        debug!(id = %folder.id, name = %folder.name, "created folder");
        self.folders.push(folder.clone());
        Ok(folder)
    }

    /// Delete a folder and unfile all links that reference it
    ///
    /// The folder removal and the link updates happen in one call, so a
    /// reader never sees one without the other. Returns the removed
    /// folder and the number of links unfiled.
    pub fn delete(&mut self, id: &str, links: &mut LinkStore) -> StoreResult<(Folder, usize)> {
        let idx = self
            .folders
            .iter()
            .position(|f| f.id == id)
            .ok_or_else(|| StoreError::folder_not_found(id))?;

        let folder = self.folders.remove(idx);
        let unfiled = links.clear_folder_reference(&folder.id);
        debug!(id = %folder.id, unfiled, "deleted folder");
        Ok((folder, unfiled))
    }

    /// Merge imported folders, skipping any whose name or id already
    /// exists
    ///
    /// Returns the number of folders actually added.
    pub fn merge_imported(&mut self, incoming: Vec<Folder>) -> usize {
        use std::collections::HashSet;

        let mut names: HashSet<String> = self.folders.iter().map(|f| f.name.clone()).collect();
        let mut ids: HashSet<String> = self.folders.iter().map(|f| f.id.clone()).collect();

        let mut added = 0;
        for folder in incoming {
            if names.contains(&folder.name) || ids.contains(&folder.id) {
                continue;
            }
            names.insert(folder.name.clone());
            ids.insert(folder.id.clone());
            self.folders.push(folder);
            added += 1;
        }
        added
    }
}
