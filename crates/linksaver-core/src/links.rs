//! Link collection and its mutations
//!
//! `LinkStore` is the authoritative in-memory list of saved links. The
//! natural order is most-recent-first: new links are inserted at the
//! front and the collection is capped FIFO by insertion order.
//!
//! Every mutation validates before it touches a record, so a failed
//! operation leaves the collection exactly as it was.

use chrono::Utc;
use tracing::debug;
use url::Url;

use crate::autotag;
use crate::error::{StoreError, StoreResult};
use crate::models::{new_id, Link, LinkPatch, NewLink};

/// Maximum number of links kept; oldest-inserted entries beyond the cap
/// are dropped first
pub const MAX_LINKS: usize = 1000;

/// Authoritative in-memory collection of links
#[derive(Debug, Clone, Default)]
pub struct LinkStore {
    links: Vec<Link>,
}

impl LinkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from persisted records
    pub fn from_links(links: Vec<Link>) -> Self {
        Self { links }
    }

    /// All links, most recent first
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Look up a link by id
    pub fn get(&self, id: &str) -> Option<&Link> {
        self.links.iter().find(|l| l.id == id)
    }

    fn position(&self, id: &str) -> StoreResult<usize> {
        self.links
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| StoreError::link_not_found(id))
    }

    /// Create a link and insert it at the front of the collection
    ///
    /// Validates the URL and title, derives the domain, and merges
    /// auto-tags (when enabled) with caller-supplied tags. Enforces the
    /// collection cap after insertion.
    pub fn create(&mut self, input: NewLink, auto_tag: bool) -> StoreResult<Link> {
        let title = input.title.trim().to_string();
        if title.is_empty() {
            return Err(StoreError::validation("title must not be empty"));
        }
        let domain = domain_of(&input.url)?;

        let mut tags = if auto_tag {
            autotag::tags_for(&domain, &title)
        } else {
            Vec::new()
        };
        autotag::merge_tags(&mut tags, input.tags);

        let link = Link {
            id: new_id(),
            title,
            url: input.url,
            domain,
            favicon: input.favicon,
            note: input.note,
            tags,
            saved_at: Utc::now(),
            visit_count: 0,
            favorite: false,
            pinned: false,
            folder_id: input.folder_id,
        };

        debug!(id = %link.id, url = %link.url, "created link");
        self.links.insert(0, link.clone());
        self.links.truncate(MAX_LINKS);
        Ok(link)
    }

    /// Apply a partial update to a link
    ///
    /// The id and saved-at timestamp cannot be changed; a new URL has its
    /// domain recomputed.
    pub fn update(&mut self, id: &str, patch: LinkPatch) -> StoreResult<Link> {
        let idx = self.position(id)?;

        // Validate everything fallible before applying anything
        let new_title = match patch.title {
            Some(t) => {
                let t = t.trim().to_string();
                if t.is_empty() {
                    return Err(StoreError::validation("title must not be empty"));
                }
                Some(t)
            }
            None => None,
        };
        let new_url = match patch.url {
            Some(u) => {
                let domain = domain_of(&u)?;
                Some((u, domain))
            }
            None => None,
        };

        let link = &mut self.links[idx];
        if let Some(title) = new_title {
            link.title = title;
        }
        if let Some((url, domain)) = new_url {
            link.url = url;
            link.domain = domain;
        }
        if let Some(note) = patch.note {
            link.note = note;
        }
        if let Some(tags) = patch.tags {
            link.tags.clear();
            autotag::merge_tags(&mut link.tags, tags);
        }
        if let Some(folder_id) = patch.folder_id {
            link.folder_id = folder_id;
        }
        if patch.refresh_auto_tags {
            let derived = autotag::tags_for(&link.domain, &link.title);
            autotag::merge_tags(&mut link.tags, derived);
        }

        debug!(id = %link.id, "updated link");
        Ok(link.clone())
    }

    /// Remove a link, returning the removed record
    pub fn delete(&mut self, id: &str) -> StoreResult<Link> {
        let idx = self.position(id)?;
        let link = self.links.remove(idx);
        debug!(id = %link.id, "deleted link");
        Ok(link)
    }

    /// Flip the favorite flag, returning the new value
    pub fn toggle_favorite(&mut self, id: &str) -> StoreResult<bool> {
        let idx = self.position(id)?;
        let link = &mut self.links[idx];
        link.favorite = !link.favorite;
        Ok(link.favorite)
    }

    /// Flip the pinned flag, returning the new value
    pub fn toggle_pin(&mut self, id: &str) -> StoreResult<bool> {
        let idx = self.position(id)?;
        let link = &mut self.links[idx];
        link.pinned = !link.pinned;
        Ok(link.pinned)
    }

    /// Increment the visit count by one, returning the new count
    pub fn record_visit(&mut self, id: &str) -> StoreResult<u32> {
        let idx = self.position(id)?;
        let link = &mut self.links[idx];
        link.visit_count += 1;
        Ok(link.visit_count)
    }

    /// Remove the folder reference from every link filed under `folder_id`
    ///
    /// Used by folder deletion; returns how many links were unfiled.
    pub fn clear_folder_reference(&mut self, folder_id: &str) -> usize {
        let mut cleared = 0;
        for link in &mut self.links {
            if link.folder_id.as_deref() == Some(folder_id) {
                link.folder_id = None;
                cleared += 1;
            }
        }
        cleared
    }

    /// Clear folder references that `exists` does not recognize
    ///
    /// Keeps the no-dangling-reference invariant after an import merge.
    pub fn prune_folder_references(&mut self, exists: impl Fn(&str) -> bool) -> usize {
        let mut cleared = 0;
        for link in &mut self.links {
            if let Some(folder_id) = link.folder_id.as_deref() {
                if !exists(folder_id) {
                    link.folder_id = None;
                    cleared += 1;
                }
            }
        }
        cleared
    }

    /// Merge imported links, skipping any whose URL or id is already
    /// present
    ///
    /// New links keep their incoming ids and timestamps, get auto-tags
    /// merged in (when enabled), and are appended behind existing links.
    /// Once the collection is full the remaining incoming links are
    /// dropped. Returns the number of links actually added.
    pub fn merge_imported(&mut self, incoming: Vec<Link>, auto_tag: bool) -> usize {
        use std::collections::HashSet;

        let mut urls: HashSet<String> = self.links.iter().map(|l| l.url.clone()).collect();
        let mut ids: HashSet<String> = self.links.iter().map(|l| l.id.clone()).collect();

        let mut added = 0;
        for mut link in incoming {
            if self.links.len() >= MAX_LINKS {
                break;
            }
            if urls.contains(&link.url) || ids.contains(&link.id) {
                continue;
            }
            if auto_tag {
                let derived = autotag::tags_for(&link.domain, &link.title);
                autotag::merge_tags(&mut link.tags, derived);
            }
            urls.insert(link.url.clone());
            ids.insert(link.id.clone());
            self.links.push(link);
            added += 1;
        }
        added
    }

    /// File every listed link under `folder_id`, or unfile them all
    ///
    /// All ids are resolved before anything changes, so an unknown id
    /// leaves the collection untouched. Returns how many links moved.
    pub fn set_folder(&mut self, ids: &[String], folder_id: Option<&str>) -> StoreResult<usize> {
        let positions = ids
            .iter()
            .map(|id| self.position(id))
            .collect::<StoreResult<Vec<_>>>()?;

        for idx in &positions {
            self.links[*idx].folder_id = folder_id.map(str::to_string);
        }
        debug!(count = positions.len(), "moved links");
        Ok(positions.len())
    }
}

/// Derive the domain from a URL, or fail validation
///
/// The URL must be a syntactically valid absolute URL with a host.
pub fn domain_of(url: &str) -> StoreResult<String> {
    let parsed = Url::parse(url)
        .map_err(|e| StoreError::validation(format!("invalid url '{}': {}", url, e)))?;
    parsed
        .host_str()
        .map(str::to_string)
        .ok_or_else(|| StoreError::validation(format!("url '{}' has no host", url)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(url: &str, title: &str) -> NewLink {
        NewLink::new(title, url)
    }

    #[test]
    fn test_create_sets_defaults() {
        let mut store = LinkStore::new();
        let link = store
            .create(sample("https://example.com/x", "Example"), true)
            .unwrap();

        assert_eq!(link.domain, "example.com");
        assert_eq!(link.visit_count, 0);
        assert!(!link.favorite);
        assert!(!link.pinned);
        assert!(link.folder_id.is_none());

        let found = store.get(&link.id).unwrap();
        assert_eq!(found, &link);
    }

    #[test]
    fn test_create_rejects_empty_title() {
        let mut store = LinkStore::new();
        let err = store
            .create(sample("https://example.com", "   "), true)
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_create_rejects_bad_url() {
        let mut store = LinkStore::new();
        let err = store.create(sample("not a url", "Title"), true).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));

        // Relative URLs are not absolute URLs
        let err = store.create(sample("/relative/path", "Title"), true).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_create_merges_auto_and_caller_tags() {
        let mut store = LinkStore::new();
        let mut input = sample("https://github.com/rust-lang/rust", "Rust");
        input.tags = vec!["rust".to_string(), "code".to_string()];

        let link = store.create(input, true).unwrap();
        assert_eq!(link.tags, vec!["code", "development", "rust"]);
    }

    #[test]
    fn test_create_without_auto_tagging() {
        let mut store = LinkStore::new();
        let mut input = sample("https://github.com/x", "Repo");
        input.tags = vec!["mine".to_string()];

        let link = store.create(input, false).unwrap();
        assert_eq!(link.tags, vec!["mine"]);
    }

    #[test]
    fn test_newest_first_ordering() {
        let mut store = LinkStore::new();
        let a = store.create(sample("https://a.example", "A"), false).unwrap();
        let b = store.create(sample("https://b.example", "B"), false).unwrap();

        assert_eq!(store.links()[0].id, b.id);
        assert_eq!(store.links()[1].id, a.id);
    }

    #[test]
    fn test_cap_drops_oldest_inserted() {
        let mut store = LinkStore::new();
        let first = store
            .create(sample("https://first.example", "First"), false)
            .unwrap();
        for i in 0..MAX_LINKS {
            store
                .create(sample(&format!("https://site{}.example", i), "Link"), false)
                .unwrap();
        }

        assert_eq!(store.len(), MAX_LINKS);
        assert!(store.get(&first.id).is_none());
    }

    #[test]
    fn test_duplicate_urls_allowed_on_create() {
        // Deduplication happens only on import
        let mut store = LinkStore::new();
        store.create(sample("https://a.example/x", "Example"), false).unwrap();
        store.create(sample("https://a.example/x", "Example"), false).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_update_recomputes_domain() {
        let mut store = LinkStore::new();
        let link = store.create(sample("https://old.example/p", "Old"), false).unwrap();

        let updated = store
            .update(
                &link.id,
                LinkPatch {
                    url: Some("https://new.example/q".to_string()),
                    ..LinkPatch::default()
                },
            )
            .unwrap();

        assert_eq!(updated.domain, "new.example");
        assert_eq!(updated.id, link.id);
        assert_eq!(updated.saved_at, link.saved_at);
    }

    #[test]
    fn test_update_validates_before_applying() {
        let mut store = LinkStore::new();
        let link = store.create(sample("https://a.example", "Keep"), false).unwrap();

        let err = store
            .update(
                &link.id,
                LinkPatch {
                    title: Some("New title".to_string()),
                    url: Some("bogus".to_string()),
                    ..LinkPatch::default()
                },
            )
            .unwrap_err();

        assert!(matches!(err, StoreError::Validation(_)));
        // Nothing was applied, including the valid title
        assert_eq!(store.get(&link.id).unwrap().title, "Keep");
    }

    #[test]
    fn test_update_missing_link() {
        let mut store = LinkStore::new();
        let err = store.update("nope", LinkPatch::default()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_update_refresh_auto_tags_on_request() {
        let mut store = LinkStore::new();
        let link = store
            .create(sample("https://github.com/x", "Repo"), false)
            .unwrap();
        assert!(link.tags.is_empty());

        // A plain update never re-tags
        let updated = store
            .update(
                &link.id,
                LinkPatch {
                    note: Some("a note".to_string()),
                    ..LinkPatch::default()
                },
            )
            .unwrap();
        assert!(updated.tags.is_empty());

        // An explicit refresh does
        let updated = store
            .update(
                &link.id,
                LinkPatch {
                    refresh_auto_tags: true,
                    ..LinkPatch::default()
                },
            )
            .unwrap();
        assert_eq!(updated.tags, vec!["code", "development"]);
    }

    #[test]
    fn test_update_replaces_tags_deduplicated() {
        let mut store = LinkStore::new();
        let link = store.create(sample("https://a.example", "A"), false).unwrap();

        let updated = store
            .update(
                &link.id,
                LinkPatch {
                    tags: Some(vec![
                        "one".to_string(),
                        "one".to_string(),
                        "".to_string(),
                        "two".to_string(),
                    ]),
                    ..LinkPatch::default()
                },
            )
            .unwrap();
        assert_eq!(updated.tags, vec!["one", "two"]);
    }

    #[test]
    fn test_delete_fails_on_repeat() {
        let mut store = LinkStore::new();
        let link = store.create(sample("https://a.example", "A"), false).unwrap();

        store.delete(&link.id).unwrap();
        let err = store.delete(&link.id).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_toggle_favorite_is_involution() {
        let mut store = LinkStore::new();
        let link = store.create(sample("https://a.example", "A"), false).unwrap();

        assert!(store.toggle_favorite(&link.id).unwrap());
        assert!(!store.toggle_favorite(&link.id).unwrap());
        assert!(!store.get(&link.id).unwrap().favorite);
    }

    #[test]
    fn test_record_visit_increments_only_count() {
        let mut store = LinkStore::new();
        let link = store.create(sample("https://a.example", "A"), false).unwrap();

        assert_eq!(store.record_visit(&link.id).unwrap(), 1);
        assert_eq!(store.record_visit(&link.id).unwrap(), 2);

        let after = store.get(&link.id).unwrap();
        assert_eq!(after.visit_count, 2);
        assert_eq!(after.title, link.title);
        assert_eq!(after.saved_at, link.saved_at);
        assert!(!after.favorite);
    }

    #[test]
    fn test_clear_folder_reference() {
        let mut store = LinkStore::new();
        for i in 0..3 {
            let mut input = sample(&format!("https://s{}.example", i), "L");
            input.folder_id = Some("f1".to_string());
            store.create(input, false).unwrap();
        }
        let mut other = sample("https://other.example", "O");
        other.folder_id = Some("f2".to_string());
        store.create(other, false).unwrap();

        assert_eq!(store.clear_folder_reference("f1"), 3);
        assert!(store
            .links()
            .iter()
            .all(|l| l.folder_id.as_deref() != Some("f1")));
        // The other folder's members are untouched
        assert_eq!(
            store
                .links()
                .iter()
                .filter(|l| l.folder_id.as_deref() == Some("f2"))
                .count(),
            1
        );
        // Clearing an unknown folder is a no-op, never an error
        assert_eq!(store.clear_folder_reference("missing"), 0);
    }

    #[test]
    fn test_merge_imported_skips_duplicate_urls() {
        let mut store = LinkStore::new();
        let existing = store
            .create(sample("https://dup.example/x", "Existing"), false)
            .unwrap();

        let incoming = vec![
            Link {
                url: "https://dup.example/x".to_string(),
                ..existing.clone()
            },
            Link {
                id: "imported-1".to_string(),
                url: "https://fresh.example/y".to_string(),
                domain: "fresh.example".to_string(),
                ..existing.clone()
            },
        ];

        let added = store.merge_imported(incoming, false);
        assert_eq!(added, 1);
        assert_eq!(store.len(), 2);
        // Imported links land behind existing ones
        assert_eq!(store.links()[1].id, "imported-1");
    }

    #[test]
    fn test_merge_imported_applies_auto_tags() {
        let mut store = LinkStore::new();
        let incoming = vec![Link {
            id: "i1".to_string(),
            title: "Repo".to_string(),
            url: "https://github.com/a/b".to_string(),
            domain: "github.com".to_string(),
            favicon: None,
            note: String::new(),
            tags: vec!["mine".to_string()],
            saved_at: Utc::now(),
            visit_count: 0,
            favorite: false,
            pinned: false,
            folder_id: None,
        }];

        store.merge_imported(incoming, true);
        assert_eq!(
            store.links()[0].tags,
            vec!["mine", "code", "development"]
        );
    }

    #[test]
    fn test_merge_imported_skips_duplicate_ids() {
        let mut store = LinkStore::new();
        let existing = store
            .create(sample("https://a.example/x", "Existing"), false)
            .unwrap();

        // Same id, fresh URL: must not create a second record with that id
        let incoming = vec![Link {
            url: "https://fresh.example/y".to_string(),
            domain: "fresh.example".to_string(),
            ..existing.clone()
        }];

        let added = store.merge_imported(incoming, false);
        assert_eq!(added, 0);
        assert_eq!(
            store.links().iter().filter(|l| l.id == existing.id).count(),
            1
        );
    }

    #[test]
    fn test_merge_imported_at_cap_adds_nothing() {
        let mut store = LinkStore::new();
        for i in 0..MAX_LINKS {
            store
                .create(sample(&format!("https://site{}.example", i), "Link"), false)
                .unwrap();
        }

        let incoming = vec![Link {
            id: "fresh".to_string(),
            title: "Fresh".to_string(),
            url: "https://fresh.example".to_string(),
            domain: "fresh.example".to_string(),
            favicon: None,
            note: String::new(),
            tags: Vec::new(),
            saved_at: Utc::now(),
            visit_count: 0,
            favorite: false,
            pinned: false,
            folder_id: None,
        }];

        // The collection is full; the reported count matches what landed
        let added = store.merge_imported(incoming, false);
        assert_eq!(added, 0);
        assert_eq!(store.len(), MAX_LINKS);
        assert!(store.get("fresh").is_none());
    }

    #[test]
    fn test_merge_imported_fills_remaining_capacity() {
        let mut store = LinkStore::new();
        for i in 0..MAX_LINKS - 1 {
            store
                .create(sample(&format!("https://site{}.example", i), "Link"), false)
                .unwrap();
        }

        let incoming = (0..2)
            .map(|i| Link {
                id: format!("imp-{}", i),
                title: "Imported".to_string(),
                url: format!("https://imp{}.example", i),
                domain: format!("imp{}.example", i),
                favicon: None,
                note: String::new(),
                tags: Vec::new(),
                saved_at: Utc::now(),
                visit_count: 0,
                favorite: false,
                pinned: false,
                folder_id: None,
            })
            .collect();

        let added = store.merge_imported(incoming, false);
        assert_eq!(added, 1);
        assert_eq!(store.len(), MAX_LINKS);
        assert!(store.get("imp-0").is_some());
        assert!(store.get("imp-1").is_none());
    }

    #[test]
    fn test_set_folder_moves_all_listed_links() {
        let mut store = LinkStore::new();
        let a = store.create(sample("https://a.example", "A"), false).unwrap();
        let b = store.create(sample("https://b.example", "B"), false).unwrap();
        let c = store.create(sample("https://c.example", "C"), false).unwrap();

        let moved = store
            .set_folder(&[a.id.clone(), b.id.clone()], Some("f1"))
            .unwrap();
        assert_eq!(moved, 2);
        assert_eq!(store.get(&a.id).unwrap().folder_id.as_deref(), Some("f1"));
        assert_eq!(store.get(&b.id).unwrap().folder_id.as_deref(), Some("f1"));
        assert!(store.get(&c.id).unwrap().folder_id.is_none());

        // Unfile them again
        let moved = store.set_folder(&[a.id.clone(), b.id.clone()], None).unwrap();
        assert_eq!(moved, 2);
        assert!(store.get(&a.id).unwrap().folder_id.is_none());
    }

    #[test]
    fn test_set_folder_unknown_id_moves_nothing() {
        let mut store = LinkStore::new();
        let a = store.create(sample("https://a.example", "A"), false).unwrap();

        let err = store
            .set_folder(&[a.id.clone(), "missing".to_string()], Some("f1"))
            .unwrap_err();
        assert!(err.is_not_found());
        // The known id was not moved either
        assert!(store.get(&a.id).unwrap().folder_id.is_none());
    }

    #[test]
    fn test_domain_of() {
        assert_eq!(domain_of("https://github.com/a/b").unwrap(), "github.com");
        assert_eq!(
            domain_of("http://news.ycombinator.com").unwrap(),
            "news.ycombinator.com"
        );
        assert!(domain_of("nonsense").is_err());
        // A scheme without a host is not enough
        assert!(domain_of("mailto:someone@example.com").is_err());
    }
}
