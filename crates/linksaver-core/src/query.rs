//! Query engine
//!
//! Pure derivation of filtered and sorted views over the link
//! collection. The engine never mutates its inputs and always returns a
//! fresh sequence. Filters are applied as a logical AND of search text,
//! category, and active tags, followed by the requested sort.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Link;

/// Days a link counts as "recent"
pub const RECENT_WINDOW_DAYS: i64 = 7;

/// Tag-cloud size used by the dashboard view
pub const DASHBOARD_TAG_LIMIT: usize = 20;

/// Tag-cloud size used by the popup view
pub const POPUP_TAG_LIMIT: usize = 10;

/// Category filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    All,
    Favorites,
    Pinned,
    /// Saved strictly within the last seven days
    Recent,
    /// Filed under the folder named in the query spec
    Folder,
}

/// Total order applied to query results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    Title,
    Domain,
    Visits,
}

/// The combination of search text, category, tag filter, and sort order
/// that determines which links are shown and in what order
#[derive(Debug, Clone, Default)]
pub struct QuerySpec {
    /// Case-insensitive substring matched against title, domain, note,
    /// and each tag; a link matches if any field contains it
    pub search_text: String,
    pub category: Category,
    /// Only consulted when `category` is `Folder`
    pub folder_id: Option<String>,
    /// If non-empty, a link must carry at least one of these tags
    pub active_tags: Vec<String>,
    pub sort: SortOrder,
}

/// A tag with its occurrence count across all links
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
    pub name: String,
    pub count: usize,
}

/// Filter and sort links according to a query spec
///
/// `now` is the evaluation time for the `Recent` category; passing it in
/// keeps the boundary deterministic under test.
pub fn filter_links(links: &[Link], spec: &QuerySpec, now: DateTime<Utc>) -> Vec<Link> {
    let needle = spec.search_text.trim().to_lowercase();
    let cutoff = now - Duration::days(RECENT_WINDOW_DAYS);

    let mut out: Vec<Link> = links
        .iter()
        .filter(|link| matches_search(link, &needle))
        .filter(|link| matches_category(link, spec, cutoff))
        .filter(|link| matches_tags(link, &spec.active_tags))
        .cloned()
        .collect();

    // Vec::sort_by is stable, so ties keep the collection order
    match spec.sort {
        SortOrder::Newest => out.sort_by(|a, b| b.saved_at.cmp(&a.saved_at)),
        SortOrder::Oldest => out.sort_by(|a, b| a.saved_at.cmp(&b.saved_at)),
        SortOrder::Title => out.sort_by(|a, b| a.title.cmp(&b.title)),
        SortOrder::Domain => out.sort_by(|a, b| a.domain.cmp(&b.domain)),
        SortOrder::Visits => out.sort_by(|a, b| b.visit_count.cmp(&a.visit_count)),
    }

    out
}

fn matches_search(link: &Link, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    link.title.to_lowercase().contains(needle)
        || link.domain.to_lowercase().contains(needle)
        || link.note.to_lowercase().contains(needle)
        || link.tags.iter().any(|t| t.to_lowercase().contains(needle))
}

fn matches_category(link: &Link, spec: &QuerySpec, cutoff: DateTime<Utc>) -> bool {
    match spec.category {
        Category::All => true,
        Category::Favorites => link.favorite,
        Category::Pinned => link.pinned,
        Category::Recent => link.saved_at > cutoff,
        Category::Folder => match &spec.folder_id {
            Some(folder_id) => link.folder_id.as_deref() == Some(folder_id.as_str()),
            None => true,
        },
    }
}

fn matches_tags(link: &Link, active: &[String]) -> bool {
    active.is_empty() || link.tags.iter().any(|t| active.contains(t))
}

/// Rank tags by occurrence count across all links
///
/// Descending by count; ties keep first-seen order. At most `limit`
/// entries are returned.
pub fn popular_tags(links: &[Link], limit: usize) -> Vec<TagCount> {
    let mut counts: Vec<TagCount> = Vec::new();
    for link in links {
        for tag in &link.tags {
            match counts.iter_mut().find(|c| &c.name == tag) {
                Some(entry) => entry.count += 1,
                None => counts.push(TagCount {
                    name: tag.clone(),
                    count: 1,
                }),
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}
