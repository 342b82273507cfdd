//! Data models for LinkSaver
//!
//! Defines the core data structures: Link and Folder. Field names
//! serialize in camelCase so snapshots and export documents keep the
//! storage shape of the original extension.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A saved link with metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    /// Unique identifier, assigned at creation and never changed
    pub id: String,
    /// Display title
    pub title: String,
    /// The URL
    pub url: String,
    /// Host component of the URL, recomputed whenever the URL changes
    pub domain: String,
    /// Optional favicon URL (not validated)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    /// Free-text note
    #[serde(default)]
    pub note: String,
    /// Tags for organization (deduplicated, case-sensitive)
    #[serde(default)]
    pub tags: Vec<String>,
    /// When this link was saved
    pub saved_at: DateTime<Utc>,
    /// Number of times the link was opened through the application
    #[serde(default)]
    pub visit_count: u32,
    /// Favorite flag
    #[serde(default)]
    pub favorite: bool,
    /// Pinned flag
    #[serde(default)]
    pub pinned: bool,
    /// Optional reference to a folder; absent means unfiled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
}

/// A named grouping that links optionally reference by id
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    /// Unique identifier
    pub id: String,
    /// Folder name
    pub name: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Display color
    #[serde(default = "default_folder_color")]
    pub color: String,
    /// When this folder was created
    pub created_at: DateTime<Utc>,
}

/// Default folder color when none is given
pub fn default_folder_color() -> String {
    "#2563eb".to_string()
}

/// Input for creating a link
#[derive(Debug, Clone, Default)]
pub struct NewLink {
    pub title: String,
    pub url: String,
    pub favicon: Option<String>,
    pub note: String,
    pub tags: Vec<String>,
    pub folder_id: Option<String>,
}

impl NewLink {
    /// Create input with just a title and URL
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            ..Self::default()
        }
    }
}

/// Partial update for a link
///
/// `None` fields are left untouched. `folder_id` uses a nested option:
/// `Some(None)` unfiles the link, `Some(Some(id))` moves it.
/// The id and creation time of a link cannot be changed.
#[derive(Debug, Clone, Default)]
pub struct LinkPatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub note: Option<String>,
    pub tags: Option<Vec<String>>,
    pub folder_id: Option<Option<String>>,
    /// Re-run auto-tagging and merge the result into the tags
    pub refresh_auto_tags: bool,
}

/// Generate a fresh opaque id
pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_link_defaults() {
        let input = NewLink::new("Example", "https://example.com");
        assert_eq!(input.title, "Example");
        assert_eq!(input.url, "https://example.com");
        assert!(input.tags.is_empty());
        assert!(input.folder_id.is_none());
        assert!(input.note.is_empty());
    }

    #[test]
    fn test_link_serialization_uses_camel_case() {
        let link = Link {
            id: "abc".to_string(),
            title: "Example".to_string(),
            url: "https://example.com/x".to_string(),
            domain: "example.com".to_string(),
            favicon: None,
            note: String::new(),
            tags: vec!["code".to_string()],
            saved_at: Utc::now(),
            visit_count: 3,
            favorite: true,
            pinned: false,
            folder_id: None,
        };

        let json = serde_json::to_value(&link).unwrap();
        assert!(json.get("savedAt").is_some());
        assert_eq!(json["visitCount"], 3);
        // Absent folder reference is omitted entirely
        assert!(json.get("folderId").is_none());
    }

    #[test]
    fn test_link_deserializes_sparse_records() {
        // Records written before favorite/pinned existed have no such fields
        let json = r#"{
            "id": "1",
            "title": "Old",
            "url": "https://old.example",
            "domain": "old.example",
            "savedAt": "2024-01-01T00:00:00Z"
        }"#;
        let link: Link = serde_json::from_str(json).unwrap();
        assert_eq!(link.visit_count, 0);
        assert!(!link.favorite);
        assert!(!link.pinned);
        assert!(link.tags.is_empty());
        assert!(link.folder_id.is_none());
    }

    #[test]
    fn test_folder_roundtrip() {
        let folder = Folder {
            id: "f1".to_string(),
            name: "Work".to_string(),
            description: Some("Work stuff".to_string()),
            color: "#dc2626".to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&folder).unwrap();
        let parsed: Folder = serde_json::from_str(&json).unwrap();
        assert_eq!(folder, parsed);
    }

    #[test]
    fn test_folder_default_color() {
        let json = r#"{"id": "f1", "name": "Inbox", "createdAt": "2024-01-01T00:00:00Z"}"#;
        let folder: Folder = serde_json::from_str(json).unwrap();
        assert_eq!(folder.color, default_folder_color());
    }
}
