//! Import/export document format
//!
//! One JSON document carries both collections plus an export timestamp
//! and a format version. Import accepts the same shape with `folders`
//! optional; a document without a `links` array is rejected.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};
use crate::models::{Folder, Link};

/// Current export format version
pub const EXPORT_VERSION: &str = "1.0";

/// The export document: both collections plus provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub links: Vec<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folders: Option<Vec<Folder>>,
    #[serde(default)]
    pub export_date: String,
    #[serde(default)]
    pub version: String,
}

impl ExportDocument {
    /// Build an export document from the full collections
    pub fn new(links: &[Link], folders: &[Folder], exported_at: DateTime<Utc>) -> Self {
        Self {
            links: links.to_vec(),
            folders: Some(folders.to_vec()),
            export_date: exported_at.to_rfc3339(),
            version: EXPORT_VERSION.to_string(),
        }
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> StoreResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| StoreError::Format(format!("failed to serialize export: {}", e)))
    }
}

/// Parse an import document, validating its shape
///
/// Fails with a `Format` error when the input is not JSON or lacks a
/// `links` array.
pub fn parse_document(json: &str) -> StoreResult<ExportDocument> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| StoreError::Format(format!("not valid JSON: {}", e)))?;

    match value.get("links") {
        Some(links) if links.is_array() => {}
        Some(_) => return Err(StoreError::Format("`links` must be an array".to_string())),
        None => return Err(StoreError::Format("missing `links` array".to_string())),
    }

    serde_json::from_value(value).map_err(|e| StoreError::Format(e.to_string()))
}

/// Counts reported by an import merge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub links_added: usize,
    pub folders_added: usize,
}
