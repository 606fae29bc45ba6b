//! Metadata record model for shared documents.

use chrono::{DateTime, Utc};

/// Language tag applied when a synchronization does not name one.
pub const DEFAULT_LANGUAGE: &str = "plaintext";

/// One metadata record per shared document.
///
/// The record does not hold content itself; `locator` names the blob that
/// does. If `locator` is non-empty, a blob should exist under that name
/// reflecting the last successfully synchronized content. That is a
/// best-effort goal, not a guarantee: a synchronization that wrote the blob
/// but failed the metadata patch leaves `language` and `last_updated` stale.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DocumentRecord {
    /// Opaque identifier assigned by the upstream system. Immutable.
    pub id: String,

    /// Name of the document's blob in the blob store. May carry incidental
    /// surrounding whitespace; consumers trim it before use.
    pub locator: String,

    /// Free-text tag describing the content syntax
    #[serde(default = "default_language")]
    pub language: String,

    /// UTC timestamp of the last successful synchronization, if any
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_owned()
}

impl DocumentRecord {
    /// Creates a record mapping `id` to `locator` with default descriptive
    /// fields, as written at registration time.
    pub fn new(id: impl Into<String>, locator: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            locator: locator.into(),
            language: default_language(),
            last_updated: None,
        }
    }
}

/// Partial-field update for a [`DocumentRecord`].
///
/// Fields left as `None` are not touched by
/// [`MetadataStore::update_record`](crate::MetadataStore::update_record).
#[derive(Debug, Clone, Default)]
pub struct RecordPatch {
    pub language: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl RecordPatch {
    /// Apply this patch to a record in place.
    pub fn apply(&self, record: &mut DocumentRecord) {
        if let Some(language) = &self.language {
            record.language = language.clone();
        }
        if let Some(last_updated) = self.last_updated {
            record.last_updated = Some(last_updated);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_uses_default_language() {
        let record = DocumentRecord::new("doc1", "doc1.txt");
        assert_eq!(record.language, DEFAULT_LANGUAGE);
        assert!(record.last_updated.is_none());
    }

    #[test]
    fn patch_leaves_unset_fields_alone() {
        let mut record = DocumentRecord::new("doc1", "doc1.txt");
        record.language = "rust".to_owned();

        RecordPatch::default().apply(&mut record);

        assert_eq!(record.language, "rust");
        assert!(record.last_updated.is_none());
    }

    #[test]
    fn patch_overwrites_set_fields() {
        let mut record = DocumentRecord::new("doc1", "doc1.txt");
        let now = Utc::now();

        RecordPatch {
            language: Some("python".to_owned()),
            last_updated: Some(now),
        }
        .apply(&mut record);

        assert_eq!(record.language, "python");
        assert_eq!(record.last_updated, Some(now));
    }

    #[test]
    fn record_deserialization_defaults_missing_fields() {
        let record: DocumentRecord =
            serde_json::from_str(r#"{"id":"doc1","locator":"doc1.txt"}"#).unwrap();
        assert_eq!(record.language, DEFAULT_LANGUAGE);
        assert!(record.last_updated.is_none());
    }
}
