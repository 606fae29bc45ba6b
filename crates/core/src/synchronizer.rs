//! Write path: persist new content for a document id, then bring the
//! metadata record's descriptive fields up to date.

use crate::{ShareError, ShareResult};
use chrono::Utc;
use docshare_store::{BlobStore, MetadataStore, RecordPatch, DEFAULT_LANGUAGE};
use docshare_types::NonEmptyText;
use std::sync::Arc;

/// Outcome of a synchronization.
///
/// Partial success is a first-class variant, not an error: once the blob
/// write has landed, a failed metadata patch must still tell the caller that
/// the content itself was saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Blob written and metadata patched
    Completed { locator: String },

    /// Blob written, but the metadata patch failed; `language` and
    /// `last_updated` on the record are stale
    MetadataStale { locator: String, detail: String },
}

impl SyncOutcome {
    /// The locator the content was stored under.
    pub fn locator(&self) -> &str {
        match self {
            SyncOutcome::Completed { locator } => locator,
            SyncOutcome::MetadataStale { locator, .. } => locator,
        }
    }
}

/// Persists new content for a document and updates its descriptive metadata.
///
/// The blob is always written before the metadata patch, so a concurrent
/// reader observing stale metadata still finds a valid blob (old or new)
/// under the locator. The reverse failure mode stays possible: blob updated,
/// metadata stale. That trade is deliberate; content availability matters
/// more than freshness metadata, and there is no compensating transaction.
pub struct Synchronizer {
    metadata: Arc<dyn MetadataStore>,
    blobs: Arc<dyn BlobStore>,
}

impl Synchronizer {
    pub fn new(metadata: Arc<dyn MetadataStore>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { metadata, blobs }
    }

    /// Store `content` under the locator of the record for `id`, then patch
    /// the record's `language` and `last_updated` fields.
    ///
    /// `language` defaults to `"plaintext"` when absent or empty. Empty
    /// `content` is rejected, never treated as a delete. Calling twice with
    /// identical arguments leaves the stores in the same state as calling
    /// once; retries after a failure are the caller's responsibility.
    ///
    /// # Errors
    /// - [`ShareError::InvalidRequest`] if `id` or `content` is empty
    /// - [`ShareError::NotFound`] if no record exists or its locator is
    ///   blank; synchronization never creates records
    /// - [`ShareError::WriteFailure`] if the blob upload fails. The metadata
    ///   patch is not attempted in that case.
    ///
    /// A metadata patch failure after a successful upload is reported as
    /// `Ok(`[`SyncOutcome::MetadataStale`]`)`, not as an error.
    pub fn synchronize(
        &self,
        id: &str,
        content: &str,
        language: Option<&str>,
    ) -> ShareResult<SyncOutcome> {
        if id.is_empty() || content.is_empty() {
            return Err(ShareError::InvalidRequest(
                "document id and content are required".to_owned(),
            ));
        }

        // Step 1: resolve the locator. Same not-found folding as the read
        // path: a lookup failure, a missing record, and a blank locator are
        // indistinguishable to the caller.
        let record = match self.metadata.get_record(id) {
            Ok(Some(record)) => record,
            Ok(None) => return Err(ShareError::NotFound { detail: None }),
            Err(e) => {
                return Err(ShareError::NotFound {
                    detail: Some(e.to_string()),
                })
            }
        };
        let locator = NonEmptyText::new(&record.locator)
            .map_err(|_| ShareError::NotFound { detail: None })?;

        // Step 2: upsert the blob. On failure the record is left untouched.
        self.blobs
            .upload(locator.as_str(), content.as_bytes())
            .map_err(|e| ShareError::WriteFailure {
                detail: e.to_string(),
            })?;

        // Step 3: bring the descriptive fields up to date. No rollback of
        // the blob write if this fails.
        let language = match language {
            Some(tag) if !tag.is_empty() => tag,
            _ => DEFAULT_LANGUAGE,
        };
        let patch = RecordPatch {
            language: Some(language.to_owned()),
            last_updated: Some(Utc::now()),
        };

        match self.metadata.update_record(id, patch) {
            Ok(()) => Ok(SyncOutcome::Completed {
                locator: locator.as_str().to_owned(),
            }),
            Err(e) => {
                tracing::warn!(
                    document_id = id,
                    error = %e,
                    "content stored but metadata update failed"
                );
                Ok(SyncOutcome::MetadataStale {
                    locator: locator.as_str().to_owned(),
                    detail: e.to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docshare_store::{DocumentRecord, MemoryBlobStore, MemoryMetadataStore};

    fn stores() -> (Arc<MemoryMetadataStore>, Arc<MemoryBlobStore>) {
        (
            Arc::new(MemoryMetadataStore::new()),
            Arc::new(MemoryBlobStore::new()),
        )
    }

    fn seeded_stores() -> (Arc<MemoryMetadataStore>, Arc<MemoryBlobStore>) {
        let (metadata, blobs) = stores();
        metadata
            .insert_record(DocumentRecord::new("doc1", "doc1.txt"))
            .unwrap();
        (metadata, blobs)
    }

    #[test]
    fn writes_blob_and_patches_metadata() {
        let (metadata, blobs) = seeded_stores();
        let sync = Synchronizer::new(metadata.clone(), blobs.clone());

        let outcome = sync.synchronize("doc1", "print(1)", Some("python")).unwrap();

        assert_eq!(
            outcome,
            SyncOutcome::Completed {
                locator: "doc1.txt".to_owned()
            }
        );
        assert_eq!(blobs.download("doc1.txt").unwrap(), b"print(1)");

        let record = metadata.get_record("doc1").unwrap().unwrap();
        assert_eq!(record.language, "python");
        assert!(record.last_updated.is_some());
    }

    #[test]
    fn language_defaults_to_plaintext() {
        let (metadata, blobs) = seeded_stores();
        let sync = Synchronizer::new(metadata.clone(), blobs);

        sync.synchronize("doc1", "hello", None).unwrap();
        let record = metadata.get_record("doc1").unwrap().unwrap();
        assert_eq!(record.language, "plaintext");

        // An empty tag counts as absent.
        sync.synchronize("doc1", "hello", Some("")).unwrap();
        let record = metadata.get_record("doc1").unwrap().unwrap();
        assert_eq!(record.language, "plaintext");
    }

    #[test]
    fn empty_content_is_rejected_without_store_mutation() {
        let (metadata, blobs) = seeded_stores();
        let sync = Synchronizer::new(metadata.clone(), blobs.clone());

        let result = sync.synchronize("doc1", "", Some("python"));
        assert!(matches!(result, Err(ShareError::InvalidRequest(_))));

        // Nothing was written on either side.
        assert!(blobs.download("doc1.txt").is_err());
        let record = metadata.get_record("doc1").unwrap().unwrap();
        assert_eq!(record.language, "plaintext");
        assert!(record.last_updated.is_none());
    }

    #[test]
    fn empty_id_is_rejected() {
        let (metadata, blobs) = stores();
        let sync = Synchronizer::new(metadata, blobs);

        assert!(matches!(
            sync.synchronize("", "content", None),
            Err(ShareError::InvalidRequest(_))
        ));
    }

    #[test]
    fn unknown_document_is_not_found_and_never_created() {
        let (metadata, blobs) = stores();
        let sync = Synchronizer::new(metadata.clone(), blobs);

        let result = sync.synchronize("missing-id", "content", None);
        assert!(matches!(result, Err(ShareError::NotFound { .. })));
        assert!(metadata.get_record("missing-id").unwrap().is_none());
    }

    #[test]
    fn blank_locator_is_not_found() {
        let (metadata, blobs) = stores();
        metadata
            .insert_record(DocumentRecord::new("doc1", " "))
            .unwrap();
        let sync = Synchronizer::new(metadata, blobs);

        assert!(matches!(
            sync.synchronize("doc1", "content", None),
            Err(ShareError::NotFound { .. })
        ));
    }

    #[test]
    fn upload_failure_short_circuits_metadata_patch() {
        let (metadata, blobs) = seeded_stores();
        blobs.set_fail_uploads(true);
        let sync = Synchronizer::new(metadata.clone(), blobs);

        let result = sync.synchronize("doc1", "content", Some("python"));
        assert!(matches!(result, Err(ShareError::WriteFailure { .. })));

        let record = metadata.get_record("doc1").unwrap().unwrap();
        assert_eq!(record.language, "plaintext");
        assert!(record.last_updated.is_none());
    }

    #[test]
    fn metadata_failure_is_partial_success_with_new_content_readable() {
        let (metadata, blobs) = seeded_stores();
        metadata.set_fail_updates(true);
        let sync = Synchronizer::new(metadata.clone(), blobs.clone());

        let outcome = sync.synchronize("doc1", "new content", Some("python")).unwrap();
        match outcome {
            SyncOutcome::MetadataStale { locator, detail } => {
                assert_eq!(locator, "doc1.txt");
                assert!(!detail.is_empty());
            }
            other => panic!("expected MetadataStale, got {other:?}"),
        }

        // The new blob is in place while the descriptive fields kept their
        // pre-call values.
        assert_eq!(blobs.download("doc1.txt").unwrap(), b"new content");
        let record = metadata.get_record("doc1").unwrap().unwrap();
        assert_eq!(record.language, "plaintext");
        assert!(record.last_updated.is_none());
    }

    #[test]
    fn synchronize_is_idempotent() {
        let (metadata, blobs) = seeded_stores();
        let sync = Synchronizer::new(metadata.clone(), blobs.clone());

        let first = sync.synchronize("doc1", "print(1)", Some("python")).unwrap();
        let second = sync.synchronize("doc1", "print(1)", Some("python")).unwrap();

        assert_eq!(first.locator(), second.locator());
        assert_eq!(blobs.download("doc1.txt").unwrap(), b"print(1)");
        let record = metadata.get_record("doc1").unwrap().unwrap();
        assert_eq!(record.language, "python");
    }

    #[test]
    fn round_trips_through_resolver() {
        let (metadata, blobs) = seeded_stores();
        let sync = Synchronizer::new(metadata.clone(), blobs.clone());
        let resolver = crate::Resolver::new(metadata, blobs);

        sync.synchronize("doc1", "fn main() {}", Some("rust")).unwrap();

        assert_eq!(resolver.resolve("doc1").unwrap(), "fn main() {}");
    }
}
