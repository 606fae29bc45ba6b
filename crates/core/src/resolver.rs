//! Read path: document id to stored textual content.

use crate::{ShareError, ShareResult};
use docshare_store::{BlobStore, MetadataStore};
use docshare_types::NonEmptyText;
use std::sync::Arc;

/// Resolves a document id to the text currently stored under its locator.
///
/// Resolution is read-only and idempotent: it performs one metadata lookup
/// followed by one blob download, with no side effects on either store. Safe
/// to call concurrently and to retry freely.
pub struct Resolver {
    metadata: Arc<dyn MetadataStore>,
    blobs: Arc<dyn BlobStore>,
}

impl Resolver {
    pub fn new(metadata: Arc<dyn MetadataStore>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { metadata, blobs }
    }

    /// Translate `id` into its current textual content.
    ///
    /// # Errors
    /// - [`ShareError::InvalidRequest`] if `id` is empty
    /// - [`ShareError::NotFound`] if no record exists, the lookup itself
    ///   fails, or the record's locator is empty after trimming
    /// - [`ShareError::StoreUnavailable`] if the blob download fails, nothing
    ///   is stored under the locator, or the content is not valid UTF-8
    pub fn resolve(&self, id: &str) -> ShareResult<String> {
        if id.is_empty() {
            return Err(ShareError::InvalidRequest(
                "document id is required".to_owned(),
            ));
        }

        let record = match self.metadata.get_record(id) {
            Ok(Some(record)) => record,
            Ok(None) => return Err(ShareError::NotFound { detail: None }),
            Err(e) => {
                return Err(ShareError::NotFound {
                    detail: Some(e.to_string()),
                })
            }
        };

        // A record with a blank locator is as good as no record.
        let locator = NonEmptyText::new(&record.locator)
            .map_err(|_| ShareError::NotFound { detail: None })?;

        let bytes = self
            .blobs
            .download(locator.as_str())
            .map_err(|e| ShareError::StoreUnavailable {
                detail: e.to_string(),
            })?;

        String::from_utf8(bytes).map_err(|e| ShareError::StoreUnavailable {
            detail: format!("stored content is not valid UTF-8: {e}"),
        })
    }
}
