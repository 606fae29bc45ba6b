//! # DocShare Store
//!
//! Store contracts and backends for the DocShare document-sharing service.
//!
//! ## Storage Model
//!
//! A shared document is split across two stores:
//!
//! - **Metadata store**: one keyed record per document, holding the blob
//!   locator plus descriptive fields (`language`, `last_updated`)
//! - **Blob store**: the document's textual content, stored under the
//!   locator named by the metadata record
//!
//! The two stores are deliberately independent. Nothing at this layer keeps
//! them in agreement; sequencing of writes is the responsibility of the core
//! services that drive them.
//!
//! ## Backends
//!
//! - [`FsMetadataStore`] / [`FsBlobStore`] - filesystem-backed, one JSON
//!   record file per document and one content file per locator
//! - [`MemoryMetadataStore`] / [`MemoryBlobStore`] - in-process substitutes
//!   with switchable failure modes, for tests and local experiments

mod fs;
mod memory;
mod record;

pub use fs::{FsBlobStore, FsMetadataStore};
pub use memory::{MemoryBlobStore, MemoryMetadataStore};
pub use record::{DocumentRecord, RecordPatch, DEFAULT_LANGUAGE};

/// Errors that can occur during store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Key contains path separators or other unsafe characters
    #[error("Invalid store key: {0}")]
    InvalidKey(String),

    /// No metadata record exists for the given document id
    #[error("No record for document: {0}")]
    RecordNotFound(String),

    /// A metadata record already exists for the given document id
    #[error("Record already exists for document: {0}")]
    RecordAlreadyExists(String),

    /// No blob is stored under the given locator
    #[error("No blob stored under: {0}")]
    BlobNotFound(String),

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to encode a metadata record
    #[error("Failed to encode record: {0}")]
    Serialization(serde_json::Error),

    /// Failed to decode a metadata record
    #[error("Failed to decode record: {0}")]
    Deserialization(serde_json::Error),

    /// The store is unreachable or refusing operations
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Keyed record table holding one [`DocumentRecord`] per document id.
///
/// Implementations perform blocking I/O; callers decide how invocations are
/// scheduled. No coordination between concurrent calls is provided beyond
/// whatever per-key atomicity the backend itself has.
pub trait MetadataStore: Send + Sync {
    /// Point lookup by document id. Returns `Ok(None)` when no record exists.
    fn get_record(&self, id: &str) -> StoreResult<Option<DocumentRecord>>;

    /// Partial-field patch of an existing record. Fields left unset in the
    /// patch are untouched. Fails with [`StoreError::RecordNotFound`] if no
    /// record exists for `id`.
    fn update_record(&self, id: &str, patch: RecordPatch) -> StoreResult<()>;

    /// Create a new record. Fails with [`StoreError::RecordAlreadyExists`] if
    /// a record with the same id is present.
    ///
    /// Record creation is admin tooling territory; the resolve and
    /// synchronize paths never call this.
    fn insert_record(&self, record: DocumentRecord) -> StoreResult<()>;
}

/// Named object store holding raw document content.
pub trait BlobStore: Send + Sync {
    /// Fetch the blob stored under `name`. Fails with
    /// [`StoreError::BlobNotFound`] if nothing is stored there.
    fn download(&self, name: &str) -> StoreResult<Vec<u8>>;

    /// Store `bytes` under `name`, overwriting any existing blob at that
    /// name. Upsert semantics, last write wins.
    fn upload(&self, name: &str, bytes: &[u8]) -> StoreResult<()>;
}

/// Validate a string used as a record id or blob locator.
///
/// Both backends map keys onto file names, so anything that could escape the
/// store directory is rejected outright.
pub(crate) fn validate_key(key: &str) -> StoreResult<()> {
    if key.is_empty() || key.contains('/') || key.contains('\\') || key.contains("..") {
        return Err(StoreError::InvalidKey(key.to_owned()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_key_accepts_plain_names() {
        assert!(validate_key("doc1").is_ok());
        assert!(validate_key("doc1.txt").is_ok());
        assert!(validate_key("shared document.md").is_ok());
    }

    #[test]
    fn validate_key_rejects_path_escapes() {
        assert!(matches!(validate_key(""), Err(StoreError::InvalidKey(_))));
        assert!(matches!(
            validate_key("../etc/passwd"),
            Err(StoreError::InvalidKey(_))
        ));
        assert!(matches!(
            validate_key("a/b.txt"),
            Err(StoreError::InvalidKey(_))
        ));
        assert!(matches!(
            validate_key("a\\b.txt"),
            Err(StoreError::InvalidKey(_))
        ));
    }
}
