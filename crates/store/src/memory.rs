//! In-memory store substitutes.
//!
//! These back the core's tests and local experiments with the same contracts
//! as the filesystem stores, plus switchable failure modes so the
//! partial-failure paths of the synchronizer can be exercised without a
//! misbehaving real backend.

use crate::record::{DocumentRecord, RecordPatch};
use crate::{validate_key, BlobStore, MetadataStore, StoreError, StoreResult};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// In-memory metadata store over a keyed map of records.
#[derive(Debug, Default)]
pub struct MemoryMetadataStore {
    records: Mutex<HashMap<String, DocumentRecord>>,
    fail_updates: AtomicBool,
}

impl MemoryMetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, `update_record` fails with [`StoreError::Unavailable`]
    /// while lookups keep working. Models a record table that accepts reads
    /// but refuses writes.
    pub fn set_fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }

    fn lock(&self) -> StoreResult<std::sync::MutexGuard<'_, HashMap<String, DocumentRecord>>> {
        self.records
            .lock()
            .map_err(|_| StoreError::Unavailable("metadata store lock poisoned".to_owned()))
    }
}

impl MetadataStore for MemoryMetadataStore {
    fn get_record(&self, id: &str) -> StoreResult<Option<DocumentRecord>> {
        validate_key(id)?;
        Ok(self.lock()?.get(id).cloned())
    }

    fn update_record(&self, id: &str, patch: RecordPatch) -> StoreResult<()> {
        validate_key(id)?;
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "metadata store is refusing writes".to_owned(),
            ));
        }
        let mut records = self.lock()?;
        let record = records
            .get_mut(id)
            .ok_or_else(|| StoreError::RecordNotFound(id.to_owned()))?;
        patch.apply(record);
        Ok(())
    }

    fn insert_record(&self, record: DocumentRecord) -> StoreResult<()> {
        validate_key(&record.id)?;
        let mut records = self.lock()?;
        if records.contains_key(&record.id) {
            return Err(StoreError::RecordAlreadyExists(record.id));
        }
        records.insert(record.id.clone(), record);
        Ok(())
    }
}

/// In-memory blob store over a keyed map of byte buffers.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
    fail_uploads: AtomicBool,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, `upload` fails with [`StoreError::Unavailable`] while
    /// downloads keep working.
    pub fn set_fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::SeqCst);
    }

    fn lock(&self) -> StoreResult<std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>>> {
        self.blobs
            .lock()
            .map_err(|_| StoreError::Unavailable("blob store lock poisoned".to_owned()))
    }
}

impl BlobStore for MemoryBlobStore {
    fn download(&self, name: &str) -> StoreResult<Vec<u8>> {
        validate_key(name)?;
        self.lock()?
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::BlobNotFound(name.to_owned()))
    }

    fn upload(&self, name: &str, bytes: &[u8]) -> StoreResult<()> {
        validate_key(name)?;
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "blob store is refusing writes".to_owned(),
            ));
        }
        self.lock()?.insert(name.to_owned(), bytes.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_round_trip() {
        let store = MemoryMetadataStore::new();
        store
            .insert_record(DocumentRecord::new("doc1", "doc1.txt"))
            .unwrap();

        let record = store.get_record("doc1").unwrap().unwrap();
        assert_eq!(record.locator, "doc1.txt");
        assert!(store.get_record("other").unwrap().is_none());
    }

    #[test]
    fn failing_updates_leave_reads_working() {
        let store = MemoryMetadataStore::new();
        store
            .insert_record(DocumentRecord::new("doc1", "doc1.txt"))
            .unwrap();
        store.set_fail_updates(true);

        let result = store.update_record(
            "doc1",
            RecordPatch {
                language: Some("python".to_owned()),
                last_updated: None,
            },
        );
        assert!(matches!(result, Err(StoreError::Unavailable(_))));

        let record = store.get_record("doc1").unwrap().unwrap();
        assert_eq!(record.language, "plaintext");
    }

    #[test]
    fn blob_upsert_overwrites() {
        let store = MemoryBlobStore::new();
        store.upload("doc1.txt", b"first").unwrap();
        store.upload("doc1.txt", b"second").unwrap();

        assert_eq!(store.download("doc1.txt").unwrap(), b"second");
    }

    #[test]
    fn failing_uploads_leave_existing_blob_intact() {
        let store = MemoryBlobStore::new();
        store.upload("doc1.txt", b"original").unwrap();
        store.set_fail_uploads(true);

        let result = store.upload("doc1.txt", b"replacement");
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
        assert_eq!(store.download("doc1.txt").unwrap(), b"original");
    }
}
