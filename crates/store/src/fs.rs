//! Filesystem-backed store implementations.
//!
//! The metadata store keeps one JSON file per document record directly under
//! its records directory; the blob store keeps one content file per locator
//! under its bucket directory. Neither directory is created until the first
//! write. Keys are validated against path escapes before ever touching the
//! filesystem.

use crate::record::{DocumentRecord, RecordPatch};
use crate::{validate_key, BlobStore, MetadataStore, StoreError, StoreResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Metadata store backed by one JSON record file per document.
///
/// Records live at `<records_dir>/<id>.json`. Updates are read-modify-write
/// on the whole file; the per-file write is the only atomicity unit, matching
/// the single-row-keyed semantics expected of the record table.
#[derive(Debug)]
pub struct FsMetadataStore {
    records_dir: PathBuf,
}

impl FsMetadataStore {
    /// Creates a store rooted at `records_dir`. The directory is created
    /// lazily on the first insert, so construction never touches the disk.
    pub fn new(records_dir: impl Into<PathBuf>) -> Self {
        Self {
            records_dir: records_dir.into(),
        }
    }

    pub fn records_dir(&self) -> &Path {
        &self.records_dir
    }

    fn record_path(&self, id: &str) -> StoreResult<PathBuf> {
        validate_key(id)?;
        Ok(self.records_dir.join(format!("{id}.json")))
    }

    fn read_record(&self, path: &Path) -> StoreResult<DocumentRecord> {
        let contents = fs::read_to_string(path)?;
        serde_json::from_str(&contents).map_err(StoreError::Deserialization)
    }

    fn write_record(&self, path: &Path, record: &DocumentRecord) -> StoreResult<()> {
        let contents =
            serde_json::to_string_pretty(record).map_err(StoreError::Serialization)?;
        fs::create_dir_all(&self.records_dir)?;
        fs::write(path, contents)?;
        Ok(())
    }
}

impl MetadataStore for FsMetadataStore {
    fn get_record(&self, id: &str) -> StoreResult<Option<DocumentRecord>> {
        let path = self.record_path(id)?;
        if !path.is_file() {
            return Ok(None);
        }
        self.read_record(&path).map(Some)
    }

    fn update_record(&self, id: &str, patch: RecordPatch) -> StoreResult<()> {
        let path = self.record_path(id)?;
        if !path.is_file() {
            return Err(StoreError::RecordNotFound(id.to_owned()));
        }
        let mut record = self.read_record(&path)?;
        patch.apply(&mut record);
        self.write_record(&path, &record)
    }

    fn insert_record(&self, record: DocumentRecord) -> StoreResult<()> {
        let path = self.record_path(&record.id)?;
        if path.exists() {
            return Err(StoreError::RecordAlreadyExists(record.id.clone()));
        }
        self.write_record(&path, &record)
    }
}

/// Blob store backed by one content file per locator.
///
/// `upload` overwrites unconditionally; there is no conflict detection and
/// no tombstone handling. The bucket directory is created on first upload.
#[derive(Debug)]
pub struct FsBlobStore {
    bucket_dir: PathBuf,
}

impl FsBlobStore {
    pub fn new(bucket_dir: impl Into<PathBuf>) -> Self {
        Self {
            bucket_dir: bucket_dir.into(),
        }
    }

    pub fn bucket_dir(&self) -> &Path {
        &self.bucket_dir
    }

    fn blob_path(&self, name: &str) -> StoreResult<PathBuf> {
        validate_key(name)?;
        Ok(self.bucket_dir.join(name))
    }
}

impl BlobStore for FsBlobStore {
    fn download(&self, name: &str) -> StoreResult<Vec<u8>> {
        let path = self.blob_path(name)?;
        if !path.is_file() {
            return Err(StoreError::BlobNotFound(name.to_owned()));
        }
        Ok(fs::read(path)?)
    }

    fn upload(&self, name: &str, bytes: &[u8]) -> StoreResult<()> {
        let path = self.blob_path(name)?;
        fs::create_dir_all(&self.bucket_dir)?;
        fs::write(path, bytes)?;
        Ok(())
    }
}
