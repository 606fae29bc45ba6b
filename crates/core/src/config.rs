//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process
//! startup and then passed into store construction. The intent is to avoid
//! reading process-wide environment variables during request handling, which
//! can lead to inconsistent behaviour in multi-threaded runtimes and test
//! harnesses.

use crate::constants::{BUCKET_DIR_NAME, RECORDS_DIR_NAME};
use std::path::{Path, PathBuf};

/// Errors that can occur while resolving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configured data directory does not exist or is not a directory
    #[error("Document data directory does not exist: {0}")]
    MissingDataDir(String),
}

/// Core configuration resolved at startup.
///
/// Holds the data directory that both filesystem stores live under. The
/// subdirectories themselves are created lazily by the stores on first write.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    data_dir: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`. The data directory must already exist;
    /// provisioning it is an operational step, not something the service does
    /// on its own.
    pub fn new(data_dir: PathBuf) -> Result<Self, ConfigError> {
        if !data_dir.is_dir() {
            return Err(ConfigError::MissingDataDir(
                data_dir.display().to_string(),
            ));
        }
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Directory the metadata record files live in.
    pub fn records_dir(&self) -> PathBuf {
        self.data_dir.join(RECORDS_DIR_NAME)
    }

    /// Directory acting as the content bucket.
    pub fn bucket_dir(&self) -> PathBuf {
        self.data_dir.join(BUCKET_DIR_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn rejects_missing_data_dir() {
        let result = CoreConfig::new(PathBuf::from("/no/such/docshare/dir"));
        assert!(matches!(result, Err(ConfigError::MissingDataDir(_))));
    }

    #[test]
    fn derives_store_directories_from_data_dir() {
        let temp = TempDir::new().unwrap();
        let cfg = CoreConfig::new(temp.path().to_path_buf()).unwrap();

        assert_eq!(cfg.records_dir(), temp.path().join("records"));
        assert_eq!(cfg.bucket_dir(), temp.path().join("documents"));
    }
}
