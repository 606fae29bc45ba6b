//! Storage layout names shared by the runner and the CLI.

/// Directory under the data dir holding one JSON file per metadata record.
pub const RECORDS_DIR_NAME: &str = "records";

/// Directory under the data dir acting as the content bucket.
pub const BUCKET_DIR_NAME: &str = "documents";

/// Default data directory when `DOCSHARE_DATA_DIR` is not set.
pub const DEFAULT_DATA_DIR: &str = "/document_data";
