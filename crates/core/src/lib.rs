//! # DocShare Core
//!
//! Core business logic for the DocShare document-sharing service.
//!
//! This crate contains the two-phase read and write workflows that keep a
//! metadata record consistent with the blob it references:
//! - [`Resolver`] translates a document id into its stored textual content
//! - [`Synchronizer`] persists new content for a document id, then patches
//!   the record's descriptive fields
//!
//! Both services drive the two stores independently through the contracts in
//! `docshare-store`; they never talk to each other. Store implementations are
//! injected at construction, so the core runs unchanged against filesystem
//! backends or in-memory substitutes.
//!
//! **No API concerns**: HTTP framing, CORS, and status-code mapping belong in
//! `docshare-api`.

pub mod config;
pub mod constants;
pub mod resolver;
pub mod synchronizer;

pub use config::{ConfigError, CoreConfig};
pub use resolver::Resolver;
pub use synchronizer::{SyncOutcome, Synchronizer};

/// Errors surfaced by the resolve and synchronize workflows.
///
/// Every failure is terminal for the current invocation. There is no internal
/// retry and no fallback path; the underlying store detail rides along so the
/// transport layer can render it.
#[derive(Debug, thiserror::Error)]
pub enum ShareError {
    /// Required input missing or empty; caller error, not retried
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// No metadata record, or the record has no usable locator. The two are
    /// deliberately indistinguishable to the caller.
    #[error("document not found{}", detail_suffix(.detail))]
    NotFound {
        /// Underlying store detail, when the lookup itself failed
        detail: Option<String>,
    },

    /// Blob download failed or the content could not be decoded
    #[error("failed to fetch content: {detail}")]
    StoreUnavailable { detail: String },

    /// Blob upload failed; the metadata record was not touched
    #[error("failed to store content: {detail}")]
    WriteFailure { detail: String },
}

pub type ShareResult<T> = std::result::Result<T, ShareError>;

fn detail_suffix(detail: &Option<String>) -> String {
    match detail {
        Some(detail) => format!(": {detail}"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display_carries_store_detail() {
        let err = ShareError::NotFound {
            detail: Some("Store unavailable: record table offline".to_owned()),
        };
        assert_eq!(
            err.to_string(),
            "document not found: Store unavailable: record table offline"
        );
    }

    #[test]
    fn not_found_display_without_detail_is_plain() {
        let err = ShareError::NotFound { detail: None };
        assert_eq!(err.to_string(), "document not found");
    }
}
