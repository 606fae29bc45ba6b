//! Main entry point for the DocShare server.
//!
//! Resolves configuration from the environment, wires the filesystem stores
//! into the core services, and serves the REST API.

use docshare_api::AppState;
use docshare_core::constants::DEFAULT_DATA_DIR;
use docshare_core::CoreConfig;
use docshare_store::{BlobStore, FsBlobStore, FsMetadataStore, MetadataStore};
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Starts the REST server on the configured address (default: 0.0.0.0:3000).
///
/// # Environment Variables
/// - `DOCSHARE_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `DOCSHARE_DATA_DIR`: Directory for record and blob storage (default: "/document_data")
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the data directory does not exist,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("docshare=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("DOCSHARE_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let data_dir =
        std::env::var("DOCSHARE_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.into());

    let data_path = Path::new(&data_dir);
    if !data_path.exists() {
        anyhow::bail!("Document data directory does not exist: {}", data_path.display());
    }
    let cfg = CoreConfig::new(data_path.to_path_buf())?;

    let metadata: Arc<dyn MetadataStore> = Arc::new(FsMetadataStore::new(cfg.records_dir()));
    let blobs: Arc<dyn BlobStore> = Arc::new(FsBlobStore::new(cfg.bucket_dir()));

    tracing::info!("++ Starting DocShare REST on {}", addr);
    tracing::info!("++ Document data directory: {}", cfg.data_dir().display());

    let app = docshare_api::router(AppState::new(metadata, blobs));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
