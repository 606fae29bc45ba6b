//! Admin and operations CLI for DocShare.
//!
//! Works directly against the filesystem stores under the configured data
//! directory, bypassing the REST surface. Record registration lives here:
//! the resolve and synchronize workflows only ever target documents that an
//! operator (or an upstream system) has already registered.

use clap::{Parser, Subcommand};
use docshare_core::constants::DEFAULT_DATA_DIR;
use docshare_core::{CoreConfig, Resolver, SyncOutcome, Synchronizer};
use docshare_store::{
    BlobStore, DocumentRecord, FsBlobStore, FsMetadataStore, MetadataStore,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "docshare")]
#[command(about = "DocShare document-sharing service CLI")]
struct Cli {
    /// Data directory holding the record and bucket stores
    /// (default: $DOCSHARE_DATA_DIR, then /document_data)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a document id against a blob locator
    Register {
        /// Document identifier
        id: String,
        /// Blob name the document's content will live under
        locator: String,
    },
    /// Print a document's stored content
    Resolve {
        /// Document identifier
        id: String,
    },
    /// Push new content for a document from a local file
    Sync {
        /// Document identifier
        id: String,
        /// File whose contents replace the stored blob
        #[arg(long)]
        file: PathBuf,
        /// Language tag for the metadata record (default: plaintext)
        #[arg(long)]
        language: Option<String>,
    },
    /// Dump a document's metadata record as JSON
    Show {
        /// Document identifier
        id: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let data_dir = cli.data_dir.unwrap_or_else(|| {
        PathBuf::from(
            std::env::var("DOCSHARE_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.into()),
        )
    });
    // Unlike the server, the CLI provisions the data dir so that `register`
    // works on a fresh machine.
    std::fs::create_dir_all(&data_dir)?;
    let cfg = CoreConfig::new(data_dir)?;

    let metadata: Arc<dyn MetadataStore> = Arc::new(FsMetadataStore::new(cfg.records_dir()));
    let blobs: Arc<dyn BlobStore> = Arc::new(FsBlobStore::new(cfg.bucket_dir()));

    match cli.command {
        Commands::Register { id, locator } => {
            metadata.insert_record(DocumentRecord::new(&id, &locator))?;
            println!("Registered {id} -> {locator}");
        }
        Commands::Resolve { id } => {
            let content = Resolver::new(metadata, blobs).resolve(&id)?;
            print!("{content}");
        }
        Commands::Sync { id, file, language } => {
            let content = std::fs::read_to_string(&file)?;
            let outcome = Synchronizer::new(metadata, blobs).synchronize(
                &id,
                &content,
                language.as_deref(),
            )?;
            match outcome {
                SyncOutcome::Completed { locator } => {
                    println!("Synchronized {id} -> {locator}");
                }
                SyncOutcome::MetadataStale { locator, detail } => {
                    println!("Synchronized {id} -> {locator}");
                    eprintln!("Warning: metadata update failed, record is stale: {detail}");
                }
            }
        }
        Commands::Show { id } => {
            match metadata.get_record(&id)? {
                Some(record) => println!("{}", serde_json::to_string_pretty(&record)?),
                None => anyhow::bail!("No record for document: {id}"),
            }
        }
    }

    Ok(())
}
