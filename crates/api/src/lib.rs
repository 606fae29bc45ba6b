//! # DocShare REST API
//!
//! REST surface for the DocShare document-sharing service.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, status-code mapping)
//!
//! The core services are injected through [`AppState`]; this crate contains
//! no storage logic of its own.

#![warn(rust_2018_idioms)]

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use docshare_core::{Resolver, ShareError, SyncOutcome, Synchronizer};
use docshare_store::{BlobStore, MetadataStore};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared across REST API handlers
///
/// Holds the resolver and synchronizer driving the two stores. Constructed
/// once at startup with whatever store implementations the process chose.
#[derive(Clone)]
pub struct AppState {
    resolver: Arc<Resolver>,
    synchronizer: Arc<Synchronizer>,
}

impl AppState {
    pub fn new(metadata: Arc<dyn MetadataStore>, blobs: Arc<dyn BlobStore>) -> Self {
        Self {
            resolver: Arc::new(Resolver::new(metadata.clone(), blobs.clone())),
            synchronizer: Arc::new(Synchronizer::new(metadata, blobs)),
        }
    }
}

/// Health check response
#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Resolve request: document id to look up
#[derive(Debug, serde::Deserialize, utoipa::ToSchema)]
pub struct ResolveReq {
    #[serde(default)]
    pub id: String,
}

/// Resolve response: the document's stored textual content, verbatim
#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct ResolveRes {
    pub content: String,
}

/// Resolve error body
#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct ResolveErr {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Synchronize request: document id plus replacement content
#[derive(Debug, serde::Deserialize, utoipa::ToSchema)]
pub struct SynchronizeReq {
    #[serde(default)]
    pub id: String,
    #[serde(default, rename = "fileContent")]
    pub file_content: String,
    #[serde(default)]
    pub language: Option<String>,
}

/// Synchronize response: confirmation plus the locator the content went to
#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct SynchronizeRes {
    pub message: String,
    pub file: String,
}

/// Synchronize error body
#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct SynchronizeErr {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(health, resolve, synchronize),
    components(schemas(
        HealthRes,
        ResolveReq,
        ResolveRes,
        ResolveErr,
        SynchronizeReq,
        SynchronizeRes,
        SynchronizeErr,
    ))
)]
struct ApiDoc;

/// Build the REST router with all routes, Swagger UI, and CORS applied.
///
/// CORS is wide open; the service predates any notion of restricted origins
/// and the upstream clients are browser editors on arbitrary hosts.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/resolve", post(resolve))
        .route("/synchronize", post(synchronize))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used for monitoring and load balancer health checks.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "DocShare REST API is alive".into(),
    })
}

#[utoipa::path(
    post,
    path = "/resolve",
    request_body = ResolveReq,
    responses(
        (status = 200, description = "Document content", body = ResolveRes),
        (status = 400, description = "Missing document id", body = ResolveErr),
        (status = 404, description = "Document not found", body = ResolveErr),
        (status = 500, description = "Content could not be fetched", body = ResolveErr)
    )
)]
/// Resolve a document id to its stored content
///
/// Looks up the metadata record for the id, then downloads the blob named by
/// the record's locator and returns it as text.
///
/// # Errors
/// - `400` if `id` is missing or empty
/// - `404` if no record exists or the record has no usable locator
/// - `500` if the blob download fails or the content is not valid UTF-8
#[axum::debug_handler]
async fn resolve(
    State(state): State<AppState>,
    Json(req): Json<ResolveReq>,
) -> Result<Json<ResolveRes>, (StatusCode, Json<ResolveErr>)> {
    match state.resolver.resolve(&req.id) {
        Ok(content) => Ok(Json(ResolveRes { content })),
        Err(e) => Err(resolve_error(e)),
    }
}

fn resolve_error(err: ShareError) -> (StatusCode, Json<ResolveErr>) {
    match err {
        ShareError::InvalidRequest(_) => (
            StatusCode::BAD_REQUEST,
            Json(ResolveErr {
                error: "Missing 'id' in request body".into(),
                detail: None,
            }),
        ),
        ShareError::NotFound { detail } => (
            StatusCode::NOT_FOUND,
            Json(ResolveErr {
                error: "Document not found".into(),
                detail,
            }),
        ),
        ShareError::StoreUnavailable { detail } | ShareError::WriteFailure { detail } => {
            tracing::error!("Resolve error: {detail}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ResolveErr {
                    error: "Failed to download file".into(),
                    detail: Some(detail),
                }),
            )
        }
    }
}

#[utoipa::path(
    post,
    path = "/synchronize",
    request_body = SynchronizeReq,
    responses(
        (status = 200, description = "Document updated", body = SynchronizeRes),
        (status = 400, description = "Missing id or content", body = SynchronizeErr),
        (status = 404, description = "Document not found", body = SynchronizeErr),
        (status = 500, description = "Upload or metadata update failed", body = SynchronizeErr)
    )
)]
/// Push new content for a document id
///
/// Uploads the content under the record's locator, then patches the record's
/// `language` and `last_updated` fields. A metadata failure after a
/// successful upload is answered with `500` and a message stating that the
/// file itself was updated - distinct from a failed upload.
///
/// # Errors
/// - `400` if `id` or `fileContent` is missing or empty
/// - `404` if no record exists or the record has no usable locator
/// - `500` if the blob upload or the metadata update fails
#[axum::debug_handler]
async fn synchronize(
    State(state): State<AppState>,
    Json(req): Json<SynchronizeReq>,
) -> Result<Json<SynchronizeRes>, (StatusCode, Json<SynchronizeErr>)> {
    let outcome =
        state
            .synchronizer
            .synchronize(&req.id, &req.file_content, req.language.as_deref());

    match outcome {
        Ok(SyncOutcome::Completed { locator }) => Ok(Json(SynchronizeRes {
            message: "Document updated successfully".into(),
            file: locator,
        })),
        Ok(SyncOutcome::MetadataStale { detail, .. }) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(SynchronizeErr {
                message: "Updated file, but failed to update metadata".into(),
                error: Some(detail),
            }),
        )),
        Err(e) => Err(synchronize_error(e)),
    }
}

fn synchronize_error(err: ShareError) -> (StatusCode, Json<SynchronizeErr>) {
    match err {
        ShareError::InvalidRequest(_) => (
            StatusCode::BAD_REQUEST,
            Json(SynchronizeErr {
                message: "Document ID and fileContent are required".into(),
                error: None,
            }),
        ),
        ShareError::NotFound { detail } => (
            StatusCode::NOT_FOUND,
            Json(SynchronizeErr {
                message: "Document not found".into(),
                error: detail,
            }),
        ),
        ShareError::WriteFailure { detail } | ShareError::StoreUnavailable { detail } => {
            tracing::error!("Synchronize error: {detail}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SynchronizeErr {
                    message: "Failed to upload file".into(),
                    error: Some(detail),
                }),
            )
        }
    }
}
