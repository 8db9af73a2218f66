//! Upload API
//!
//! - `POST /api/upload-rag` - ingest a multipart batch of `files` parts
//! - `GET /api/upload-rag` - list stored documents (no content)
//! - `PUT /api/upload-rag` - fetch one document's full content by `fileId`

use axum::{
    extract::{
        multipart::MultipartRejection, rejection::JsonRejection, DefaultBodyLimit, Multipart,
        State,
    },
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{info, warn};

use crate::ingest::{BatchItem, UploadedFile};
use crate::models::{AppState, IngestResponse, ListResponse, RetrieveRequest, RetrieveResponse};
use crate::types::{AppError, AppResult};

const FILES_FIELD: &str = "files";

pub fn router(state: AppState) -> Router {
    let body_limit = state.config.upload.max_body_bytes;

    Router::new()
        .route(
            "/api/upload-rag",
            post(upload_files).get(list_files).put(retrieve_file),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

async fn upload_files(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<IngestResponse>> {
    let mut multipart = multipart.map_err(|e| {
        warn!(error = %e, "Rejected upload without a multipart body");
        AppError::MalformedRequest("Expected a multipart/form-data body".to_string())
    })?;

    let batch = read_batch(&mut multipart, state.config.upload.max_body_bytes).await?;
    info!(files = batch.len(), "File upload request received");

    let response = state.ingest.ingest(batch).await?;
    Ok(Json(response))
}

/// Collect every `files` part. Other fields are ignored.
///
/// Going over the body limit rejects the whole request, whichever part the
/// limit was hit in.
async fn read_batch(multipart: &mut Multipart, limit: usize) -> AppResult<Vec<BatchItem>> {
    let mut batch = Vec::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                warn!(error = %e, limit, "Upload exceeds body limit");
                return Err(AppError::PayloadTooLarge { limit });
            }
            Err(e) if batch.is_empty() => {
                warn!(error = %e, "Malformed multipart body");
                return Err(AppError::MalformedRequest(
                    "Malformed multipart body".to_string(),
                ));
            }
            Err(e) => {
                // The stream cannot be resumed past a broken part
                warn!(error = %e, parsed = batch.len(), "Multipart body ended abruptly");
                break;
            }
        };

        if field.name() != Some(FILES_FIELD) {
            continue;
        }

        // A part without a filename is a plain form value, not an upload
        let Some(name) = field.file_name().map(str::to_string) else {
            batch.push(BatchItem::Unreadable {
                name: String::new(),
                reason: "part has no filename".to_string(),
            });
            continue;
        };
        let media_type = field.content_type().unwrap_or_default().to_string();

        match field.bytes().await {
            Ok(data) => batch.push(BatchItem::Received(UploadedFile::new(name, media_type, data))),
            Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                warn!(error = %e, limit, file = %name, "Upload exceeds body limit");
                return Err(AppError::PayloadTooLarge { limit });
            }
            Err(e) => batch.push(BatchItem::Unreadable {
                name,
                reason: e.to_string(),
            }),
        }
    }

    Ok(batch)
}

async fn list_files(State(state): State<AppState>) -> Json<ListResponse> {
    Json(ListResponse {
        files: state.ingest.list().await,
    })
}

async fn retrieve_file(
    State(state): State<AppState>,
    payload: Result<Json<RetrieveRequest>, JsonRejection>,
) -> AppResult<Json<RetrieveResponse>> {
    let Json(request) = payload.map_err(|e| {
        warn!(error = %e, "Rejected retrieval request body");
        AppError::MalformedRequest("Invalid request body".to_string())
    })?;

    let file_id = request
        .file_id()
        .ok_or_else(|| AppError::MalformedRequest("File ID required".to_string()))?;

    let file = state.ingest.retrieve(&file_id).await.inspect_err(|_| {
        info!(file_id = %file_id, "Requested file not found");
    })?;

    Ok(Json(RetrieveResponse {
        success: true,
        file,
    }))
}
