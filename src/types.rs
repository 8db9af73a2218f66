// Error taxonomy for request-level failures

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

/// Failures that reject a whole request.
///
/// Per-file extraction problems never show up here; they are folded into
/// placeholder content by the extraction layer.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("No files provided")]
    EmptyBatch,

    #[error("{0}")]
    MalformedRequest(String),

    #[error("Upload exceeds the {limit} byte limit")]
    PayloadTooLarge { limit: usize },

    /// Carries the identifier that was looked up
    #[error("File not found")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::EmptyBatch | AppError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            AppError::Internal(details) => {
                error!(details = %details, "Request failed");
                "Upload failed".to_string()
            }
            other => other.to_string(),
        };

        (
            self.status_code(),
            Json(serde_json::json!({ "error": message })),
        )
            .into_response()
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;
