use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::Config;
use crate::document_store::{DocumentStore, InMemoryDocumentStore, StoredDocument};
use crate::ingest::IngestService;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub ingest: IngestService,
}

impl AppState {
    /// State backed by a fresh in-memory store
    pub fn new(config: Config) -> Self {
        Self::with_store(config, Arc::new(InMemoryDocumentStore::new()))
    }

    pub fn with_store(config: Config, store: Arc<dyn DocumentStore>) -> Self {
        let ingest = IngestService::new(store, config.upload.preview_chars);
        Self { config, ingest }
    }
}

// API Request/Response types

/// Receipt for one file of an ingest batch, tagged by `status`
#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FileReceipt {
    Success(StoredFileReceipt),
    Error { name: String },
}

impl FileReceipt {
    pub fn is_success(&self) -> bool {
        matches!(self, FileReceipt::Success(_))
    }

    pub fn name(&self) -> &str {
        match self {
            FileReceipt::Success(receipt) => &receipt.name,
            FileReceipt::Error { name } => name,
        }
    }
}

#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFileReceipt {
    pub id: String,
    pub name: String,
    /// Size of the upload in bytes
    pub size: usize,
    pub media_type: String,
    pub uploaded_at: DateTime<Utc>,
    pub preview: String,
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestResponse {
    pub success: bool,
    pub files: Vec<FileReceipt>,
    pub total_stored: usize,
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFileSummary {
    pub id: String,
    pub name: String,
    pub media_type: String,
    pub uploaded_at: DateTime<Utc>,
    /// Length of the extracted content in characters
    pub content_length: usize,
}

impl From<&StoredDocument> for StoredFileSummary {
    fn from(document: &StoredDocument) -> Self {
        Self {
            id: document.id.clone(),
            name: document.name.clone(),
            media_type: document.media_type.clone(),
            uploaded_at: document.uploaded_at,
            content_length: document.content_length(),
        }
    }
}

#[derive(Debug, serde::Serialize)]
pub struct ListResponse {
    pub files: Vec<StoredFileSummary>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrieveRequest {
    /// Kept loose so a non-string id misses like any unknown id
    #[serde(default)]
    pub file_id: serde_json::Value,
}

impl RetrieveRequest {
    /// The lookup key, or `None` when the id is missing, null or blank
    pub fn file_id(&self) -> Option<String> {
        match &self.file_id {
            serde_json::Value::Null => None,
            serde_json::Value::String(id) if id.is_empty() => None,
            serde_json::Value::String(id) => Some(id.clone()),
            other => Some(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrievedFile {
    pub name: String,
    pub media_type: String,
    pub content: String,
    pub uploaded_at: DateTime<Utc>,
}

impl From<&StoredDocument> for RetrievedFile {
    fn from(document: &StoredDocument) -> Self {
        Self {
            name: document.name.clone(),
            media_type: document.media_type.clone(),
            content: document.content.clone(),
            uploaded_at: document.uploaded_at,
        }
    }
}

#[derive(Debug, serde::Serialize)]
pub struct RetrieveResponse {
    pub success: bool,
    pub file: RetrievedFile,
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub total_stored: usize,
}
