//! Upload Ingest
//!
//! Runs a batch of uploaded files through extraction and into the document
//! store. Files are extracted concurrently and independently; the receipts
//! come back in the order the files arrived, and a failure on one file is
//! reported inline without touching the rest of the batch.

use std::sync::Arc;

use bytes::Bytes;
use futures::future::join_all;
use tracing::{debug, error, info, warn};

use crate::document_store::{DocumentStore, StoredDocument};
use crate::extraction::{classify, extract_text};
use crate::models::{
    FileReceipt, IngestResponse, RetrievedFile, StoredFileReceipt, StoredFileSummary,
};
use crate::types::{AppError, AppResult};

/// A file received in a batch
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    /// Declared media type, empty when the client sent none
    pub media_type: String,
    pub data: Bytes,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            data: data.into(),
        }
    }
}

/// One entry of an ingest batch as handed over by the transport
#[derive(Debug, Clone)]
pub enum BatchItem {
    Received(UploadedFile),
    /// The part was announced but its body could not be read
    Unreadable { name: String, reason: String },
}

impl From<UploadedFile> for BatchItem {
    fn from(file: UploadedFile) -> Self {
        BatchItem::Received(file)
    }
}

#[derive(Clone)]
pub struct IngestService {
    store: Arc<dyn DocumentStore>,
    preview_chars: usize,
}

impl IngestService {
    pub fn new(store: Arc<dyn DocumentStore>, preview_chars: usize) -> Self {
        Self { store, preview_chars }
    }

    /// Extract and store every file of the batch.
    ///
    /// Only an empty batch fails the call; everything else is reported per
    /// file in the response.
    pub async fn ingest(&self, batch: Vec<BatchItem>) -> AppResult<IngestResponse> {
        if batch.is_empty() {
            return Err(AppError::EmptyBatch);
        }

        let batch_size = batch.len();
        let files = join_all(batch.into_iter().map(|item| self.process_item(item))).await;
        let succeeded = files.iter().filter(|receipt| receipt.is_success()).count();
        let total_stored = self.store.len().await;

        info!(
            files = batch_size,
            succeeded,
            total_stored,
            "Ingest batch completed"
        );

        Ok(IngestResponse {
            success: true,
            files,
            total_stored,
        })
    }

    async fn process_item(&self, item: BatchItem) -> FileReceipt {
        let file = match item {
            BatchItem::Received(file) => file,
            BatchItem::Unreadable { name, reason } => {
                warn!(file = %name, reason = %reason, "Skipping unreadable upload");
                return FileReceipt::Error { name };
            }
        };

        let name = file.name.clone();
        match self.process_file(file).await {
            Ok(receipt) => FileReceipt::Success(receipt),
            Err(e) => {
                error!(file = %name, error = %e, "File processing error");
                FileReceipt::Error { name }
            }
        }
    }

    async fn process_file(&self, file: UploadedFile) -> AppResult<StoredFileReceipt> {
        let format = classify(&file.media_type, &file.name);
        debug!(file = %file.name, media_type = %file.media_type, %format, "Classified upload");

        let size = file.data.len();
        let UploadedFile { name, media_type, data } = file;

        // Parsers are synchronous and can be slow on large documents
        let content = {
            let name = name.clone();
            let media_type = media_type.clone();
            tokio::task::spawn_blocking(move || extract_text(format, &name, &media_type, &data))
                .await
                .map_err(|e| AppError::Internal(format!("extraction task failed: {}", e)))?
        };

        let stored = self
            .store
            .insert(StoredDocument::new(name, media_type, content))
            .await?;

        Ok(StoredFileReceipt {
            id: stored.id.clone(),
            name: stored.name.clone(),
            size,
            media_type: stored.media_type.clone(),
            uploaded_at: stored.uploaded_at,
            preview: stored.content.chars().take(self.preview_chars).collect(),
        })
    }

    /// Summaries of every stored document, in insertion order
    pub async fn list(&self) -> Vec<StoredFileSummary> {
        self.store
            .list()
            .await
            .iter()
            .map(|document| StoredFileSummary::from(document.as_ref()))
            .collect()
    }

    /// Full content of one stored document
    pub async fn retrieve(&self, id: &str) -> AppResult<RetrievedFile> {
        self.store
            .get(id)
            .await
            .map(|document| RetrievedFile::from(document.as_ref()))
            .ok_or_else(|| AppError::NotFound(id.to_string()))
    }

    pub async fn total_stored(&self) -> usize {
        self.store.len().await
    }
}
