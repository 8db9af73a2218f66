//! Document Store
//!
//! Keeps extracted text in memory for the lifetime of the owning `AppState`.
//! Documents are insert-only: there is no update or delete, and nothing is
//! persisted across restarts.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::types::{AppError, AppResult};

/// A single ingested file and the text pulled out of it
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: String,
    pub name: String,
    pub content: String,
    pub media_type: String,
    pub uploaded_at: DateTime<Utc>,
}

impl StoredDocument {
    /// Build a document with a fresh identifier, stamped with the current time
    pub fn new(
        name: impl Into<String>,
        media_type: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            content: content.into(),
            media_type: media_type.into(),
            uploaded_at: Utc::now(),
        }
    }

    /// Length of the stored content in characters
    pub fn content_length(&self) -> usize {
        self.content.chars().count()
    }
}

/// Key-value storage for ingested documents
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a new document. Identifiers must not repeat.
    async fn insert(&self, document: StoredDocument) -> AppResult<Arc<StoredDocument>>;

    async fn get(&self, id: &str) -> Option<Arc<StoredDocument>>;

    /// Snapshot of every document in insertion order
    async fn list(&self) -> Vec<Arc<StoredDocument>>;

    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[derive(Default)]
struct StoreInner {
    documents: Vec<Arc<StoredDocument>>,
    index: HashMap<String, usize>,
}

#[derive(Clone, Default)]
pub struct InMemoryDocumentStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn insert(&self, document: StoredDocument) -> AppResult<Arc<StoredDocument>> {
        let document = Arc::new(document);
        let mut guard = self.inner.write().await;
        if guard.index.contains_key(&document.id) {
            return Err(AppError::Internal(format!(
                "document id {} already stored",
                document.id
            )));
        }
        let position = guard.documents.len();
        guard.index.insert(document.id.clone(), position);
        guard.documents.push(Arc::clone(&document));
        Ok(document)
    }

    async fn get(&self, id: &str) -> Option<Arc<StoredDocument>> {
        let guard = self.inner.read().await;
        guard
            .index
            .get(id)
            .and_then(|&position| guard.documents.get(position))
            .cloned()
    }

    async fn list(&self) -> Vec<Arc<StoredDocument>> {
        let guard = self.inner.read().await;
        guard.documents.clone()
    }

    async fn len(&self) -> usize {
        let guard = self.inner.read().await;
        guard.documents.len()
    }
}
