// Agri Ingest - document upload and text extraction for the farming assistant

pub mod config;
pub mod document_store;
pub mod extraction; // PDF, Word, spreadsheet and plain-text extractors
pub mod ingest;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_support;

// Re-exports for convenience
pub use config::Config;
pub use document_store::{DocumentStore, InMemoryDocumentStore, StoredDocument};
pub use models::AppState;
pub use types::{AppError, AppResult};

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}
