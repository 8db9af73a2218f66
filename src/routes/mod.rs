//! API Routes
//!
//! This module organizes all HTTP endpoints for the service:
//! - `/api/upload-rag` - Document upload, listing and retrieval
//! - `/api/health` - Health checks

pub mod files;
pub mod health;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::middleware::apply_cors;
use crate::models::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    let origins = state.config.server.cors_allowed_origins.clone();

    let api_router = Router::new()
        .merge(files::router(state.clone()))
        .merge(health::router(state));

    apply_cors(api_router, &origins).layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let app = create_router(AppState::new(Config::default()));
        let request = Request::builder()
            .uri("/api/weather")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cors_preflight_for_allowed_origin() {
        let app = create_router(AppState::new(Config::default()));
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/api/upload-rag")
            .header("origin", "http://localhost:5173")
            .header("access-control-request-method", "POST")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "http://localhost:5173"
        );
    }
}
