//! API Routes
//!
//! Configures the Axum router with all image cache endpoints.

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cache_put_handler, clear_handler, health_handler, image_handler, invalidate_handler,
    stats_handler, upload_handler, AppState,
};
use crate::cache::BYTES_PER_MB;

/// Largest accepted request body
pub const MAX_UPLOAD_BYTES: usize = 32 * BYTES_PER_MB;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /images/:key` - Upload an image (write-through)
/// - `GET /images/:key` - Fetch an image (read-through)
/// - `PUT /cache/:key` - Put a payload directly into the cache
/// - `DELETE /cache/:key` - Invalidate a cached key
/// - `DELETE /cache` - Drop every cached entry
/// - `GET /stats` - Get cache statistics
/// - `GET /health` - Health check endpoint
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/images/:key", put(upload_handler).get(image_handler))
        .route("/cache", delete(clear_handler))
        .route("/cache/:key", put(cache_put_handler).delete(invalidate_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
