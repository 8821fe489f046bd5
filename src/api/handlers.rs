//! API Handlers
//!
//! HTTP request handlers for each image cache endpoint.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};

use crate::backing::{read_through, write_through, BackingStore, MemoryBackingStore};
use crate::cache::{CacheStore, ImageCache};
use crate::error::{CacheError, Result};
use crate::models::{
    validate_key, ClearResponse, HealthResponse, ImageUpload, InvalidateResponse, PutResponse,
    StatsResponse,
};

/// Application state shared across all handlers.
///
/// Holds the process-wide cache handle and the backing store it fronts.
#[derive(Clone)]
pub struct AppState {
    /// Shared image cache
    pub cache: ImageCache,
    /// Authoritative image storage
    pub store: Arc<dyn BackingStore>,
}

impl AppState {
    /// Creates a new AppState from a cache and a backing store.
    pub fn new(cache: ImageCache, store: Arc<dyn BackingStore>) -> Self {
        Self { cache, store }
    }

    /// Creates a new AppState from configuration, backed by an in-memory store.
    pub fn from_config(config: &crate::config::Config) -> Self {
        let cache = ImageCache::new(CacheStore::with_capacity_bytes(
            config.capacity_bytes(),
            config.eviction_policy,
        ));
        Self::new(cache, Arc::new(MemoryBackingStore::new()))
    }
}

/// Handler for PUT /images/:key
///
/// Writes the image to the backing store and drops any cached copy.
pub async fn upload_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    body: Bytes,
) -> Result<Json<PutResponse>> {
    let upload = ImageUpload::new(key, body);
    if let Some(error_msg) = upload.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let size = upload.payload.len();
    write_through(&state.cache, state.store.as_ref(), &upload.key, upload.payload)?;

    Ok(Json(PutResponse::new(upload.key, size)))
}

/// Handler for GET /images/:key
///
/// Serves the image from the cache, falling back to the backing store.
pub async fn image_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<impl IntoResponse> {
    if let Some(error_msg) = validate_key(&key) {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    match read_through(&state.cache, state.store.as_ref(), &key)? {
        Some(payload) => Ok(([(header::CONTENT_TYPE, "application/octet-stream")], payload)),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for PUT /cache/:key
///
/// Puts the payload straight into the cache without touching the store.
pub async fn cache_put_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    body: Bytes,
) -> Result<Json<PutResponse>> {
    if let Some(error_msg) = validate_key(&key) {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let size = body.len();
    state.cache.try_put(key.clone(), body)?;

    Ok(Json(PutResponse::new(key, size)))
}

/// Handler for DELETE /cache/:key
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<InvalidateResponse> {
    state.cache.invalidate(&key);
    Json(InvalidateResponse::new(key))
}

/// Handler for DELETE /cache
pub async fn clear_handler(State(state): State<AppState>) -> Result<Json<ClearResponse>> {
    if !state.cache.clear() {
        return Err(CacheError::Internal("Cache clear failed".to_string()));
    }
    Ok(Json(ClearResponse::cleared()))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.stats();
    Json(StatsResponse::new(state.cache.policy(), &stats))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
