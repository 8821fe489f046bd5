//! API Module
//!
//! HTTP handlers and routing for the image cache.
//!
//! # Endpoints
//! - `PUT /images/:key` - Upload an image to the backing store
//! - `GET /images/:key` - Fetch an image through the cache
//! - `PUT /cache/:key` - Put a payload into the cache
//! - `DELETE /cache/:key` - Invalidate a key
//! - `DELETE /cache` - Clear the cache
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
