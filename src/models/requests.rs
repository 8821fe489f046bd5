//! Request DTOs for the image cache API
//!
//! Payloads arrive as raw request bodies; the key comes from the path.

use bytes::Bytes;

/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// An image upload (PUT /images/:key or PUT /cache/:key)
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// The image key
    pub key: String,
    /// The encoded image bytes
    pub payload: Bytes,
}

impl ImageUpload {
    pub fn new(key: impl Into<String>, payload: impl Into<Bytes>) -> Self {
        Self {
            key: key.into(),
            payload: payload.into(),
        }
    }

    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if let Some(msg) = validate_key(&self.key) {
            return Some(msg);
        }
        if self.payload.is_empty() {
            return Some("Image payload cannot be empty".to_string());
        }
        None
    }
}

/// Checks a key taken from a request path.
pub fn validate_key(key: &str) -> Option<String> {
    if key.trim().is_empty() {
        return Some("Key cannot be empty".to_string());
    }
    if key.len() > MAX_KEY_LENGTH {
        return Some(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        ));
    }
    None
}
