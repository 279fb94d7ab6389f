//! Locator-addressed cache key generation.
//!
//! Keys hash the locator string exactly as given. No normalization is applied,
//! so `https://example.com/a` and `https://example.com/a/` are different keys.

use sha2::{Digest, Sha256};

/// Compute the cache key for a document locator.
pub fn compute_cache_key(locator: &str) -> String {
    compute_content_hash(locator.as_bytes())
}

/// Compute the SHA-256 of document bytes as lowercase hex.
pub fn compute_content_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
