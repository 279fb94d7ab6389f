//! Filesystem-backed cache for downloaded documents.
//!
//! This module provides a persistent, locator-addressed cache. It supports:
//!
//! - Cache keys derived from the SHA-256 of the exact locator string
//! - Per-platform cache root resolution with an explicit override
//! - JSON metadata carrying HTTP validators for conditional revalidation

pub mod entry;
pub mod hash;
pub mod root;
pub mod store;

pub use crate::Error;

pub use entry::CacheEntry;
pub use root::{HostOs, PlatformEnv, resolve_cache_root};
pub use store::CacheStore;
