//! Core types and shared functionality for ragdocs.
//!
//! This crate provides:
//! - Filesystem document cache (keys, root resolution, metadata)
//! - Locator classification and path traversal checks
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;
pub mod locator;
pub mod path;

pub use cache::{CacheEntry, CacheStore};
pub use config::{AppConfig, ConfigError};
pub use error::{Error, ErrorKind};
pub use locator::DocumentLocator;
