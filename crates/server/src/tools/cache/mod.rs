//! Cache-related MCP tools.
//!
//! This module provides tools for inspecting and evicting entries in the
//! filesystem document cache.

pub mod get;
pub mod remove;

pub use get::{CacheGetParams, get_impl};
pub use remove::{CacheRemoveParams, remove_impl};
