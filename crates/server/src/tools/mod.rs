//! MCP tool implementations.
//!
//! This module contains all tools exposed by the ragdocs-mcp server.

pub mod cache;
pub mod documents;
