//! cache_get tool implementation.
//!
//! Retrieves the stored metadata for a cached URL.

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use ragdocs_core::cache::hash::compute_cache_key;
use ragdocs_core::{CacheEntry, CacheStore, Error};

/// Parameters for the cache_get tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheGetParams {
    /// The exact URL the document was downloaded from.
    pub locator: String,
}

/// Output from the cache_get tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheGetOutput {
    /// Cache key derived from the locator.
    pub key: String,
    /// The stored metadata.
    pub entry: CacheEntry,
    /// Path of the cached content, if the content file is still present.
    pub document_path: Option<String>,
    /// Path of the metadata file.
    pub metadata_path: String,
}

/// Implementation of the cache_get tool.
pub async fn get_impl(store: &CacheStore, params: CacheGetParams) -> Result<CallToolResult, McpError> {
    if params.locator.is_empty() {
        return Err(Error::InvalidInput("locator cannot be empty".into()).into());
    }

    let key = compute_cache_key(&params.locator);
    let entry = store.load_entry(&key).await?;
    let document_path = store.lookup(&key).await?;

    let output = CacheGetOutput {
        metadata_path: store.metadata_path(&key).to_string_lossy().into_owned(),
        document_path: document_path.map(|p| p.to_string_lossy().into_owned()),
        entry,
        key,
    };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize entry: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
