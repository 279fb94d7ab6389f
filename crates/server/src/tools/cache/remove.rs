//! cache_remove tool implementation.

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use ragdocs_core::cache::hash::compute_cache_key;
use ragdocs_core::{CacheStore, Error};

/// Parameters for the cache_remove tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheRemoveParams {
    /// The exact URL the document was downloaded from.
    pub locator: String,
}

/// Output from the cache_remove tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheRemoveOutput {
    /// Whether any cached file existed and was deleted.
    pub removed: bool,
}

/// Implementation of the cache_remove tool.
pub async fn remove_impl(store: &CacheStore, params: CacheRemoveParams) -> Result<CallToolResult, McpError> {
    if params.locator.is_empty() {
        return Err(Error::InvalidInput("locator cannot be empty".into()).into());
    }

    let key = compute_cache_key(&params.locator);
    let removed = store.remove(&key).await?;
    tracing::info!(locator = %params.locator, removed, "cache_remove");

    let output = CacheRemoveOutput { removed };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize output: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::output_text;

    fn removed(result: &CallToolResult) -> bool {
        let output: CacheRemoveOutput = serde_json::from_str(&output_text(result)).unwrap();
        output.removed
    }

    #[tokio::test]
    async fn test_remove_existing_then_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::open(dir.path()).await.unwrap();
        let locator = "https://example.com/doc.txt";
        let key = compute_cache_key(locator);
        store.write_document(&key, b"hello").await.unwrap();

        let params = CacheRemoveParams { locator: locator.to_string() };
        assert!(removed(&remove_impl(&store, params.clone()).await.unwrap()));
        assert!(!store.document_path(&key).exists());
        assert!(!removed(&remove_impl(&store, params).await.unwrap()));
    }

    #[tokio::test]
    async fn test_remove_empty_locator() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::open(dir.path()).await.unwrap();

        let err = remove_impl(&store, CacheRemoveParams { locator: String::new() }).await.unwrap_err();
        assert_eq!(err.code.0, -32602);
    }
}
