//! documents_prepare tool implementation.
//!
//! Resolves a mixed list of locators to local text files through the
//! document set processor.

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::state::ServerState;
use ragdocs_core::Error;

/// Parameters for the documents_prepare tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DocumentsPrepareParams {
    /// URLs, file paths, or directory paths, processed in order.
    pub locators: Vec<String>,

    /// Download every URL again, ignoring cached copies.
    #[serde(default)]
    pub force_refresh: bool,
}

/// Output from the documents_prepare tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DocumentsPrepareOutput {
    /// Absolute local paths, in locator order with directories expanded in place.
    pub paths: Vec<String>,
}

/// Implementation of the documents_prepare tool.
pub async fn prepare_impl(
    state: &ServerState, params: DocumentsPrepareParams, cancel: &CancellationToken,
) -> Result<CallToolResult, McpError> {
    if params.locators.is_empty() {
        return Err(Error::InvalidInput("locators cannot be empty".into()).into());
    }

    let paths = state
        .processor(params.force_refresh)
        .process(&params.locators, cancel)
        .await?;

    let output = DocumentsPrepareOutput {
        paths: paths.iter().map(|p| p.to_string_lossy().into_owned()).collect(),
    };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize output: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
