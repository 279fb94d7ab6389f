//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.
use std::sync::Arc;

use crate::state::ServerState;
use crate::tools::cache::{CacheGetParams, CacheRemoveParams, get_impl, remove_impl};
use crate::tools::documents::{DocumentsPrepareParams, prepare_impl};

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

/// The main MCP server handler for ragdocs-mcp.
#[derive(Clone)]
pub struct RagDocsServer {
    state: Arc<ServerState>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl RagDocsServer {
    pub fn new(state: ServerState) -> Self {
        Self { state: Arc::new(state), tool_router: Self::tool_router() }
    }

    /// Resolve URLs, files, and directories to local text files.
    ///
    /// Cancelling the request aborts in-flight downloads and directory walks.
    #[tool(
        description = "Resolve a list of URLs, files, and directories to local text file paths. URLs are downloaded into the cache and revalidated with conditional requests; directories are scanned recursively for text files."
    )]
    async fn documents_prepare(
        &self, params: Parameters<DocumentsPrepareParams>, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        prepare_impl(&self.state, params.0, &context.ct).await
    }

    #[tool(description = "Look up the cache metadata and file paths stored for a URL.")]
    async fn cache_get(&self, params: Parameters<CacheGetParams>) -> Result<CallToolResult, McpError> {
        get_impl(self.state.store(), params.0).await
    }

    #[tool(description = "Remove the cached document and metadata for a URL.")]
    async fn cache_remove(&self, params: Parameters<CacheRemoveParams>) -> Result<CallToolResult, McpError> {
        remove_impl(self.state.store(), params.0).await
    }
}

impl ServerHandler for RagDocsServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "ragdocs-mcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
