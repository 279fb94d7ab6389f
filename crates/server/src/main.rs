//! ragdocs-mcp server entry point.
//!
//! Boots the MCP server on stdio transport. Logging goes to stderr to avoid
//! interfering with the JSON-RPC protocol on stdout.

use anyhow::Result;
use ragdocs_core::AppConfig;
use ragdocs_core::cache::{CacheStore, PlatformEnv, resolve_cache_root};
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;

mod handler;
mod state;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;
    let root = resolve_cache_root(config.cache_dir.clone(), &PlatformEnv::from_process())?;
    let store = CacheStore::open(root).await?;

    tracing::info!(cache_root = %store.root().display(), "Starting ragdocs-mcp server on stdio transport");

    let state = state::ServerState::new(&config, store)?;
    let handler = handler::RagDocsServer::new(state);
    let server = serve_server(handler, stdio()).await?;

    server.waiting().await?;

    Ok(())
}
