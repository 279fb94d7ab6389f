//! Shared state behind every tool call.

use std::sync::Arc;

use ragdocs_client::{DocumentSetProcessor, Downloader, FetchConfig};
use ragdocs_core::{AppConfig, CacheStore, Error};

/// Cache handle plus one processor per refresh policy, all over the same root.
pub struct ServerState {
    store: CacheStore,
    cached: DocumentSetProcessor,
    refreshing: DocumentSetProcessor,
}

impl ServerState {
    pub fn new(config: &AppConfig, store: CacheStore) -> Result<Self, Error> {
        let mut fetch = FetchConfig::from(config);
        let cached = DocumentSetProcessor::new(Arc::new(Downloader::new(fetch.clone(), store.clone())?));

        fetch.force_refresh = true;
        let refreshing = DocumentSetProcessor::new(Arc::new(Downloader::new(fetch, store.clone())?));

        Ok(Self { store, cached, refreshing })
    }

    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    /// Processor honouring the per-call refresh flag.
    pub fn processor(&self, force_refresh: bool) -> &DocumentSetProcessor {
        if force_refresh { &self.refreshing } else { &self.cached }
    }
}
