//! Turns a mixed list of locators into an ordered list of local files.
//!
//! URLs are downloaded through a [`DocumentFetcher`], directories are scanned
//! recursively and expanded in place, and explicit files are passed through
//! without the extension filter. The first failure aborts the whole batch.

use std::path::PathBuf;
use std::sync::Arc;

use ragdocs_core::cache::{PlatformEnv, resolve_cache_root};
use ragdocs_core::{AppConfig, CacheStore, DocumentLocator, Error};
use tokio_util::sync::CancellationToken;

use crate::fetch::{DocumentFetcher, Downloader, FetchConfig};
use crate::scan::scan_directory;

pub struct DocumentSetProcessor {
    fetcher: Arc<dyn DocumentFetcher>,
}

impl DocumentSetProcessor {
    pub fn new(fetcher: Arc<dyn DocumentFetcher>) -> Self {
        Self { fetcher }
    }

    /// Build a processor backed by a [`Downloader`] over the configured cache root.
    pub async fn from_config(config: &AppConfig) -> Result<Self, Error> {
        let root = resolve_cache_root(config.cache_dir.clone(), &PlatformEnv::from_process())?;
        let store = CacheStore::open(root).await?;
        let downloader = Downloader::new(FetchConfig::from(config), store)?;
        Ok(Self::new(Arc::new(downloader)))
    }

    /// Resolve every locator, in order, to local file paths.
    ///
    /// # Errors
    ///
    /// Returns `Error::Locator` naming the first locator that failed.
    pub async fn process<S: AsRef<str>>(&self, locators: &[S], cancel: &CancellationToken) -> Result<Vec<PathBuf>, Error> {
        tracing::info!(count = locators.len(), "processing document locators");

        let mut paths = Vec::new();
        for locator in locators {
            let locator = locator.as_ref();
            let resolved = self
                .process_one(locator, cancel)
                .await
                .map_err(|e| Error::for_locator(locator, e))?;
            paths.extend(resolved);
        }

        tracing::info!(documents = paths.len(), "processed document locators");
        Ok(paths)
    }

    async fn process_one(&self, raw: &str, cancel: &CancellationToken) -> Result<Vec<PathBuf>, Error> {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let locator = DocumentLocator::classify(raw).await?;
        tracing::debug!(locator = raw, kind = locator.kind_name(), "classified locator");

        match locator {
            DocumentLocator::RemoteUrl(url) => {
                let path = self.fetcher.fetch(&url, cancel).await?;
                tracing::debug!(url, path = %path.display(), "resolved remote document");
                Ok(vec![path])
            }
            DocumentLocator::LocalDirectory(dir) => {
                let token = cancel.clone();
                let scan_root = dir.clone();
                tokio::task::spawn_blocking(move || scan_directory(&scan_root, true, &token))
                    .await
                    .map_err(|e| Error::io(dir, std::io::Error::other(e)))?
            }
            DocumentLocator::LocalFile(path) => Ok(vec![path]),
        }
    }
}
