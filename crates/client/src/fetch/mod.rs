//! HTTP document downloader backed by the local cache.
//!
//! ### Pipeline
//! 1. Validate the locator (http/https with a host) before any network I/O.
//! 2. Look up `documents/{key}.txt`; skip to download when absent or forced.
//! 3. Revalidate: no stored validators means fresh (configurable); otherwise a
//!    conditional `HEAD` with `If-None-Match`/`If-Modified-Since`. Only 304
//!    counts as fresh. Transport failures count as fresh (configurable).
//! 4. Download with `GET`; require exactly 200, a text Content-Type, and a body
//!    within `max_bytes` (declared length and actual bytes both checked).
//! 5. Write content, then metadata. Metadata failures are logged only.
//!
//! Every network wait races the caller's `CancellationToken`.

pub mod content;
pub mod url;

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Utc;
use reqwest::{Client, StatusCode, header};
use tokio_util::sync::CancellationToken;

pub use content::{check_body_length, check_content_type, check_declared_length, is_text_like};
pub use self::url::{UrlError, validate_locator};

use ragdocs_core::cache::hash::{compute_cache_key, compute_content_hash};
use ragdocs_core::{AppConfig, CacheEntry, CacheStore, Error};

/// Configuration for the downloader.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string (default: "ragdocs/0.1")
    pub user_agent: String,

    /// Maximum document size in bytes (default: 10MB)
    pub max_bytes: u64,

    /// Request timeout (default: 30s)
    pub timeout: Duration,

    /// Maximum number of redirects to follow (default: 5)
    pub max_redirects: usize,

    /// Skip the cache and always download (default: false)
    pub force_refresh: bool,

    /// Treat cached documents without validators as fresh (default: true)
    pub trust_unvalidated_cache: bool,

    /// Treat the cache as fresh when revalidation cannot reach the server (default: true)
    pub trust_cache_on_transport_error: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "ragdocs/0.1".to_string(),
            max_bytes: 10 * 1024 * 1024,
            timeout: Duration::from_secs(30),
            max_redirects: 5,
            force_refresh: false,
            trust_unvalidated_cache: true,
            trust_cache_on_transport_error: true,
        }
    }
}

impl From<&AppConfig> for FetchConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            max_bytes: config.max_bytes,
            timeout: config.timeout(),
            max_redirects: config.max_redirects,
            force_refresh: config.force_refresh,
            trust_unvalidated_cache: config.trust_unvalidated_cache,
            trust_cache_on_transport_error: config.trust_cache_on_transport_error,
        }
    }
}

/// Anything that can turn a remote locator into a local file.
#[async_trait::async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Return a local path holding the document behind `locator`.
    async fn fetch(&self, locator: &str, cancel: &CancellationToken) -> Result<PathBuf, Error>;
}

/// Caching HTTP downloader.
pub struct Downloader {
    http: Client,
    config: FetchConfig,
    store: CacheStore,
}

impl Downloader {
    /// Create a downloader writing into `store`.
    pub fn new(config: FetchConfig, store: CacheStore) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::Transport(format!("failed to build HTTP client: {e}")))?;

        tracing::debug!(cache_root = %store.root().display(), "initialized document downloader");

        Ok(Self { http, config, store })
    }

    /// Cache root in use.
    pub fn cache_root(&self) -> &Path {
        self.store.root()
    }

    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    /// Content path for `locator` if a cached copy exists.
    pub async fn cached_path(&self, locator: &str) -> Result<Option<PathBuf>, Error> {
        self.store.lookup(&compute_cache_key(locator)).await
    }

    /// Whether the cached copy of `locator` can be served without downloading.
    ///
    /// Missing content, or missing or corrupt metadata, counts as stale.
    pub async fn is_cache_fresh(&self, locator: &str, cancel: &CancellationToken) -> Result<bool, Error> {
        let url = validate_locator(locator).map_err(|e| Error::InvalidLocator(format!("{locator}: {e}")))?;
        let key = compute_cache_key(locator);
        if self.store.lookup(&key).await?.is_none() {
            return Ok(false);
        }
        self.check_freshness(locator, &key, &url, cancel).await
    }

    /// Fetch `locator`, serving from the cache when it is still fresh.
    pub async fn fetch(&self, locator: &str, cancel: &CancellationToken) -> Result<PathBuf, Error> {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let url = validate_locator(locator).map_err(|e| Error::InvalidLocator(format!("{locator}: {e}")))?;
        let key = compute_cache_key(locator);

        if !self.config.force_refresh {
            match self.store.lookup(&key).await {
                Ok(Some(path)) => match self.check_freshness(locator, &key, &url, cancel).await {
                    Ok(true) => {
                        tracing::debug!(url = locator, path = %path.display(), "using cached document");
                        return Ok(path);
                    }
                    Ok(false) => tracing::debug!(url = locator, "cached document is stale"),
                    Err(Error::Cancelled) => return Err(Error::Cancelled),
                    Err(e) => tracing::warn!(url = locator, error = %e, "failed to validate cache"),
                },
                Ok(None) => {}
                Err(e) => tracing::warn!(url = locator, error = %e, "failed to check cache"),
            }
        }

        tracing::info!(url = locator, "downloading document");
        let (content, entry) = self.download(locator, url, cancel).await?;

        let path = self.store.write_document(&key, &content).await?;

        if let Err(e) = self.store.save_entry(&key, &entry).await {
            tracing::warn!(url = locator, error = %e, "failed to save metadata");
        }

        tracing::info!(url = locator, bytes = content.len(), path = %path.display(), "downloaded and cached document");
        Ok(path)
    }

    async fn check_freshness(
        &self, locator: &str, key: &str, url: &reqwest::Url, cancel: &CancellationToken,
    ) -> Result<bool, Error> {
        let entry = match self.store.load_entry(key).await {
            Ok(entry) => entry,
            Err(e @ (Error::CacheMiss(_) | Error::MetadataCorrupt { .. })) => {
                tracing::debug!(url = locator, error = %e, "cache metadata unusable");
                return Ok(false);
            }
            Err(e) => return Err(e),
        };

        if !entry.has_validators() {
            return Ok(self.config.trust_unvalidated_cache);
        }

        self.revalidate(locator, url, &entry, cancel).await
    }

    /// Conditional HEAD against the stored validators.
    async fn revalidate(
        &self, locator: &str, url: &reqwest::Url, entry: &CacheEntry, cancel: &CancellationToken,
    ) -> Result<bool, Error> {
        let mut request = self.http.head(url.clone());
        if !entry.etag.is_empty() {
            request = request.header(header::IF_NONE_MATCH, &entry.etag);
        }
        if !entry.last_modified.is_empty() {
            request = request.header(header::IF_MODIFIED_SINCE, &entry.last_modified);
        }

        match until_cancelled(cancel, request.send()).await? {
            Ok(response) => {
                let fresh = response.status() == StatusCode::NOT_MODIFIED;
                tracing::debug!(url = locator, status = response.status().as_u16(), fresh, "revalidated cache");
                Ok(fresh)
            }
            Err(e) => {
                tracing::debug!(
                    url = locator,
                    error = %e,
                    trusted = self.config.trust_cache_on_transport_error,
                    "revalidation request failed"
                );
                Ok(self.config.trust_cache_on_transport_error)
            }
        }
    }

    /// GET the document and apply the content policy.
    async fn download(
        &self, locator: &str, url: reqwest::Url, cancel: &CancellationToken,
    ) -> Result<(Vec<u8>, CacheEntry), Error> {
        let response = until_cancelled(cancel, self.http.get(url).send())
            .await?
            .map_err(transport_error)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::UpstreamStatus { url: locator.to_string(), status: status.as_u16() });
        }

        let headers = response.headers();
        let content_type = header_str(headers, header::CONTENT_TYPE);
        check_content_type(content_type.as_deref())?;
        check_declared_length(response.content_length(), self.config.max_bytes)?;

        let etag = header_str(headers, header::ETAG).unwrap_or_default();
        let last_modified = header_str(headers, header::LAST_MODIFIED).unwrap_or_default();

        let content = until_cancelled(cancel, content::read_body_capped(response, self.config.max_bytes)).await??;

        let entry = CacheEntry {
            url: locator.to_string(),
            downloaded_at: Utc::now(),
            content_hash: compute_content_hash(&content),
            etag,
            last_modified,
            content_type: content_type.unwrap_or_default(),
            size: content.len() as u64,
        };

        Ok((content, entry))
    }
}

#[async_trait::async_trait]
impl DocumentFetcher for Downloader {
    async fn fetch(&self, locator: &str, cancel: &CancellationToken) -> Result<PathBuf, Error> {
        Downloader::fetch(self, locator, cancel).await
    }
}

fn header_str(headers: &header::HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

pub(crate) fn transport_error(err: reqwest::Error) -> Error {
    if err.is_timeout() { Error::Timeout(err.to_string()) } else { Error::Transport(err.to_string()) }
}

/// Run `fut` unless `cancel` fires first.
pub(crate) async fn until_cancelled<F: Future>(cancel: &CancellationToken, fut: F) -> Result<F::Output, Error> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(Error::Cancelled),
        out = fut => Ok(out),
    }
}
