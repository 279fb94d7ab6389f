//! On-disk document cache.
//!
//! Layout under the cache root:
//!
//! ```text
//! documents/{key}.txt        raw content
//! documents/{key}.meta.json  CacheEntry as pretty JSON
//! ```
//!
//! Content is always written before metadata. Metadata operations never touch
//! the content file.

use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};

use super::entry::CacheEntry;
use crate::Error;

const DOCUMENTS_DIR: &str = "documents";
const DOCUMENT_EXT: &str = ".txt";
const METADATA_EXT: &str = ".meta.json";

/// Path of the content file for `key`.
pub fn document_path(root: &Path, key: &str) -> PathBuf {
    root.join(DOCUMENTS_DIR).join(format!("{key}{DOCUMENT_EXT}"))
}

/// Path of the metadata file for `key`.
pub fn metadata_path(root: &Path, key: &str) -> PathBuf {
    root.join(DOCUMENTS_DIR).join(format!("{key}{METADATA_EXT}"))
}

/// Read and decode a metadata file.
///
/// # Errors
///
/// - `Error::CacheMiss` if the file does not exist
/// - `Error::MetadataCorrupt` if it cannot be decoded
/// - `Error::Io` for any other read failure
pub async fn load_metadata(path: &Path) -> Result<CacheEntry, Error> {
    let data = match tokio::fs::read(path).await {
        Ok(data) => data,
        Err(e) if e.kind() == IoErrorKind::NotFound => {
            return Err(Error::CacheMiss(path.display().to_string()));
        }
        Err(e) => return Err(Error::io(path, e)),
    };

    serde_json::from_slice(&data)
        .map_err(|e| Error::MetadataCorrupt { path: path.to_path_buf(), reason: e.to_string() })
}

/// Encode and write a metadata file, creating parent directories on demand.
pub async fn save_metadata(path: &Path, entry: &CacheEntry) -> Result<(), Error> {
    if let Some(dir) = path.parent() {
        tokio::fs::create_dir_all(dir).await.map_err(|e| Error::io(dir, e))?;
    }

    let data = serde_json::to_vec_pretty(entry).map_err(|e| Error::io(path, std::io::Error::other(e)))?;

    tokio::fs::write(path, data).await.map_err(|e| Error::io(path, e))
}

/// Handle to a cache root.
#[derive(Debug, Clone)]
pub struct CacheStore {
    root: PathBuf,
}

impl CacheStore {
    /// Wrap a root without touching the filesystem.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Wrap a root and make sure its `documents/` directory exists.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, Error> {
        let store = Self::new(root);
        let dir = store.documents_dir();
        tokio::fs::create_dir_all(&dir).await.map_err(|e| Error::io(&dir, e))?;
        tracing::debug!(root = %store.root.display(), "opened document cache");
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn documents_dir(&self) -> PathBuf {
        self.root.join(DOCUMENTS_DIR)
    }

    pub fn document_path(&self, key: &str) -> PathBuf {
        document_path(&self.root, key)
    }

    pub fn metadata_path(&self, key: &str) -> PathBuf {
        metadata_path(&self.root, key)
    }

    /// Return the content path for `key` if the content file exists.
    pub async fn lookup(&self, key: &str) -> Result<Option<PathBuf>, Error> {
        let path = self.document_path(key);
        match tokio::fs::metadata(&path).await {
            Ok(_) => Ok(Some(path)),
            Err(e) if e.kind() == IoErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::io(path, e)),
        }
    }

    /// Write document content for `key`, returning its path.
    pub async fn write_document(&self, key: &str, content: &[u8]) -> Result<PathBuf, Error> {
        let dir = self.documents_dir();
        tokio::fs::create_dir_all(&dir).await.map_err(|e| Error::io(&dir, e))?;

        let path = self.document_path(key);
        tokio::fs::write(&path, content).await.map_err(|e| Error::io(&path, e))?;
        Ok(path)
    }

    pub async fn load_entry(&self, key: &str) -> Result<CacheEntry, Error> {
        load_metadata(&self.metadata_path(key)).await
    }

    pub async fn save_entry(&self, key: &str, entry: &CacheEntry) -> Result<(), Error> {
        save_metadata(&self.metadata_path(key), entry).await
    }

    /// Delete content and metadata for `key`.
    ///
    /// Returns `true` if either file existed.
    pub async fn remove(&self, key: &str) -> Result<bool, Error> {
        let mut removed = false;
        for path in [self.document_path(key), self.metadata_path(key)] {
            match tokio::fs::remove_file(&path).await {
                Ok(()) => removed = true,
                Err(e) if e.kind() == IoErrorKind::NotFound => {}
                Err(e) => return Err(Error::io(path, e)),
            }
        }

        if removed {
            tracing::info!(key, "removed cached document");
        }
        Ok(removed)
    }
}
