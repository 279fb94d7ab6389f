//! Unified error types for ragdocs.
//!
//! Every variant belongs to one [`ErrorKind`] so callers can pick a retry
//! policy without matching on individual variants.

use std::path::PathBuf;

use rmcp::model::{ErrorCode, ErrorData as McpError};

/// Coarse failure categories used for retry decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad scheme or host, path traversal, or a local path that does not exist.
    InvalidLocator,
    /// Network failure before a server response was obtained.
    Transport,
    /// The server answered with a status other than 200.
    UpstreamStatus,
    /// Disallowed content type or size limit exceeded.
    ContentPolicy,
    /// Local filesystem failure, including cache metadata problems.
    Filesystem,
    /// The operation was cancelled by the caller.
    Cancelled,
}

impl ErrorKind {
    /// Only transport failures are worth retrying automatically.
    pub fn is_retryable(self) -> bool {
        matches!(self, ErrorKind::Transport)
    }
}

/// Unified error type for document acquisition.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., an empty locator list).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Locator is not an http(s) URL with a host.
    #[error("INVALID_LOCATOR: {0}")]
    InvalidLocator(String),

    /// Path contains a parent-directory component.
    #[error("INVALID_LOCATOR: path traversal detected: {0}")]
    PathTraversal(String),

    /// Local path does not exist.
    #[error("INVALID_LOCATOR: path not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Local path was expected to be a directory.
    #[error("INVALID_LOCATOR: not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// Network failure (connect, TLS, reset, body read).
    #[error("TRANSPORT_ERROR: {0}")]
    Transport(String),

    /// Request did not complete within the configured timeout.
    #[error("FETCH_TIMEOUT: {0}")]
    Timeout(String),

    /// Server answered with a non-200 status.
    #[error("UPSTREAM_STATUS: {url} returned HTTP {status}")]
    UpstreamStatus { url: String, status: u16 },

    /// Content-Type is not in the text allow-list.
    #[error("CONTENT_POLICY: unsupported content type: {0}")]
    UnsupportedContentType(String),

    /// Declared or actual body size exceeds the limit.
    #[error("CONTENT_POLICY: {size} bytes exceeds limit of {limit} bytes")]
    TooLarge { size: u64, limit: u64 },

    /// Local file extension is not in the text allow-list.
    #[error("CONTENT_POLICY: not a text file: {}", .0.display())]
    NotText(PathBuf),

    /// Filesystem operation failed.
    #[error("CACHE_IO: {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No cache metadata stored for the key.
    #[error("CACHE_MISS: {0}")]
    CacheMiss(String),

    /// Cache metadata exists but cannot be decoded.
    #[error("CACHE_CORRUPT: {}: {reason}", path.display())]
    MetadataCorrupt { path: PathBuf, reason: String },

    /// Operation was cancelled.
    #[error("CANCELLED")]
    Cancelled,

    /// A single locator failed inside a batch.
    #[error("failed to process document '{locator}': {source}")]
    Locator {
        locator: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }

    /// Wrap an error with the locator that produced it.
    pub fn for_locator(locator: impl Into<String>, source: Error) -> Self {
        Error::Locator { locator: locator.into(), source: Box::new(source) }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidInput(_)
            | Error::InvalidLocator(_)
            | Error::PathTraversal(_)
            | Error::NotFound(_)
            | Error::NotADirectory(_) => ErrorKind::InvalidLocator,
            Error::Transport(_) | Error::Timeout(_) => ErrorKind::Transport,
            Error::UpstreamStatus { .. } => ErrorKind::UpstreamStatus,
            Error::UnsupportedContentType(_) | Error::TooLarge { .. } | Error::NotText(_) => {
                ErrorKind::ContentPolicy
            }
            Error::Io { .. } | Error::CacheMiss(_) | Error::MetadataCorrupt { .. } => ErrorKind::Filesystem,
            Error::Cancelled => ErrorKind::Cancelled,
            Error::Locator { source, .. } => source.kind(),
        }
    }
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::Locator { source, .. } => code_for(source),
            other => code_for(other),
        };

        McpError { code: ErrorCode(code), message: err.to_string().into(), data: None }
    }
}

fn code_for(err: &Error) -> i32 {
    match err {
        Error::InvalidInput(_) => -32602,
        Error::InvalidLocator(_) | Error::PathTraversal(_) => -32003,
        Error::NotFound(_) | Error::NotADirectory(_) => -32004,
        Error::Transport(_) => -32005,
        Error::Timeout(_) => -32006,
        Error::UpstreamStatus { .. } => -32008,
        Error::UnsupportedContentType(_) | Error::NotText(_) => -32009,
        Error::TooLarge { .. } => -32007,
        Error::CacheMiss(_) => -32001,
        Error::Io { .. } | Error::MetadataCorrupt { .. } => -32002,
        Error::Cancelled => -32010,
        Error::Locator { source, .. } => code_for(source),
    }
}
