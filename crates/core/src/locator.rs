//! Document locator classification.

use std::io::ErrorKind as IoErrorKind;
use std::path::PathBuf;

use crate::Error;
use crate::path::validate_path;

/// A classified document source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentLocator {
    /// Anything with a scheme. Only http(s) survives download validation.
    RemoteUrl(String),
    /// Existing local file, absolute.
    LocalFile(PathBuf),
    /// Existing local directory, absolute.
    LocalDirectory(PathBuf),
}

impl DocumentLocator {
    /// Classify a raw locator string.
    ///
    /// Strings with a `scheme://` prefix are remote. Everything else is a
    /// local path: it is checked for traversal, made absolute, and stat'ed.
    ///
    /// # Errors
    ///
    /// - `Error::PathTraversal` if a local path contains `..`
    /// - `Error::NotFound` if the local path does not exist
    /// - `Error::Io` if it cannot be stat'ed
    pub async fn classify(raw: &str) -> Result<Self, Error> {
        if is_remote(raw) {
            return Ok(DocumentLocator::RemoteUrl(raw.to_string()));
        }

        let path = PathBuf::from(raw);
        validate_path(&path)?;
        let abs = std::path::absolute(&path).map_err(|e| Error::io(&path, e))?;

        let meta = match tokio::fs::metadata(&abs).await {
            Ok(meta) => meta,
            Err(e) if e.kind() == IoErrorKind::NotFound => return Err(Error::NotFound(abs)),
            Err(e) => return Err(Error::io(abs, e)),
        };

        if meta.is_dir() { Ok(DocumentLocator::LocalDirectory(abs)) } else { Ok(DocumentLocator::LocalFile(abs)) }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            DocumentLocator::RemoteUrl(_) => "url",
            DocumentLocator::LocalFile(_) => "file",
            DocumentLocator::LocalDirectory(_) => "directory",
        }
    }
}

fn is_remote(raw: &str) -> bool {
    match raw.split_once("://") {
        Some((scheme, _)) => {
            !scheme.is_empty()
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_classify_url() {
        let locator = DocumentLocator::classify("https://example.com/a.txt").await.unwrap();
        assert_eq!(locator, DocumentLocator::RemoteUrl("https://example.com/a.txt".into()));

        let locator = DocumentLocator::classify("ftp://example.com/a.txt").await.unwrap();
        assert_eq!(locator.kind_name(), "url");
    }

    #[tokio::test]
    async fn test_classify_file_and_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.txt");
        std::fs::write(&file, "hello").unwrap();

        let locator = DocumentLocator::classify(file.to_str().unwrap()).await.unwrap();
        assert_eq!(locator, DocumentLocator::LocalFile(file));

        let locator = DocumentLocator::classify(dir.path().to_str().unwrap()).await.unwrap();
        assert_eq!(locator, DocumentLocator::LocalDirectory(dir.path().to_path_buf()));
    }

    #[tokio::test]
    async fn test_classify_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.txt");
        let result = DocumentLocator::classify(missing.to_str().unwrap()).await;
        assert!(matches!(result, Err(Error::NotFound(p)) if p == missing));
    }

    #[tokio::test]
    async fn test_classify_traversal() {
        let result = DocumentLocator::classify("docs/../../etc/passwd").await;
        assert!(matches!(result, Err(Error::PathTraversal(_))));
    }

    #[test]
    fn test_is_remote() {
        assert!(is_remote("http://example.com"));
        assert!(is_remote("git+ssh://host/repo"));
        assert!(!is_remote("docs/readme.md"));
        assert!(!is_remote("://nothing"));
        assert!(!is_remote("weird dir://x"));
    }
}
