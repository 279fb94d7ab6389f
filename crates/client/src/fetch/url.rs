//! Locator validation for remote documents.
//!
//! Unlike a canonicalizer this never rewrites the input: cache keys are
//! derived from the exact locator string, so the parsed URL is only used to
//! issue the request.

/// Error type for remote locator validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlError {
    #[error("empty URL")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("missing host")]
    MissingHost,

    #[error("failed to parse: {0}")]
    InvalidUrl(String),
}

/// Check that a locator is an http(s) URL with a non-empty host.
///
/// Runs before any network I/O.
pub fn validate_locator(input: &str) -> Result<url::Url, UrlError> {
    if input.trim().is_empty() {
        return Err(UrlError::Empty);
    }

    let parsed = url::Url::parse(input).map_err(|e| match e {
        url::ParseError::EmptyHost => UrlError::MissingHost,
        other => UrlError::InvalidUrl(other.to_string()),
    })?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlError::UnsupportedScheme(scheme.to_string())),
    }

    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(parsed),
        _ => Err(UrlError::MissingHost),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_basic() {
        let url = validate_locator("https://example.com/a.txt").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("example.com"));
    }

    #[test]
    fn test_validate_http_allowed() {
        let url = validate_locator("http://example.com").unwrap();
        assert_eq!(url.scheme(), "http");
    }

    #[test]
    fn test_validate_preserves_query() {
        let url = validate_locator("https://example.com/doc?b=2&a=1").unwrap();
        assert_eq!(url.query(), Some("b=2&a=1"));
    }

    #[test]
    fn test_validate_unsupported_scheme() {
        assert!(matches!(validate_locator("file:///etc/passwd"), Err(UrlError::UnsupportedScheme(s)) if s == "file"));
        assert!(matches!(validate_locator("ftp://example.com/a"), Err(UrlError::UnsupportedScheme(_))));
    }

    #[test]
    fn test_validate_missing_host() {
        assert_eq!(validate_locator("http://"), Err(UrlError::MissingHost));
    }

    #[test]
    fn test_validate_no_scheme() {
        assert!(matches!(validate_locator("example.com/a.txt"), Err(UrlError::InvalidUrl(_))));
    }

    #[test]
    fn test_validate_empty() {
        assert_eq!(validate_locator(""), Err(UrlError::Empty));
        assert_eq!(validate_locator("   "), Err(UrlError::Empty));
    }
}
