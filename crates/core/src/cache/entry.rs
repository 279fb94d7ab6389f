//! Cache metadata stored next to each downloaded document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata for one cached document, serialized to `{key}.meta.json`.
///
/// `etag` and `last_modified` are the HTTP validators used for conditional
/// revalidation. Empty validators are omitted from the JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CacheEntry {
    /// Locator the document was downloaded from.
    pub url: String,
    pub downloaded_at: DateTime<Utc>,
    /// SHA-256 of the bytes written to disk.
    pub content_hash: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub etag: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub last_modified: String,
    pub content_type: String,
    pub size: u64,
}

impl CacheEntry {
    /// Whether the entry carries an ETag or Last-Modified value.
    pub fn has_validators(&self) -> bool {
        !self.etag.is_empty() || !self.last_modified.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(etag: &str, last_modified: &str) -> CacheEntry {
        CacheEntry {
            url: "https://example.com/doc.txt".into(),
            downloaded_at: Utc::now(),
            content_hash: "abc".into(),
            etag: etag.into(),
            last_modified: last_modified.into(),
            content_type: "text/plain".into(),
            size: 3,
        }
    }

    #[test]
    fn test_has_validators() {
        assert!(!entry("", "").has_validators());
        assert!(entry("\"v1\"", "").has_validators());
        assert!(entry("", "Mon, 01 Jan 2024 00:00:00 GMT").has_validators());
    }

    #[test]
    fn test_empty_validators_omitted() {
        let json = serde_json::to_value(entry("", "")).unwrap();
        assert!(json.get("etag").is_none());
        assert!(json.get("last_modified").is_none());
        assert_eq!(json["content_type"], "text/plain");
        assert_eq!(json["size"], 3);
    }

    #[test]
    fn test_decodes_without_validators() {
        let json = r#"{
            "url": "https://example.com/doc.txt",
            "downloaded_at": "2024-01-01T00:00:00Z",
            "content_hash": "abc",
            "content_type": "text/plain",
            "size": 3
        }"#;
        let parsed: CacheEntry = serde_json::from_str(json).unwrap();
        assert!(parsed.etag.is_empty());
        assert!(!parsed.has_validators());
    }
}
