//! Content policy for downloaded documents.
//!
//! Two independent gates: the Content-Type must be in a text allow-list, and
//! the body must fit the size limit both as declared and as actually read.

use ragdocs_core::Error;

/// Media types accepted in addition to every `text/*` type.
pub const TEXT_MEDIA_TYPES: &[&str] = &[
    "application/json",
    "application/xml",
    "application/javascript",
    "application/x-yaml",
    "application/yaml",
];

/// Strip parameters and lowercase a Content-Type header value.
pub fn media_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Whether a Content-Type header names a text-like media type.
pub fn is_text_like(content_type: &str) -> bool {
    let media = media_type(content_type);
    match media.strip_prefix("text/") {
        Some(subtype) => !subtype.is_empty(),
        None => TEXT_MEDIA_TYPES.contains(&media.as_str()),
    }
}

/// Reject a response whose Content-Type is missing or not text-like.
pub fn check_content_type(content_type: Option<&str>) -> Result<(), Error> {
    match content_type {
        Some(ct) if is_text_like(ct) => Ok(()),
        Some(ct) => Err(Error::UnsupportedContentType(ct.to_string())),
        None => Err(Error::UnsupportedContentType("<missing>".into())),
    }
}

/// Reject a declared Content-Length over the limit, before reading the body.
pub fn check_declared_length(declared: Option<u64>, limit: u64) -> Result<(), Error> {
    match declared {
        Some(size) if size > limit => Err(Error::TooLarge { size, limit }),
        _ => Ok(()),
    }
}

/// Reject a body whose actual length exceeds the limit.
pub fn check_body_length(actual: usize, limit: u64) -> Result<(), Error> {
    let size = actual as u64;
    if size > limit { Err(Error::TooLarge { size, limit }) } else { Ok(()) }
}

/// Read a response body, stopping once `limit + 1` bytes have been buffered.
///
/// The length is rechecked after reading, so an absent or understated
/// Content-Length cannot smuggle an oversized body through.
pub async fn read_body_capped(mut response: reqwest::Response, limit: u64) -> Result<Vec<u8>, Error> {
    let cap = usize::try_from(limit.saturating_add(1)).unwrap_or(usize::MAX);
    let mut body = Vec::new();

    while let Some(chunk) = response.chunk().await.map_err(crate::fetch::transport_error)? {
        let room = cap - body.len();
        body.extend_from_slice(&chunk[..chunk.len().min(room)]);
        if body.len() >= cap {
            break;
        }
    }

    check_body_length(body.len(), limit)?;
    Ok(body)
}
