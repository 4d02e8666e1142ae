//! Conditional request support.
//!
//! `ETag` generation for static responses and `If-None-Match` evaluation.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Compute the `ETag` for a response body.
///
/// The tag combines content length and a content hash, both in hex,
/// already wrapped in the quotes the header requires.
pub fn etag_for(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    format!("\"{:x}-{:x}\"", content.len(), hasher.finish())
}

/// Decide whether an `If-None-Match` header revalidates against `etag`.
///
/// The header may carry a single tag, a comma-separated list, or the `*`
/// wildcard. A hit means the client cache is current and 304 applies.
pub fn revalidates(if_none_match: Option<&str>, etag: &str) -> bool {
    let Some(candidates) = if_none_match else {
        return false;
    };

    candidates.split(',').any(|candidate| {
        let candidate = candidate.trim();
        // Weak validators compare equal on the opaque part
        let candidate = candidate.strip_prefix("W/").unwrap_or(candidate);
        candidate == "*" || candidate == etag
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_etag_is_quoted_and_stable() {
        let first = etag_for(b"demo page");
        let second = etag_for(b"demo page");
        assert_eq!(first, second);
        assert!(first.starts_with('"') && first.ends_with('"'));
    }

    #[test]
    fn test_etag_changes_with_content() {
        assert_ne!(etag_for(b"index v1"), etag_for(b"index v2"));
    }

    #[test]
    fn test_etag_encodes_length() {
        // 16 bytes -> the "10" hex length prefix
        let tag = etag_for(&[0u8; 16]);
        assert!(tag.starts_with("\"10-"));
    }

    #[test]
    fn test_revalidation() {
        let etag = "\"a1-b2\"";
        assert!(revalidates(Some("\"a1-b2\""), etag));
        assert!(revalidates(Some("\"zz\", \"a1-b2\""), etag));
        assert!(revalidates(Some("*"), etag));
        assert!(revalidates(Some("W/\"a1-b2\""), etag));
        assert!(!revalidates(Some("\"other\""), etag));
        assert!(!revalidates(None, etag));
    }
}
