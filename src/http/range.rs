//! Range header resolution.
//!
//! Resolves a single `bytes=` range against a known body size. Multi-range
//! requests, non-byte units and invalid ranges are served as full responses
//! rather than rejected, which is what RFC 9110 prescribes for ranges a
//! server does not support or cannot parse.

/// A resolved byte range, both bounds inclusive and within the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: usize,
    pub end: usize,
}

impl ByteRange {
    /// Number of bytes the range covers.
    pub const fn byte_len(&self) -> usize {
        self.end - self.start + 1
    }
}

/// What a `Range` header means for this response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeOutcome {
    /// No usable range; send the whole body with 200.
    Full,
    /// A satisfiable range; send 206 with this slice.
    Partial(ByteRange),
    /// A syntactically valid range that cannot be satisfied; send 416.
    Unsatisfiable,
}

/// Resolve an optional `Range` header value against a body of `size` bytes.
pub fn resolve(header: Option<&str>, size: usize) -> RangeOutcome {
    let Some(spec) = header.and_then(|h| h.strip_prefix("bytes=")) else {
        return RangeOutcome::Full;
    };

    // Only single ranges are supported; a multi-range request gets the
    // full body, not an error.
    if spec.contains(',') {
        return RangeOutcome::Full;
    }

    let Some((start_text, end_text)) = spec.split_once('-') else {
        return RangeOutcome::Full;
    };
    let (start_text, end_text) = (start_text.trim(), end_text.trim());

    if start_text.is_empty() {
        resolve_suffix(end_text, size)
    } else {
        resolve_bounded(start_text, end_text, size)
    }
}

/// `bytes=-N`: the final N bytes.
fn resolve_suffix(suffix_text: &str, size: usize) -> RangeOutcome {
    let Ok(suffix) = suffix_text.parse::<usize>() else {
        return RangeOutcome::Full;
    };
    if suffix == 0 || size == 0 {
        return RangeOutcome::Unsatisfiable;
    }
    RangeOutcome::Partial(ByteRange {
        start: size.saturating_sub(suffix),
        end: size - 1,
    })
}

/// `bytes=N-` or `bytes=N-M`: from N to the end, or N through M clamped.
fn resolve_bounded(start_text: &str, end_text: &str, size: usize) -> RangeOutcome {
    let Ok(start) = start_text.parse::<usize>() else {
        return RangeOutcome::Full;
    };

    let end = if end_text.is_empty() {
        usize::MAX
    } else {
        let Ok(end) = end_text.parse::<usize>() else {
            return RangeOutcome::Full;
        };
        end
    };

    // An inverted range is invalid syntax, so the header is ignored
    if end < start {
        return RangeOutcome::Full;
    }
    if start >= size {
        return RangeOutcome::Unsatisfiable;
    }

    RangeOutcome::Partial(ByteRange {
        start,
        end: end.min(size - 1),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_header_is_full() {
        assert_eq!(resolve(None, 100), RangeOutcome::Full);
    }

    #[test]
    fn test_bounded_range() {
        let outcome = resolve(Some("bytes=0-9"), 100);
        assert_eq!(
            outcome,
            RangeOutcome::Partial(ByteRange { start: 0, end: 9 })
        );
        if let RangeOutcome::Partial(range) = outcome {
            assert_eq!(range.byte_len(), 10);
        }
    }

    #[test]
    fn test_open_range_runs_to_end() {
        assert_eq!(
            resolve(Some("bytes=90-"), 100),
            RangeOutcome::Partial(ByteRange { start: 90, end: 99 })
        );
    }

    #[test]
    fn test_end_is_clamped_to_body() {
        assert_eq!(
            resolve(Some("bytes=50-5000"), 100),
            RangeOutcome::Partial(ByteRange { start: 50, end: 99 })
        );
    }

    #[test]
    fn test_suffix_range() {
        assert_eq!(
            resolve(Some("bytes=-25"), 100),
            RangeOutcome::Partial(ByteRange { start: 75, end: 99 })
        );
        // Suffix longer than the body covers the whole body
        assert_eq!(
            resolve(Some("bytes=-500"), 100),
            RangeOutcome::Partial(ByteRange { start: 0, end: 99 })
        );
    }

    #[test]
    fn test_unsatisfiable() {
        assert_eq!(resolve(Some("bytes=100-"), 100), RangeOutcome::Unsatisfiable);
        assert_eq!(resolve(Some("bytes=-0"), 100), RangeOutcome::Unsatisfiable);
        assert_eq!(resolve(Some("bytes=0-"), 0), RangeOutcome::Unsatisfiable);
    }

    #[test]
    fn test_inverted_range_is_ignored() {
        assert_eq!(resolve(Some("bytes=5-2"), 100), RangeOutcome::Full);
        // Invalid even when the start is also past the end of the body
        assert_eq!(resolve(Some("bytes=200-100"), 100), RangeOutcome::Full);
    }

    #[test]
    fn test_malformed_and_unsupported_fall_back_to_full() {
        assert_eq!(resolve(Some("bytes=a-b"), 100), RangeOutcome::Full);
        assert_eq!(resolve(Some("bytes=0-9,20-29"), 100), RangeOutcome::Full);
        assert_eq!(resolve(Some("items=0-9"), 100), RangeOutcome::Full);
        assert_eq!(resolve(Some("bytes=09"), 100), RangeOutcome::Full);
    }
}
