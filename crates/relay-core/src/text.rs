//! UTF-8–safe string truncation.
//!
//! Rust `&str[..n]` panics when `n` falls inside a multi-byte character.
//! Upstream error bodies are arbitrary text, so the excerpt carried in
//! `details` must snap to the nearest char boundary.

/// Truncate a string to at most `max_bytes` bytes at a char boundary.
///
/// Returns the longest prefix of `s` whose byte length is ≤ `max_bytes`
/// and that does not split a multi-byte character.
#[inline]
#[must_use]
pub fn truncate_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    // `floor_char_boundary` is nightly-only, so implement it ourselves.
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_within_limit() {
        assert_eq!(truncate_str("hello", 10), "hello");
    }

    #[test]
    fn ascii_exact_limit() {
        assert_eq!(truncate_str("hello", 5), "hello");
    }

    #[test]
    fn ascii_truncated() {
        assert_eq!(truncate_str("hello world", 5), "hello");
    }

    #[test]
    fn multibyte_boundary_snaps_back() {
        // '—' is 3 bytes; a cut at byte 3 would split it
        assert_eq!(truncate_str("ab—cd", 3), "ab");
        assert_eq!(truncate_str("ab—cd", 5), "ab—");
    }

    #[test]
    fn empty_string() {
        assert_eq!(truncate_str("", 5), "");
    }

    #[test]
    fn zero_budget() {
        assert_eq!(truncate_str("hello", 0), "");
    }

    #[test]
    fn detail_cap_holds_for_long_bodies() {
        let body = "x".repeat(1000);
        let excerpt = truncate_str(&body, crate::errors::UPSTREAM_DETAIL_MAX_BYTES);
        assert_eq!(excerpt.len(), 200);
    }
}
