//! Typed upstream failures.

use thiserror::Error;

/// Why an upstream completion attempt failed.
///
/// Exactly one variant per failed attempt; the server owns the mapping
/// onto HTTP statuses and wire bodies.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// The bounded wait elapsed before the upstream finished answering.
    #[error("upstream request timed out")]
    Timeout,

    /// Connection-level failure: refused, DNS, TLS.
    #[error("upstream network error: {0}")]
    Network(String),

    /// The upstream answered with a non-success status.
    #[error("upstream returned status {status}")]
    Status {
        /// HTTP status the upstream returned.
        status: u16,
        /// Char-boundary-safe excerpt of the upstream body.
        body_excerpt: String,
    },

    /// The upstream answered 200 but the body was not a completion.
    #[error("malformed completion body: {0}")]
    MalformedBody(String),
}

impl CompletionError {
    /// Stable label for metrics and logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Network(_) => "network",
            Self::Status { .. } => "status",
            Self::MalformedBody(_) => "malformed_body",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_stable() {
        assert_eq!(CompletionError::Timeout.kind(), "timeout");
        assert_eq!(CompletionError::Network("x".into()).kind(), "network");
        assert_eq!(
            CompletionError::Status {
                status: 503,
                body_excerpt: String::new()
            }
            .kind(),
            "status"
        );
        assert_eq!(CompletionError::MalformedBody("x".into()).kind(), "malformed_body");
    }

    #[test]
    fn status_display_names_the_code() {
        let err = CompletionError::Status {
            status: 429,
            body_excerpt: "slow down".into(),
        };
        assert_eq!(err.to_string(), "upstream returned status 429");
    }
}
