//! Relay error taxonomy.
//!
//! Every failed `/chat` request maps onto exactly one variant. The mapping
//! to an HTTP status is total — the server never invents a status outside
//! this table, and no variant is retried or fatal to the process.

use thiserror::Error;

/// Maximum number of bytes of an upstream error body carried in `details`.
pub const UPSTREAM_DETAIL_MAX_BYTES: usize = 200;

/// A failed relay request.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Caller's fault: absent body, bad JSON, missing or empty `message`.
    #[error("{0}")]
    Validation(String),

    /// No upstream credential configured. Fast-fail, no network call.
    #[error("API key not configured")]
    MissingApiKey,

    /// The upstream did not answer within the configured window.
    #[error("Request timeout")]
    UpstreamTimeout,

    /// Connection refused, DNS failure, TLS failure, and the like.
    #[error("Network error: {0}")]
    UpstreamNetwork(String),

    /// The upstream answered with a non-success status.
    #[error("API request failed: {status}")]
    UpstreamStatus {
        /// Status code the upstream returned.
        status: u16,
        /// First [`UPSTREAM_DETAIL_MAX_BYTES`] of the upstream body.
        details: String,
    },

    /// The upstream answered 200 but the body was not a completion.
    #[error("Upstream response malformed")]
    UpstreamMalformed(String),

    /// Catch-all. Never escapes as a panic or a dropped connection.
    #[error("{0}")]
    Internal(String),
}

impl RelayError {
    /// HTTP status for this error. Total over all variants.
    #[must_use]
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::UpstreamTimeout => 504,
            Self::MissingApiKey
            | Self::UpstreamNetwork(_)
            | Self::UpstreamStatus { .. }
            | Self::UpstreamMalformed(_)
            | Self::Internal(_) => 500,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
