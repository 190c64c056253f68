//! # relay-llm
//!
//! The upstream chat-completions client: one bounded POST per inbound
//! request, no retries, no streaming. The outcome of every attempt is
//! exactly one of [`Completion`] or [`CompletionError`] — the `Result`
//! makes the "one of two variants" invariant total.
//!
//! ## Crate Position
//!
//! Depends on `relay-core` for excerpt truncation. Knows nothing about
//! the HTTP surface; the server maps [`CompletionError`] onto wire errors.

#![deny(unsafe_code)]

pub mod client;
pub mod error;
pub mod types;

pub use client::ChatCompletionsClient;
pub use error::CompletionError;
pub use types::{Completion, UpstreamConfig};

/// Upstream requests attempted (counter).
pub const UPSTREAM_REQUESTS_TOTAL: &str = "upstream_requests_total";
/// Upstream failures (counter, labels: kind).
pub const UPSTREAM_ERRORS_TOTAL: &str = "upstream_errors_total";
/// Upstream call latency in seconds (histogram).
pub const UPSTREAM_REQUEST_DURATION_SECONDS: &str = "upstream_request_duration_seconds";
