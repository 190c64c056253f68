//! Error-to-response mapping.
//!
//! The single place where [`RelayError`] variants become HTTP statuses
//! and JSON bodies. The match is exhaustive — adding a variant without
//! deciding its wire shape is a compile error.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use relay_core::RelayError;
use relay_core::wire::ErrorBody;
use relay_llm::CompletionError;
use relay_settings::FallbackMessages;

/// Map a typed upstream failure onto the relay taxonomy.
pub fn map_completion_error(err: CompletionError) -> RelayError {
    match err {
        CompletionError::Timeout => RelayError::UpstreamTimeout,
        CompletionError::Network(detail) => RelayError::UpstreamNetwork(detail),
        CompletionError::Status {
            status,
            body_excerpt,
        } => RelayError::UpstreamStatus {
            status,
            details: body_excerpt,
        },
        CompletionError::MalformedBody(detail) => RelayError::UpstreamMalformed(detail),
    }
}

/// Render a [`RelayError`] as its HTTP response.
pub fn relay_error_response(err: &RelayError, fallback: &FallbackMessages) -> Response {
    let mut body = ErrorBody::new(err.to_string());
    if let RelayError::UpstreamStatus { details, .. } = err {
        body = body.with_details(details.clone());
    }
    if let Some(text) = fallback_text(err, fallback) {
        body = body.with_response(text);
    }
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(body)).into_response()
}

/// User-facing fallback text for errors that reach an end user
/// mid-conversation. Validation failures and the internal catch-all
/// carry only the `error` field.
fn fallback_text<'a>(err: &RelayError, fallback: &'a FallbackMessages) -> Option<&'a str> {
    match err {
        RelayError::MissingApiKey => Some(&fallback.missing_api_key),
        RelayError::UpstreamTimeout => Some(&fallback.timeout),
        RelayError::UpstreamNetwork(_) => Some(&fallback.network),
        RelayError::UpstreamStatus { .. } => Some(&fallback.upstream_error),
        RelayError::UpstreamMalformed(_) => Some(&fallback.malformed),
        RelayError::Validation(_) | RelayError::Internal(_) => None,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
