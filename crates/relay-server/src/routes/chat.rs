//! The relay handler: `POST /chat`.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use metrics::counter;
use tracing::{instrument, warn};

use relay_core::RelayError;
use relay_core::wire::{ChatReply, ChatRequest};

use crate::error::{map_completion_error, relay_error_response};
use crate::metrics::{RELAY_ERRORS_TOTAL, RELAY_REQUESTS_TOTAL};
use crate::state::AppState;

/// Relay one chat message to the upstream completion API.
///
/// The body is taken as raw bytes rather than through the `Json`
/// extractor so the 400 texts stay under this handler's control
/// ("Request body is required" vs. "Message is required").
#[instrument(skip_all)]
pub async fn chat(State(state): State<AppState>, body: Bytes) -> Response {
    counter!(RELAY_REQUESTS_TOTAL).increment(1);
    match handle_chat(&state, &body).await {
        Ok(reply) => (StatusCode::OK, Json(reply)).into_response(),
        Err(err) => {
            warn!(error = %err, status = err.http_status(), "chat request failed");
            counter!(RELAY_ERRORS_TOTAL, "status" => err.http_status().to_string()).increment(1);
            relay_error_response(&err, &state.settings.fallback)
        }
    }
}

/// Validate → forward → reshape. Every failure is a [`RelayError`]; the
/// caller owns the wire mapping.
async fn handle_chat(state: &AppState, body: &[u8]) -> Result<ChatReply, RelayError> {
    let request: ChatRequest = serde_json::from_slice(body)
        .map_err(|_| RelayError::Validation("Request body is required".to_owned()))?;

    let message = request
        .message
        .filter(|m| !m.is_empty())
        .ok_or_else(|| RelayError::Validation("Message is required".to_owned()))?;

    // Fast-fail before any network call when no credential is configured.
    let Some(client) = &state.upstream else {
        return Err(RelayError::MissingApiKey);
    };

    let completion = client
        .complete(&message)
        .await
        .map_err(map_completion_error)?;

    Ok(ChatReply::new(completion.content, completion.usage))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
