//! JSON bodies of the inbound HTTP surface.
//!
//! All shapes are fixed contract: front-ends pattern-match on these keys.
//! Optional fields are omitted (not `null`) when absent.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /chat`.
///
/// `message` is an `Option` so that a missing field still deserializes —
/// the handler distinguishes "body is not JSON" from "message is missing"
/// for the error text.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ChatRequest {
    /// The user's message. Required, non-empty.
    #[serde(default)]
    pub message: Option<String>,
}

/// Success body of `POST /chat`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatReply {
    /// The model's reply text.
    pub response: String,
    /// Always `"success"` on this path.
    pub status: String,
    /// Upstream token-usage mapping, passed through opaquely. `{}` when
    /// the upstream omitted it.
    pub usage: Value,
}

impl ChatReply {
    /// Build a success reply, substituting `{}` for absent usage.
    #[must_use]
    pub fn new(response: String, usage: Option<Value>) -> Self {
        Self {
            response,
            status: "success".to_owned(),
            usage: usage.unwrap_or_else(|| Value::Object(serde_json::Map::new())),
        }
    }
}

/// Error body of `POST /chat` (and any other failed route).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Machine-matchable error message. Always present.
    pub error: String,
    /// Excerpt of the upstream body, only on upstream status failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// User-facing fallback text a front-end can render directly.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

impl ErrorBody {
    /// Error body with only the `error` field.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
            response: None,
        }
    }

    /// Attach the user-facing fallback text.
    #[must_use]
    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.response = Some(response.into());
        self
    }

    /// Attach the upstream body excerpt.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
