//! Upstream configuration and chat-completions wire types.
//!
//! The wire shape is the common chat-completions contract: request
//! `{model, messages, stream, max_tokens}`, response
//! `choices[0].message.content` plus an optional `usage` mapping.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default chat-completions endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.deepseek.com/v1/chat/completions";

/// Default model.
pub const DEFAULT_MODEL: &str = "deepseek-chat";

/// Default token cap per completion.
pub const DEFAULT_MAX_TOKENS: u32 = 2000;

/// Default bound on the whole upstream call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default system role message.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful AI assistant.";

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Upstream client configuration.
#[derive(Clone, Debug)]
pub struct UpstreamConfig {
    /// Chat-completions endpoint URL.
    pub endpoint: String,
    /// Bearer credential.
    pub api_key: String,
    /// Model identifier.
    pub model: String,
    /// Token cap sent with every request.
    pub max_tokens: u32,
    /// Bound on the whole call, connect through body. Mandatory.
    pub timeout: Duration,
    /// Fixed system role message.
    pub system_prompt: String,
}

impl UpstreamConfig {
    /// Config with production defaults for everything but the credential.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_owned(),
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: DEFAULT_TIMEOUT,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_owned(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Request wire
// ─────────────────────────────────────────────────────────────────────────────

/// One role-tagged message in the completion request.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    /// `"system"` or `"user"`.
    pub role: String,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// System role message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_owned(),
            content: content.into(),
        }
    }

    /// User role message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_owned(),
            content: content.into(),
        }
    }
}

/// Chat-completions request body.
#[derive(Clone, Debug, Serialize)]
pub struct CompletionRequest {
    /// Model identifier.
    pub model: String,
    /// System prompt followed by the user message.
    pub messages: Vec<ChatMessage>,
    /// Always `false` — the relay does not stream.
    pub stream: bool,
    /// Token cap.
    pub max_tokens: u32,
}

// ─────────────────────────────────────────────────────────────────────────────
// Response wire
// ─────────────────────────────────────────────────────────────────────────────

/// Chat-completions response body. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    /// Completion choices; the relay reads the first.
    #[serde(default)]
    pub choices: Vec<CompletionChoice>,
    /// Token-count metadata, passed through opaquely.
    #[serde(default)]
    pub usage: Option<Value>,
}

/// One completion choice.
#[derive(Debug, Deserialize)]
pub struct CompletionChoice {
    /// The generated message.
    pub message: ChoiceMessage,
}

/// The message inside a completion choice.
#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    /// Generated text.
    pub content: String,
}

/// A successful completion, reduced to what the relay forwards.
#[derive(Clone, Debug)]
pub struct Completion {
    /// The model's reply text.
    pub content: String,
    /// Upstream `usage` mapping, when present.
    pub usage: Option<Value>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serializes_expected_shape() {
        let req = CompletionRequest {
            model: DEFAULT_MODEL.to_owned(),
            messages: vec![
                ChatMessage::system(DEFAULT_SYSTEM_PROMPT),
                ChatMessage::user("hi"),
            ],
            stream: false,
            max_tokens: DEFAULT_MAX_TOKENS,
        };
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["model"], "deepseek-chat");
        assert_eq!(v["stream"], false);
        assert_eq!(v["max_tokens"], 2000);
        assert_eq!(v["messages"][0]["role"], "system");
        assert_eq!(v["messages"][1], json!({"role": "user", "content": "hi"}));
    }

    #[test]
    fn response_parses_choice_content_and_usage() {
        let resp: CompletionResponse = serde_json::from_value(json!({
            "id": "cmpl-1",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "hello"}}],
            "usage": {"prompt_tokens": 9, "completion_tokens": 3}
        }))
        .unwrap();
        assert_eq!(resp.choices[0].message.content, "hello");
        assert_eq!(resp.usage.unwrap()["completion_tokens"], 3);
    }

    #[test]
    fn response_without_usage_parses() {
        let resp: CompletionResponse = serde_json::from_value(json!({
            "choices": [{"message": {"content": "ok"}}]
        }))
        .unwrap();
        assert!(resp.usage.is_none());
    }

    #[test]
    fn response_without_choices_parses_to_empty() {
        let resp: CompletionResponse = serde_json::from_value(json!({"object": "error"})).unwrap();
        assert!(resp.choices.is_empty());
    }

    #[test]
    fn config_defaults() {
        let cfg = UpstreamConfig::new("sk-test");
        assert_eq!(cfg.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(cfg.model, DEFAULT_MODEL);
        assert_eq!(cfg.max_tokens, 2000);
        assert_eq!(cfg.timeout, Duration::from_secs(30));
    }
}
