//! Chat-completions client.
//!
//! One bounded POST per call. No retries and no streaming: retry policy
//! belongs to the caller's side of the contract, and a second attempt
//! here would double-charge the token budget on flaky networks.

use std::time::Instant;

use metrics::{counter, histogram};
use tracing::{debug, error, instrument};

use relay_core::errors::UPSTREAM_DETAIL_MAX_BYTES;
use relay_core::text::truncate_str;

use crate::error::CompletionError;
use crate::types::{
    ChatMessage, Completion, CompletionRequest, CompletionResponse, UpstreamConfig,
};
use crate::{UPSTREAM_ERRORS_TOTAL, UPSTREAM_REQUESTS_TOTAL, UPSTREAM_REQUEST_DURATION_SECONDS};

/// Client for the upstream chat-completions endpoint.
///
/// Cheap to clone; the inner `reqwest::Client` is an `Arc` around a
/// connection pool shared across concurrent requests.
#[derive(Clone)]
pub struct ChatCompletionsClient {
    config: UpstreamConfig,
    client: reqwest::Client,
}

impl ChatCompletionsClient {
    /// Create a new client with its own connection pool.
    #[must_use]
    pub fn new(config: UpstreamConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Create a new client with a shared HTTP client.
    #[must_use]
    pub fn with_client(config: UpstreamConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    /// The configured model identifier.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Build the request body: fixed system prompt, then the user message.
    fn build_request(&self, user_message: &str) -> CompletionRequest {
        CompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage::system(self.config.system_prompt.clone()),
                ChatMessage::user(user_message),
            ],
            stream: false,
            max_tokens: self.config.max_tokens,
        }
    }

    /// Request one completion for `user_message`.
    ///
    /// The whole call — connect, request, response body — is bounded by
    /// `config.timeout`. An unbounded call would pin a handler task for
    /// as long as a stalled upstream keeps the connection open.
    #[instrument(skip_all, fields(model = %self.config.model))]
    pub async fn complete(&self, user_message: &str) -> Result<Completion, CompletionError> {
        let request = self.build_request(user_message);

        debug!(
            model = %request.model,
            max_tokens = request.max_tokens,
            timeout_ms = self.config.timeout.as_millis() as u64,
            "sending completion request"
        );
        counter!(UPSTREAM_REQUESTS_TOTAL).increment(1);
        let started = Instant::now();

        let result = self.complete_inner(&request).await;
        histogram!(UPSTREAM_REQUEST_DURATION_SECONDS).record(started.elapsed().as_secs_f64());

        if let Err(err) = &result {
            counter!(UPSTREAM_ERRORS_TOTAL, "kind" => err.kind()).increment(1);
        }
        result
    }

    async fn complete_inner(
        &self,
        request: &CompletionRequest,
    ) -> Result<Completion, CompletionError> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .timeout(self.config.timeout)
            .json(request)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body_excerpt = truncate_str(&body, UPSTREAM_DETAIL_MAX_BYTES).to_owned();
            error!(status = status.as_u16(), "upstream completion error");
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body_excerpt,
            });
        }

        let parsed: CompletionResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                CompletionError::Timeout
            } else {
                CompletionError::MalformedBody(e.to_string())
            }
        })?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| CompletionError::MalformedBody("no choices in completion".to_owned()))?;

        debug!(content_len = choice.message.content.len(), "completion received");
        Ok(Completion {
            content: choice.message.content,
            usage: parsed.usage,
        })
    }
}

/// Classify a `send()` failure: the elapsed bound vs. everything else.
fn classify_transport_error(err: reqwest::Error) -> CompletionError {
    if err.is_timeout() {
        CompletionError::Timeout
    } else {
        CompletionError::Network(err.to_string())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(endpoint: String) -> UpstreamConfig {
        UpstreamConfig {
            endpoint,
            timeout: Duration::from_millis(500),
            ..UpstreamConfig::new("test-key")
        }
    }

    async fn mock_upstream() -> MockServer {
        MockServer::start().await
    }

    fn completion_body(content: &str) -> serde_json::Value {
        json!({
            "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}],
            "usage": {"prompt_tokens": 9, "completion_tokens": 4, "total_tokens": 13}
        })
    }

    // ── request building ────────────────────────────────────────────────

    #[test]
    fn build_request_system_then_user() {
        let client = ChatCompletionsClient::new(UpstreamConfig::new("k"));
        let req = client.build_request("hi there");
        assert_eq!(req.messages.len(), 2);
        assert_eq!(req.messages[0], ChatMessage::system(crate::types::DEFAULT_SYSTEM_PROMPT));
        assert_eq!(req.messages[1], ChatMessage::user("hi there"));
        assert!(!req.stream);
        assert_eq!(req.max_tokens, 2000);
    }

    // ── happy path ──────────────────────────────────────────────────────

    #[tokio::test]
    async fn complete_returns_first_choice_content() {
        let server = mock_upstream().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({"stream": false, "model": "deepseek-chat"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("hello")))
            .expect(1)
            .mount(&server)
            .await;

        let client = ChatCompletionsClient::new(test_config(format!(
            "{}/v1/chat/completions",
            server.uri()
        )));
        let completion = client.complete("hi").await.unwrap();
        assert_eq!(completion.content, "hello");
        assert_eq!(completion.usage.unwrap()["total_tokens"], 13);
    }

    #[tokio::test]
    async fn complete_without_usage_yields_none() {
        let server = mock_upstream().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "ok"}}]
            })))
            .mount(&server)
            .await;

        let client = ChatCompletionsClient::new(test_config(server.uri()));
        let completion = client.complete("hi").await.unwrap();
        assert!(completion.usage.is_none());
    }

    // ── failure classification ──────────────────────────────────────────

    #[tokio::test]
    async fn non_success_status_carries_capped_excerpt() {
        let server = mock_upstream().await;
        let long_body = "x".repeat(500);
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string(long_body))
            .mount(&server)
            .await;

        let client = ChatCompletionsClient::new(test_config(server.uri()));
        let err = client.complete("hi").await.unwrap_err();
        match err {
            CompletionError::Status {
                status,
                body_excerpt,
            } => {
                assert_eq!(status, 503);
                assert_eq!(body_excerpt.len(), UPSTREAM_DETAIL_MAX_BYTES);
            }
            other => panic!("expected Status, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn slow_upstream_times_out_within_bound() {
        let server = mock_upstream().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion_body("late"))
                    .set_delay(Duration::from_secs(10)),
            )
            .mount(&server)
            .await;

        let client = ChatCompletionsClient::new(test_config(server.uri()));
        let started = Instant::now();
        let err = client.complete("hi").await.unwrap_err();
        assert!(matches!(err, CompletionError::Timeout), "got {err:?}");
        assert!(
            started.elapsed() < Duration::from_secs(5),
            "timeout must fire near the configured bound"
        );
    }

    #[tokio::test]
    async fn connection_refused_is_network_error() {
        // Nothing listens on this port.
        let client = ChatCompletionsClient::new(test_config(
            "http://127.0.0.1:9/v1/chat/completions".to_owned(),
        ));
        let err = client.complete("hi").await.unwrap_err();
        assert!(matches!(err, CompletionError::Network(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn unexpected_body_is_malformed() {
        let server = mock_upstream().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = ChatCompletionsClient::new(test_config(server.uri()));
        let err = client.complete("hi").await.unwrap_err();
        assert!(matches!(err, CompletionError::MalformedBody(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn empty_choices_is_malformed() {
        let server = mock_upstream().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let client = ChatCompletionsClient::new(test_config(server.uri()));
        let err = client.complete("hi").await.unwrap_err();
        assert!(matches!(err, CompletionError::MalformedBody(_)), "got {err:?}");
    }
}
