//! Shared router state.

use std::sync::Arc;
use std::time::Duration;

use metrics_exporter_prometheus::PrometheusHandle;

use relay_llm::{ChatCompletionsClient, UpstreamConfig};
use relay_settings::RelaySettings;

/// State injected into every handler.
///
/// Settings are loaded once at startup and never mutated; handlers read
/// them through the `Arc`. Cloned per-request by axum, so everything here
/// must stay cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Immutable process configuration.
    pub settings: Arc<RelaySettings>,
    /// Upstream client. `None` when no credential is configured, in which
    /// case `/chat` fast-fails without touching the network.
    pub upstream: Option<ChatCompletionsClient>,
    /// Prometheus render handle, absent when no recorder is installed
    /// (unit tests, embedded use).
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Build state from loaded settings.
    ///
    /// An empty-string credential counts as unconfigured — the original
    /// deployment surfaced `API_KEY=""` in exactly the same way as an
    /// unset variable.
    #[must_use]
    pub fn from_settings(settings: RelaySettings) -> Self {
        let upstream = settings
            .upstream
            .api_key
            .as_ref()
            .filter(|key| !key.is_empty())
            .map(|key| {
                ChatCompletionsClient::new(UpstreamConfig {
                    endpoint: settings.upstream.endpoint.clone(),
                    api_key: key.clone(),
                    model: settings.upstream.model.clone(),
                    max_tokens: settings.upstream.max_tokens,
                    timeout: Duration::from_secs(settings.upstream.timeout_secs),
                    system_prompt: settings.upstream.system_prompt.clone(),
                })
            });
        Self {
            settings: Arc::new(settings),
            upstream,
            metrics: None,
        }
    }

    /// Attach the Prometheus render handle.
    #[must_use]
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
