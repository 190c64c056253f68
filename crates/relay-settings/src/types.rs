//! Settings type definitions.
//!
//! All types use `#[serde(rename_all = "camelCase")]` for the JSON file
//! format. Each type implements [`Default`] with production default values.
//! `#[serde(default)]` allows partial JSON — missing fields get their
//! default value during deserialization.

use serde::{Deserialize, Serialize};

/// Root settings type for the chat relay.
///
/// Loaded from `~/.relay/settings.json` with defaults applied for missing
/// fields, then `RELAY_*` environment overrides. Example file:
///
/// ```json
/// {
///   "server": { "port": 8000 },
///   "upstream": { "model": "deepseek-chat" },
///   "fallback": { "timeout": "请稍后再试。" }
/// }
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RelaySettings {
    /// Settings schema version.
    pub version: String,
    /// Service name, reported by `/` and `/health`.
    pub name: String,
    /// HTTP listener settings.
    pub server: ServerSettings,
    /// Upstream chat-completions API settings.
    pub upstream: UpstreamSettings,
    /// Logging configuration.
    pub logging: LoggingSettings,
    /// User-facing fallback texts for error responses.
    pub fallback: FallbackMessages,
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            version: "0.3.0".to_owned(),
            name: "chat-relay".to_owned(),
            server: ServerSettings::default(),
            upstream: UpstreamSettings::default(),
            logging: LoggingSettings::default(),
            fallback: FallbackMessages::default(),
        }
    }
}

/// HTTP listener settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerSettings {
    /// Bind address.
    pub host: String,
    /// Listen port.
    pub port: u16,
    /// Debug mode — lowers the default log filter to `debug`.
    pub debug: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            port: 5000,
            debug: false,
        }
    }
}

/// Upstream chat-completions API settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpstreamSettings {
    /// Bearer credential. `None` means the relay fast-fails `/chat`
    /// without attempting a network call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Chat-completions endpoint URL.
    pub endpoint: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Token cap sent with every request.
    pub max_tokens: u32,
    /// Upper bound on the whole upstream call, in seconds. Mandatory —
    /// an unbounded call would pin a handler task for as long as the
    /// upstream stalls.
    pub timeout_secs: u64,
    /// Fixed system role message.
    pub system_prompt: String,
}

impl Default for UpstreamSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: "https://api.deepseek.com/v1/chat/completions".to_owned(),
            model: "deepseek-chat".to_owned(),
            max_tokens: 2000,
            timeout_secs: 30,
            system_prompt: "You are a helpful AI assistant.".to_owned(),
        }
    }
}

/// Logging configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// Default tracing filter when `RUST_LOG` is unset, e.g. `"info"`.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
        }
    }
}

/// User-facing fallback texts carried in the `response` field of error
/// bodies, so a front-end can display them without its own error-message
/// mapping. English defaults; deployments override these per locale in
/// the settings file.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FallbackMessages {
    /// Shown when no API credential is configured.
    pub missing_api_key: String,
    /// Shown when the upstream call timed out.
    pub timeout: String,
    /// Shown on connection-level failures.
    pub network: String,
    /// Shown when the upstream returned a non-success status.
    pub upstream_error: String,
    /// Shown when the upstream body could not be interpreted.
    pub malformed: String,
}

impl Default for FallbackMessages {
    fn default() -> Self {
        Self {
            missing_api_key: "The assistant is not configured yet. Please contact the administrator."
                .to_owned(),
            timeout: "The assistant took too long to reply. Please try again.".to_owned(),
            network: "The assistant is unreachable right now. Please try again later.".to_owned(),
            upstream_error: "The assistant ran into a problem. Please try again later.".to_owned(),
            malformed: "The assistant returned an unreadable reply. Please try again.".to_owned(),
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
    fn defaults_match_production_values() {
        let s = RelaySettings::default();
        assert_eq!(s.name, "chat-relay");
        assert_eq!(s.server.host, "0.0.0.0");
        assert_eq!(s.server.port, 5000);
        assert!(!s.server.debug);
        assert!(s.upstream.api_key.is_none());
        assert_eq!(s.upstream.endpoint, "https://api.deepseek.com/v1/chat/completions");
        assert_eq!(s.upstream.model, "deepseek-chat");
        assert_eq!(s.upstream.max_tokens, 2000);
        assert_eq!(s.upstream.timeout_secs, 30);
        assert_eq!(s.upstream.system_prompt, "You are a helpful AI assistant.");
        assert_eq!(s.logging.level, "info");
    }

    #[test]
    fn partial_json_fills_missing_fields() {
        let s: RelaySettings =
            serde_json::from_str(r#"{"server": {"port": 9000}}"#).unwrap();
        assert_eq!(s.server.port, 9000);
        assert_eq!(s.server.host, "0.0.0.0");
        assert_eq!(s.upstream.model, "deepseek-chat");
    }

    #[test]
    fn camel_case_field_names() {
        let s: RelaySettings = serde_json::from_str(
            r#"{"upstream": {"apiKey": "sk-x", "maxTokens": 512, "timeoutSecs": 5}}"#,
        )
        .unwrap();
        assert_eq!(s.upstream.api_key.as_deref(), Some("sk-x"));
        assert_eq!(s.upstream.max_tokens, 512);
        assert_eq!(s.upstream.timeout_secs, 5);
    }

    #[test]
    fn fallback_texts_overridable() {
        let s: RelaySettings =
            serde_json::from_str(r#"{"fallback": {"timeout": "请稍后再试。"}}"#).unwrap();
        assert_eq!(s.fallback.timeout, "请稍后再试。");
        // Other texts keep their defaults
        assert!(!s.fallback.network.is_empty());
    }

    #[test]
    fn api_key_omitted_when_none() {
        let v = serde_json::to_value(RelaySettings::default()).unwrap();
        assert!(v["upstream"].get("apiKey").is_none());
    }
}
