//! Settings loading: defaults → file deep-merge → env overrides.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::errors::Result;
use crate::types::RelaySettings;

/// Env var naming the settings file path.
const SETTINGS_PATH_VAR: &str = "RELAY_SETTINGS_PATH";

/// Resolve the settings file path.
///
/// `$RELAY_SETTINGS_PATH` when set, else `~/.relay/settings.json`.
/// Returns `None` when neither the override nor `$HOME` is available.
#[must_use]
pub fn settings_path() -> Option<PathBuf> {
    if let Ok(p) = std::env::var(SETTINGS_PATH_VAR) {
        return Some(PathBuf::from(p));
    }
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".relay").join("settings.json"))
}

/// Deep-merge `overlay` into `base`.
///
/// Objects merge recursively; any other value in `overlay` replaces the
/// value in `base`. `overlay` keys absent from `base` are added.
#[must_use]
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged = match base_map.remove(&key) {
                    Some(base_value) => deep_merge(base_value, overlay_value),
                    None => overlay_value,
                };
                let _ = base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }
        (_, overlay) => overlay,
    }
}

/// Load settings from the default path with env overrides applied.
///
/// A missing file is not an error — defaults are used. A present but
/// unreadable or invalid file is an error: silently ignoring a broken
/// settings file would hide a misconfigured credential.
pub fn load_settings() -> Result<RelaySettings> {
    match settings_path() {
        Some(path) => load_settings_from_path(&path),
        None => {
            let mut settings = RelaySettings::default();
            apply_env_overrides(&mut settings);
            Ok(settings)
        }
    }
}

/// Load settings from a specific file path with env overrides applied.
pub fn load_settings_from_path(path: &Path) -> Result<RelaySettings> {
    let mut settings = if path.exists() {
        let raw = std::fs::read_to_string(path)?;
        let file_value: Value = serde_json::from_str(&raw)?;
        let defaults = serde_json::to_value(RelaySettings::default())?;
        let merged = deep_merge(defaults, file_value);
        debug!(?path, "settings file merged over defaults");
        serde_json::from_value(merged)?
    } else {
        debug!(?path, "no settings file, using defaults");
        RelaySettings::default()
    };
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Apply `RELAY_*` env overrides from the process environment.
pub fn apply_env_overrides(settings: &mut RelaySettings) {
    apply_overrides_from(settings, |key| std::env::var(key).ok());
}

/// Apply overrides from an arbitrary lookup. Split out so tests can feed
/// a map instead of mutating the process environment.
fn apply_overrides_from<F>(settings: &mut RelaySettings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(key) = lookup("RELAY_API_KEY") {
        settings.upstream.api_key = Some(key);
    }
    if let Some(endpoint) = lookup("RELAY_ENDPOINT") {
        settings.upstream.endpoint = endpoint;
    }
    if let Some(model) = lookup("RELAY_MODEL") {
        settings.upstream.model = model;
    }
    if let Some(host) = lookup("RELAY_HOST") {
        settings.server.host = host;
    }
    if let Some(port) = lookup("RELAY_PORT") {
        match port.parse() {
            Ok(p) => settings.server.port = p,
            Err(_) => tracing::warn!(value = %port, "ignoring non-numeric RELAY_PORT"),
        }
    }
    if let Some(debug) = lookup("RELAY_DEBUG") {
        settings.server.debug = matches!(debug.as_str(), "1" | "true" | "yes");
    }
    if let Some(level) = lookup("RELAY_LOG_LEVEL") {
        settings.logging.level = level;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
