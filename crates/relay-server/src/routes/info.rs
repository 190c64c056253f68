//! Static endpoints: service descriptor, health, metrics.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

use relay_core::wire::ErrorBody;

use crate::state::AppState;

/// `GET /` — service descriptor.
pub async fn home(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "message": format!("{} is running", state.settings.name),
        "status": "online",
        "version": state.settings.version,
        "endpoints": {
            "chat": "POST /chat",
            "health": "GET /health",
            "metrics": "GET /metrics",
        },
    }))
}

/// `GET /health` — liveness.
///
/// Always 200; the upstream is deliberately not probed here. A broken
/// upstream surfaces per-request on `/chat`, not as process death.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": state.settings.name,
        "version": state.settings.version,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// `GET /metrics` — Prometheus text.
pub async fn metrics(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => handle.render().into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorBody::new("metrics recorder not installed")),
        )
            .into_response(),
    }
}
