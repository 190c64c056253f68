//! Router assembly.

use std::any::Any;

use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use relay_core::wire::ErrorBody;

use crate::state::AppState;

pub mod chat;
pub mod info;

/// Build the relay router with CORS, tracing, and panic containment.
///
/// CORS is permissive — the original service fronts a browser client on
/// another origin and accepts all of them.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(info::home))
        .route("/health", get(info::health))
        .route("/metrics", get(info::metrics))
        .route("/chat", post(chat::chat))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Last-resort containment: a panicking handler must answer 500 JSON,
/// never drop the connection or take the process down.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = err
        .downcast_ref::<&str>()
        .map(|s| (*s).to_owned())
        .or_else(|| err.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "internal error".to_owned());
    tracing::error!(message = %message, "handler panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody::new(message)),
    )
        .into_response()
}
