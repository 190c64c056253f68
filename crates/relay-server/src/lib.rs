//! # relay-server
//!
//! The HTTP surface of the chat relay:
//!
//! - `POST /chat` — validate, forward to the upstream completion API,
//!   reshape the reply
//! - `GET /` — static service descriptor
//! - `GET /health` — liveness, independent of upstream availability
//! - `GET /metrics` — Prometheus text
//!
//! The router is built from an [`state::AppState`] holding immutable
//! settings and the optional upstream client, so tests inject fakes and
//! stub upstreams freely.

#![deny(unsafe_code)]

pub mod error;
pub mod metrics;
pub mod routes;
pub mod state;

pub use routes::build_router;
pub use state::AppState;
