//! # relay-core
//!
//! Foundation types for the chat relay:
//!
//! - **Errors**: [`errors::RelayError`] — the total taxonomy every failed
//!   request maps onto, with its HTTP status mapping
//! - **Wire**: [`wire::ChatRequest`], [`wire::ChatReply`], [`wire::ErrorBody`]
//!   — the JSON bodies of the inbound surface
//! - **Text**: [`text::truncate_str`] — UTF-8-safe truncation for upstream
//!   body excerpts
//!
//! ## Crate Position
//!
//! Foundation crate. Depended on by `relay-llm`, `relay-settings`, and
//! `relay-server`. No I/O, no async.

#![deny(unsafe_code)]

pub mod errors;
pub mod text;
pub mod wire;

pub use errors::RelayError;
