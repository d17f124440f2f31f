//! livecast core: transport-agnostic wire contracts for the broadcast
//! push-notification protocol.
//!
//! This crate defines the line framing accumulator, the tab-separated frame
//! codec, the typed message taxonomy, and the error surface shared by the
//! client runtime. It intentionally carries no socket or runtime dependencies
//! so it can be exercised in isolation.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `LivecastError`/`Result` so a session
//! never crashes on malformed traffic.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{LivecastError, Result};
