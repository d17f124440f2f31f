//! Protocol modules (framing + frame codec + message taxonomy).
//!
//! This module hosts the wire-level contracts of the broadcast protocol:
//! - framing: newline-delimited line accumulation over a byte stream.
//! - frame: tab-separated `(code, key, payload)` frames and the outbound
//!   subscribe/ping/quit builders.
//! - event: the closed taxonomy of push messages carried by MSG frames.
//!
//! All parsers are panic-free: malformed input is reported as
//! `LivecastError` instead of panicking, keeping a live session resilient
//! to whatever the server emits.

pub mod event;
pub mod frame;
pub mod framing;
