//! Transport layer (TCP).
//!
//! Exposes the connection setup, the line framer over the read half, and the
//! single-writer frame sender over the write half.

pub mod conn;
pub mod framer;

pub use conn::{connect, FrameWriter};
pub use framer::Framer;
