//! Shared error type across livecast crates.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, LivecastError>;

/// Unified error type used by core and client.
#[derive(Debug, Error)]
pub enum LivecastError {
    /// A received line did not split into a recognizable frame shape.
    #[error("malformed frame: {0}")]
    MalformedFrame(String),
    /// A MSG frame carried a payload that is not valid JSON, or is missing
    /// the message-type field.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
    #[error("i/o: {0}")]
    Io(#[from] std::io::Error),
    #[error("config: {0}")]
    Config(String),
    #[error("capture sink: {0}")]
    Sink(String),
}
