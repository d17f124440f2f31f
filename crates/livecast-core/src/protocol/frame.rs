//! Tab-separated frame codec.
//!
//! Every line on the wire is `CODE\t[KEY\t]PAYLOAD`. Inbound frames carry
//! `MSG` (a JSON push message), `ACK`, or `ERR`; outbound frames are the
//! subscribe/ping/quit commands built here.

use crate::error::{LivecastError, Result};

pub const HEADER_MSG: &str = "MSG";
pub const HEADER_ACK: &str = "ACK";
pub const HEADER_ERR: &str = "ERR";
pub const HEADER_SUB: &str = "SUB";
pub const HEADER_PING: &str = "PING";
pub const HEADER_QUIT: &str = "QUIT";

/// Fixed ping payload expected by the server.
const PING_PAYLOAD: &str = "showroom";

/// Classified control code of a parsed frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCode {
    /// Carries a JSON push message in the payload.
    Msg,
    /// Acknowledgement; payload is passed through raw.
    Ack,
    /// Error notification; carries no payload.
    Err,
    /// Anything else is passed through as a no-op.
    Other,
}

/// One parsed inbound frame: `(code, key, payload)`.
///
/// Exactly two tabs yield all three fields; exactly one tab yields
/// `(code, payload)` with an empty key. Any other tab count is rejected as
/// malformed rather than guessed at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFrame {
    pub code: String,
    pub key: String,
    pub payload: String,
}

impl ParsedFrame {
    /// Split a raw line into a frame.
    pub fn parse(line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.split('\t').collect();
        match fields.as_slice() {
            [code, key, payload] => Ok(Self {
                code: (*code).to_owned(),
                key: (*key).to_owned(),
                payload: (*payload).to_owned(),
            }),
            [code, payload] => Ok(Self {
                code: (*code).to_owned(),
                key: String::new(),
                payload: (*payload).to_owned(),
            }),
            _ => Err(LivecastError::MalformedFrame(format!(
                "expected 2 or 3 tab-separated fields, got {}",
                fields.len()
            ))),
        }
    }

    pub fn control(&self) -> ControlCode {
        match self.code.as_str() {
            HEADER_MSG => ControlCode::Msg,
            HEADER_ACK => ControlCode::Ack,
            HEADER_ERR => ControlCode::Err,
            _ => ControlCode::Other,
        }
    }
}

/// `SUB\t<broadcast_key>\n`
pub fn subscribe_frame(broadcast_key: &str) -> String {
    format!("{HEADER_SUB}\t{broadcast_key}\n")
}

/// `PING\tshowroom\n`, sent every keepalive period.
pub fn ping_frame() -> String {
    format!("{HEADER_PING}\t{PING_PAYLOAD}\n")
}

/// `QUIT\n`
pub fn quit_frame() -> String {
    format!("{HEADER_QUIT}\n")
}
