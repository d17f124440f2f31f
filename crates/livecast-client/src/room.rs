//! Read-only room/live context supplied by the external catalog.
//!
//! The core only reads these fields: the live endpoint for connection setup
//! and `room_url_key` for rendered output.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Room {
    pub room_id: u64,
    /// URL slug of the room, used when rendering human-readable lines.
    pub room_url_key: String,
    pub live: Live,
}

/// Currently running live broadcast of a room.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Live {
    pub live_id: u64,
    pub broadcast_host: String,
    pub broadcast_port: u16,
    pub broadcast_key: String,
}
