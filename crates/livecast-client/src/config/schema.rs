use std::path::PathBuf;

use serde::Deserialize;

use livecast_core::error::{LivecastError, Result};

use crate::callbacks::factory;
use crate::room::Room;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    pub version: u32,

    #[serde(default)]
    pub session: SessionSection,

    #[serde(default)]
    pub capture: CaptureSection,

    #[serde(default)]
    pub watch: WatchSection,

    pub room: Room,
}

impl ClientConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(LivecastError::Config("unsupported config version".into()));
        }

        self.session.validate()?;
        self.capture.validate()?;

        if self.room.live.broadcast_host.is_empty() {
            return Err(LivecastError::Config(
                "room.live.broadcast_host must not be empty".into(),
            ));
        }
        if self.room.live.broadcast_port == 0 {
            return Err(LivecastError::Config(
                "room.live.broadcast_port must not be 0".into(),
            ));
        }
        if self.room.live.broadcast_key.is_empty() {
            return Err(LivecastError::Config(
                "room.live.broadcast_key must not be empty".into(),
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionSection {
    #[serde(default = "default_recv_buffer_bytes")]
    pub recv_buffer_bytes: usize,

    /// Keepalive period in seconds; the server drops idle connections.
    #[serde(default = "default_ping_interval_secs")]
    pub ping_interval_secs: u64,

    /// Consecutive empty reads tolerated before the session gives up.
    #[serde(default = "default_empty_read_limit")]
    pub empty_read_limit: u32,

    #[serde(default = "default_empty_read_delay_secs")]
    pub empty_read_delay_secs: u64,
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            recv_buffer_bytes: default_recv_buffer_bytes(),
            ping_interval_secs: default_ping_interval_secs(),
            empty_read_limit: default_empty_read_limit(),
            empty_read_delay_secs: default_empty_read_delay_secs(),
        }
    }
}

impl SessionSection {
    pub fn validate(&self) -> Result<()> {
        if !(256..=65536).contains(&self.recv_buffer_bytes) {
            return Err(LivecastError::Config(
                "session.recv_buffer_bytes must be between 256 and 65536".into(),
            ));
        }
        if !(5..=600).contains(&self.ping_interval_secs) {
            return Err(LivecastError::Config(
                "session.ping_interval_secs must be between 5 and 600".into(),
            ));
        }
        if !(1..=10000).contains(&self.empty_read_limit) {
            return Err(LivecastError::Config(
                "session.empty_read_limit must be between 1 and 10000".into(),
            ));
        }
        if !(1..=60).contains(&self.empty_read_delay_secs) {
            return Err(LivecastError::Config(
                "session.empty_read_delay_secs must be between 1 and 60".into(),
            ));
        }
        Ok(())
    }
}

fn default_recv_buffer_bytes() -> usize {
    4096
}
fn default_ping_interval_secs() -> u64 {
    60
}
fn default_empty_read_limit() -> u32 {
    50
}
fn default_empty_read_delay_secs() -> u64 {
    1
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaptureSection {
    /// Raw-line capture target: "stdout"/"-", "stderr", or a file path.
    /// Absent means capture is disabled.
    #[serde(default = "default_capture_output")]
    pub output: Option<String>,

    /// Alias of the callback chain to run.
    #[serde(default = "default_capture_handler")]
    pub handler: String,
}

impl Default for CaptureSection {
    fn default() -> Self {
        Self {
            output: default_capture_output(),
            handler: default_capture_handler(),
        }
    }
}

impl CaptureSection {
    pub fn validate(&self) -> Result<()> {
        if !factory::AVAILABLE_HANDLERS.contains(&self.handler.as_str()) {
            return Err(LivecastError::Config(format!(
                "capture.handler must be one of {:?}",
                factory::AVAILABLE_HANDLERS
            )));
        }
        Ok(())
    }
}

fn default_capture_output() -> Option<String> {
    Some("stdout".into())
}
fn default_capture_handler() -> String {
    "colored".into()
}

/// Paths of the externally maintained user id sets.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WatchSection {
    #[serde(default)]
    pub official_users: Option<PathBuf>,

    #[serde(default)]
    pub myself: Option<PathBuf>,
}
