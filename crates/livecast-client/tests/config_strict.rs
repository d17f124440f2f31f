#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use livecast_client::config;

const ROOM_YAML: &str = r#"
room:
  room_id: 61879
  room_url_key: "48_TEST_ROOM"
  live:
    live_id: 2035327
    broadcast_host: "online.example.net"
    broadcast_port: 8080
    broadcast_key: "1f913d:hIznds0a"
"#;

#[test]
fn ok_minimal_config() {
    let yaml = format!("version: 1\n{ROOM_YAML}");
    let cfg = config::load_from_str(&yaml).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.session.recv_buffer_bytes, 4096);
    assert_eq!(cfg.session.ping_interval_secs, 60);
    assert_eq!(cfg.session.empty_read_limit, 50);
    assert_eq!(cfg.capture.output.as_deref(), Some("stdout"));
    assert_eq!(cfg.capture.handler, "colored");
    assert_eq!(cfg.room.live.broadcast_port, 8080);
}

#[test]
fn deny_unknown_fields_nested() {
    let yaml = format!(
        "version: 1\nsession:\n  recv_buffer_bites: 128 # typo should fail\n{ROOM_YAML}"
    );
    assert!(config::load_from_str(&yaml).is_err());
}

#[test]
fn unknown_handler_rejected() {
    let yaml = format!("version: 1\ncapture:\n  handler: shiny\n{ROOM_YAML}");
    assert!(config::load_from_str(&yaml).is_err());
}

#[test]
fn ping_interval_out_of_range_rejected() {
    let yaml = format!("version: 1\nsession:\n  ping_interval_secs: 0\n{ROOM_YAML}");
    assert!(config::load_from_str(&yaml).is_err());
}

#[test]
fn missing_broadcast_key_rejected() {
    let yaml = r#"
version: 1
room:
  room_id: 61879
  room_url_key: "48_TEST_ROOM"
  live:
    live_id: 2035327
    broadcast_host: "online.example.net"
    broadcast_port: 8080
    broadcast_key: ""
"#;
    assert!(config::load_from_str(yaml).is_err());
}
