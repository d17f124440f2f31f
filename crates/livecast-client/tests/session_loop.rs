//! End-to-end session tests over in-memory duplex streams.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use livecast_client::callbacks::{factory, BroadcastCallback, CaptureSink, CaptureTarget, Flow};
use livecast_client::config::SessionSection;
use livecast_client::dispatch::Dispatcher;
use livecast_client::room::{Live, Room};
use livecast_client::session::{BroadcastSession, SessionOutcome};
use livecast_core::error::Result;
use livecast_core::protocol::event::ViewComment;

fn test_room() -> Room {
    Room {
        room_id: 61879,
        room_url_key: "48_TEST_ROOM".to_owned(),
        live: Live {
            live_id: 2035327,
            broadcast_host: "127.0.0.1".to_owned(),
            broadcast_port: 8080,
            broadcast_key: "abc123".to_owned(),
        },
    }
}

fn test_session(room: &Arc<Room>) -> BroadcastSession {
    BroadcastSession::new(&SessionSection::default(), Arc::clone(room))
}

/// Pure recording callback: no side effects, bounded empty-read budget so
/// EOF cannot spin forever.
#[derive(Default)]
struct Recording {
    handled: Vec<&'static str>,
    anteroom: Option<String>,
    acks: Vec<String>,
    errs: u32,
    empties: u32,
    empty_limit: u32,
}

impl Recording {
    fn with_empty_limit(limit: u32) -> Self {
        Self {
            empty_limit: limit,
            ..Self::default()
        }
    }
}

#[async_trait]
impl BroadcastCallback for Recording {
    async fn empty_message(&mut self) -> Flow {
        self.empties += 1;
        if self.empties > self.empty_limit {
            Flow::Stop
        } else {
            tokio::time::sleep(std::time::Duration::from_secs(1)).await;
            Flow::Continue
        }
    }

    fn view_comment(&mut self, _msg: &ViewComment) -> Result<Flow> {
        self.handled.push("view_comment");
        Ok(Flow::Continue)
    }

    fn hide_telop(&mut self) -> Result<Flow> {
        self.handled.push("hide_telop");
        Ok(Flow::Continue)
    }

    fn end_live(&mut self, anteroom: Option<&str>) -> Result<Flow> {
        self.handled.push("end_live");
        self.anteroom = anteroom.map(str::to_owned);
        Ok(Flow::Stop)
    }

    fn ack_received(&mut self, data: &str) -> Result<Flow> {
        self.acks.push(data.to_owned());
        Ok(Flow::Continue)
    }

    fn err_received(&mut self) -> Result<Flow> {
        self.errs += 1;
        Ok(Flow::Continue)
    }
}

#[tokio::test]
async fn end_live_stops_the_loop_and_wire_is_exact() {
    let room = Arc::new(test_room());
    let (mut peer, stream) = tokio::io::duplex(1024);
    peer.write_all(b"MSG\t1f913d:key\t{\"t\":101,\"a\":\"214063\"}\n")
        .await
        .unwrap();

    let mut cb = Recording::with_empty_limit(3);
    let outcome = test_session(&room).run_on(stream, &mut cb).await.unwrap();

    assert_eq!(outcome, SessionOutcome::HandlerStopped);
    assert_eq!(cb.handled, vec!["end_live"]);
    assert_eq!(cb.anteroom.as_deref(), Some("214063"));

    // Everything the session wrote, in order: subscribe then quit, no pings.
    let mut sent = Vec::new();
    peer.read_to_end(&mut sent).await.unwrap();
    assert_eq!(String::from_utf8(sent).unwrap(), "SUB\tabc123\nQUIT\n");
}

#[tokio::test(start_paused = true)]
async fn partial_line_is_buffered_until_completed() {
    let room = Arc::new(test_room());
    let (mut peer, stream) = tokio::io::duplex(1024);
    let session = test_session(&room);

    let task = tokio::spawn(async move {
        let mut cb = Recording::with_empty_limit(3);
        let outcome = session.run_on(stream, &mut cb).await;
        (outcome, cb)
    });

    peer.write_all(b"MSG\tA\t{\"t\":9").await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    peer.write_all(b"}\n").await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    peer.shutdown().await.unwrap();

    let (outcome, cb) = task.await.unwrap();
    assert_eq!(outcome.unwrap(), SessionOutcome::CommunicationLost);
    // One dispatch for the reassembled line, not two.
    assert_eq!(cb.handled, vec!["hide_telop"]);
}

#[tokio::test(start_paused = true)]
async fn empty_read_budget_records_one_notice() {
    let room = Arc::new(test_room());
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("capture.log");

    let mut chain = factory::create_with_sets(
        "default",
        Arc::clone(&room),
        CaptureSink::new(CaptureTarget::File(path.clone())),
        Default::default(),
        Default::default(),
    )
    .unwrap();

    let (mut peer, stream) = tokio::io::duplex(1024);
    peer.shutdown().await.unwrap();

    let outcome = test_session(&room).run_on(stream, &mut chain).await.unwrap();
    assert_eq!(outcome, SessionOutcome::CommunicationLost);

    let body = std::fs::read_to_string(path).unwrap();
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("No communication with server, aborting."));
}

#[tokio::test(start_paused = true)]
async fn keepalive_ping_fires_while_receiving() {
    let room = Arc::new(test_room());
    let (mut peer, stream) = tokio::io::duplex(4096);
    peer.shutdown().await.unwrap();

    // 120 one-second retries keep the loop alive past the 60 s ping period.
    let mut cb = Recording::with_empty_limit(120);
    let outcome = test_session(&room).run_on(stream, &mut cb).await.unwrap();
    assert_eq!(outcome, SessionOutcome::CommunicationLost);

    let mut sent = Vec::new();
    peer.read_to_end(&mut sent).await.unwrap();
    let sent = String::from_utf8(sent).unwrap();
    assert!(sent.contains("PING\tshowroom\n"));
}

#[test]
fn dispatch_is_idempotent_for_pure_callbacks() {
    let room = Arc::new(test_room());
    let dispatcher = Dispatcher::new(Arc::clone(&room));
    let line = "MSG\tkey\t{\"t\":1,\"cm\":\"hi\",\"ac\":\"fan\",\"u\":9}";

    let mut cb = Recording::default();
    let first = dispatcher.process_line(line, &mut cb);
    let second = dispatcher.process_line(line, &mut cb);
    assert_eq!(first, second);
    assert_eq!(cb.handled, vec!["view_comment", "view_comment"]);
}

#[test]
fn ack_err_and_unknown_codes_route_separately() {
    let room = Arc::new(test_room());
    let dispatcher = Dispatcher::new(Arc::clone(&room));
    let mut cb = Recording::default();

    assert_eq!(dispatcher.process_line("ACK\tgot it", &mut cb), Flow::Continue);
    assert_eq!(dispatcher.process_line("ERR\t", &mut cb), Flow::Continue);
    assert_eq!(dispatcher.process_line("BOGUS\tx", &mut cb), Flow::Continue);
    // Degenerate tab counts are dropped, not dispatched.
    assert_eq!(dispatcher.process_line("ERR", &mut cb), Flow::Continue);

    assert_eq!(cb.acks, vec!["got it".to_owned()]);
    assert_eq!(cb.errs, 1);
    assert!(cb.handled.is_empty());
}

#[test]
fn malformed_payload_is_dropped_not_fatal() {
    let room = Arc::new(test_room());
    let dispatcher = Dispatcher::new(Arc::clone(&room));
    let mut cb = Recording::default();

    assert_eq!(
        dispatcher.process_line("MSG\tkey\t{not json", &mut cb),
        Flow::Continue
    );
    assert_eq!(
        dispatcher.process_line("MSG\tkey\t{\"no_type\":1}", &mut cb),
        Flow::Continue
    );
    assert!(cb.handled.is_empty());
}
