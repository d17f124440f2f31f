//! Hook pipeline behavior, observed through injected terminal sinks.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::HashSet;
use std::io::Write;
use std::sync::{Arc, Mutex};

use livecast_client::callbacks::{factory, BroadcastCallback, CaptureSink, CallbackChain};
use livecast_client::callbacks::sink::TermSink;
use livecast_client::dispatch::Dispatcher;
use livecast_client::room::{Live, Room};

const ESC: char = '\u{1b}';

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

/// Cloneable in-memory writer standing in for a terminal stream.
#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn ids(list: &[&str]) -> HashSet<String> {
    list.iter().map(|s| (*s).to_owned()).collect()
}

fn chain_with_buffers(
    alias: &str,
    official: HashSet<String>,
    myself: HashSet<String>,
) -> (CallbackChain, SharedBuf, SharedBuf) {
    let out = SharedBuf::default();
    let err = SharedBuf::default();
    let chain = factory::create_with_sets(
        alias,
        Arc::new(test_room()),
        CaptureSink::disabled(),
        official,
        myself,
    )
    .unwrap()
    .with_term(TermSink::new(Box::new(out.clone()), Box::new(err.clone())));
    (chain, out, err)
}

#[test]
fn watch_flags_own_user_on_error_stream() {
    let (mut chain, out, err) = chain_with_buffers("watch", ids(&[]), ids(&["5"]));
    let dispatcher = Dispatcher::new(Arc::new(test_room()));

    let line = "MSG\tkey\t{\"t\":2,\"u\":5,\"av\":10,\"g\":3,\"n\":1,\"ac\":\"name\",\"h\":1,\"lon\":null,\"lat\":null,\"rad\":null}";
    dispatcher.process_line(line, &mut chain);

    let flagged = err.contents();
    assert!(flagged.contains(ESC), "expected color markers: {flagged:?}");
    assert!(flagged.contains(line));
    assert!(out.contents().is_empty());
}

#[test]
fn watch_ignores_unlisted_users() {
    let (mut chain, out, err) = chain_with_buffers("watch", ids(&["777545"]), ids(&["5"]));
    let dispatcher = Dispatcher::new(Arc::new(test_room()));

    dispatcher.process_line("MSG\tkey\t{\"t\":1,\"cm\":\"hi\",\"u\":42}", &mut chain);
    assert!(err.contents().is_empty());
    assert!(out.contents().is_empty());
}

#[test]
fn colored_routes_official_to_error_stream() {
    let (mut chain, out, err) = chain_with_buffers("colored", ids(&["777545"]), ids(&[]));
    let dispatcher = Dispatcher::new(Arc::new(test_room()));

    dispatcher.process_line("MSG\tkey\t{\"t\":1,\"cm\":\"hi\",\"u\":777545}", &mut chain);
    assert!(err.contents().contains(ESC));
    assert!(out.contents().is_empty());
}

#[test]
fn colored_prints_every_other_message_to_stdout() {
    let (mut chain, out, err) = chain_with_buffers("colored", ids(&[]), ids(&[]));
    let dispatcher = Dispatcher::new(Arc::new(test_room()));

    // Comment: colored. Telop hide: printed plain.
    dispatcher.process_line("MSG\tkey\t{\"t\":1,\"cm\":\"hi\",\"u\":42}", &mut chain);
    dispatcher.process_line("MSG\tkey\t{\"t\":9}", &mut chain);

    let printed = out.contents();
    assert_eq!(printed.lines().count(), 2);
    assert!(printed.contains(ESC));
    assert!(err.contents().is_empty());
}

#[test]
fn track_highlights_marker_comments() {
    let (mut chain, _out, err) = chain_with_buffers("track", ids(&[]), ids(&[]));
    let dispatcher = Dispatcher::new(Arc::new(test_room()));

    dispatcher.process_line("MSG\tkey\t{\"t\":1,\"cm\":\"plain\",\"u\":42}", &mut chain);
    assert!(err.contents().is_empty());

    dispatcher.process_line("MSG\tkey\t{\"t\":1,\"cm\":\"\u{304b}った\",\"u\":42}", &mut chain);
    assert!(err.contents().contains("\u{304b}"));
}

#[test]
fn readable_renders_sentences_for_flagged_users() {
    let (mut chain, _out, err) = chain_with_buffers("readable", ids(&[]), ids(&["5"]));
    let dispatcher = Dispatcher::new(Arc::new(test_room()));

    dispatcher.process_line(
        "MSG\tkey\t{\"t\":1,\"cm\":\"hello\",\"ac\":\"NANIHIKO\",\"u\":5}",
        &mut chain,
    );
    let rendered = err.contents();
    assert!(rendered.contains("NANIHIKO (5) wrote in room 48_TEST_ROOM: hello"));

    dispatcher.process_line(
        "MSG\tkey\t{\"t\":2,\"ac\":\"NANIHIKO\",\"u\":5,\"g\":1001,\"n\":3}",
        &mut chain,
    );
    let rendered = err.contents();
    assert!(rendered.contains("NANIHIKO (5) threw in room 48_TEST_ROOM 3 item RED_STAR."));
}

#[test]
fn readable_stays_quiet_for_everyone_else() {
    let (mut chain, out, err) = chain_with_buffers("readable", ids(&[]), ids(&[]));
    let dispatcher = Dispatcher::new(Arc::new(test_room()));

    dispatcher.process_line("MSG\tkey\t{\"t\":1,\"cm\":\"hello\",\"u\":5}", &mut chain);
    assert!(err.contents().is_empty());
    assert!(out.contents().is_empty());
}

#[test]
fn aliases_round_trip_through_factory() {
    for alias in factory::AVAILABLE_HANDLERS.iter().copied() {
        let (chain, _, _) = chain_with_buffers(alias, ids(&[]), ids(&[]));
        assert_eq!(chain.alias(), alias);
    }
    assert!(factory::create_with_sets(
        "shiny",
        Arc::new(test_room()),
        CaptureSink::disabled(),
        ids(&[]),
        ids(&[]),
    )
    .is_none());
}
