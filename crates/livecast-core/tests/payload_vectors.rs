//! Message payload vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;

use serde_json::Value;

use livecast_core::protocol::event::BroadcastEvent;

fn load(name: &str) -> Value {
    let s = fs::read_to_string(format!("tests/vectors/{name}")).unwrap();
    serde_json::from_str(&s).unwrap()
}

#[test]
fn classify_view_comment() {
    let event = BroadcastEvent::from_payload(&load("view_comment.json")).unwrap();
    let BroadcastEvent::ViewComment(comment) = event else {
        panic!("expected ViewComment, got {event:?}");
    };
    assert_eq!(comment.comment.as_deref(), Some("hello from the stream"));
    assert_eq!(comment.username.as_deref(), Some("fan_one"));
    assert_eq!(comment.user_id, Some(42));
    assert_eq!(comment.avatar_id, Some(7));
    assert_eq!(comment.lon, None);
}

#[test]
fn classify_throw_gifts() {
    let event = BroadcastEvent::from_payload(&load("throw_gifts.json")).unwrap();
    let BroadcastEvent::ThrowGifts(gift) = event else {
        panic!("expected ThrowGifts, got {event:?}");
    };
    assert_eq!(gift.user_id, Some(5));
    assert_eq!(gift.gift_id, Some(1001));
    assert_eq!(gift.quantity, Some(3));
    assert_eq!(gift.show_timeline, Some(1));
}

#[test]
fn classify_start_vote() {
    let event = BroadcastEvent::from_payload(&load("start_vote.json")).unwrap();
    let BroadcastEvent::StartVote(vote) = event else {
        panic!("expected StartVote, got {event:?}");
    };
    assert_eq!(vote.options, Some(3));
    assert_eq!(vote.votes, Some(10));
    let list = vote.list.unwrap();
    assert_eq!(list.as_array().map(Vec::len), Some(3));
}

#[test]
fn classify_end_live() {
    let event = BroadcastEvent::from_payload(&load("end_live.json")).unwrap();
    assert_eq!(
        event,
        BroadcastEvent::EndLive {
            anteroom: Some("214063".to_owned())
        }
    );
}
