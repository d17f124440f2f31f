//! Construct callback chains by alias.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use crate::config::ClientConfig;
use crate::room::Room;
use crate::users;

use super::chain::{CallbackChain, EmptyReadPolicy};
use super::colored::ColoredHook;
use super::readable::ReadableHook;
use super::sink::{CaptureSink, CaptureTarget};
use super::track::TrackHook;
use super::watch::WatchHook;
use super::PreDispatchHook;

/// Chain aliases selectable through `capture.handler`.
pub const AVAILABLE_HANDLERS: &[&str] = &["default", "watch", "colored", "track", "readable"];

/// Build the chain named in the config, or `None` for an unknown alias.
pub fn create(alias: &str, cfg: &ClientConfig, room: Arc<Room>) -> Option<CallbackChain> {
    let official = users::user_set_from(cfg.watch.official_users.as_deref());
    let myself = users::user_set_from(cfg.watch.myself.as_deref());
    let capture = CaptureSink::new(CaptureTarget::parse(cfg.capture.output.as_deref()));
    let policy = EmptyReadPolicy {
        limit: cfg.session.empty_read_limit,
        delay: Duration::from_secs(cfg.session.empty_read_delay_secs),
    };
    create_with_sets(alias, room, capture, official, myself).map(|c| c.with_policy(policy))
}

/// Build a chain from explicit id sets, bypassing config-file loading.
///
/// Hook order is declared here, not inherited: `track` runs watch before its
/// marker scan, `readable` runs watch and track before re-rendering.
pub fn create_with_sets(
    alias: &str,
    room: Arc<Room>,
    capture: CaptureSink,
    official: HashSet<String>,
    myself: HashSet<String>,
) -> Option<CallbackChain> {
    let (alias, hooks): (&'static str, Vec<Box<dyn PreDispatchHook>>) = match alias {
        "default" => ("default", Vec::new()),
        "watch" => ("watch", vec![Box::new(WatchHook::new(official, myself))]),
        "colored" => (
            "colored",
            vec![Box::new(ColoredHook::new(official, myself))],
        ),
        "track" => (
            "track",
            vec![
                Box::new(WatchHook::new(official, myself)),
                Box::new(TrackHook),
            ],
        ),
        "readable" => (
            "readable",
            vec![
                Box::new(WatchHook::new(official.clone(), myself.clone())),
                Box::new(TrackHook),
                Box::new(ReadableHook::new(official, myself)),
            ],
        ),
        _ => return None,
    };
    Some(CallbackChain::new(alias, room, capture, hooks))
}
