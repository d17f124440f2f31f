//! Readable hook: render flagged messages as sentences.

use std::collections::HashSet;

use crossterm::style::{style, Color, Stylize};

use livecast_core::error::Result;
use livecast_core::protocol::event::BroadcastEvent;

use crate::gifts;

use super::sink::TermSink;
use super::{time_of_day, HookCtx, PreDispatchHook};

/// Runs after the track stage. For official/self senders, comment and gift
/// messages are re-rendered into human-readable sentences; other types fall
/// back to the raw frame text. Output keeps the watch coloring (red for
/// official, green for self) on the error stream.
pub struct ReadableHook {
    official: HashSet<String>,
    myself: HashSet<String>,
}

impl ReadableHook {
    pub fn new(official: HashSet<String>, myself: HashSet<String>) -> Self {
        Self { official, myself }
    }

    fn in_set(set: &HashSet<String>, user_id: Option<i64>) -> bool {
        user_id.is_some_and(|u| set.contains(&u.to_string()))
    }
}

impl PreDispatchHook for ReadableHook {
    fn name(&self) -> &'static str {
        "readable"
    }

    fn inspect(&mut self, ctx: &HookCtx<'_>, term: &mut TermSink) -> Result<()> {
        let user = ctx.user_id();
        let background = if Self::in_set(&self.official, user) {
            Color::DarkRed
        } else if Self::in_set(&self.myself, user) {
            Color::DarkGreen
        } else {
            return Ok(());
        };

        let id = user.map_or_else(|| "?".to_owned(), |u| u.to_string());
        let text = match ctx.event {
            BroadcastEvent::ViewComment(comment) => format!(
                "{} ({}) wrote in room {}: {}",
                comment.username.as_deref().unwrap_or("?"),
                id,
                ctx.room.room_url_key,
                comment.comment.as_deref().unwrap_or(""),
            ),
            BroadcastEvent::ThrowGifts(gift) => format!(
                "{} ({}) threw in room {} {} item {}.",
                gift.username.as_deref().unwrap_or("?"),
                id,
                ctx.room.room_url_key,
                gift.quantity.unwrap_or(0),
                gift.gift_id.map_or_else(|| "?".to_owned(), gifts::throwable_item_name),
            ),
            _ => ctx.line.to_owned(),
        };

        let line = format!("{}\t{}", time_of_day(), text);
        term.err_line(style(line).with(Color::White).on(background));
        Ok(())
    }
}
