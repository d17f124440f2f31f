//! Colored hook: per-type coloring of the full message stream.

use std::collections::HashSet;

use crossterm::style::{style, Color, Stylize};

use livecast_core::error::Result;
use livecast_core::protocol::event::BroadcastEvent;

use crate::gifts;

use super::sink::TermSink;
use super::{time_of_day, HookCtx, PreDispatchHook};

/// Prints every message, colored by sender and type: official senders white
/// on red (to the error stream), own accounts white on green, free-gift
/// throws dark green vs. bright green for paid ones, comments yellow,
/// twitter-icon updates cyan. Uncolored types print plain.
pub struct ColoredHook {
    official: HashSet<String>,
    myself: HashSet<String>,
}

impl ColoredHook {
    pub fn new(official: HashSet<String>, myself: HashSet<String>) -> Self {
        Self { official, myself }
    }

    fn in_set(set: &HashSet<String>, user_id: Option<i64>) -> bool {
        user_id.is_some_and(|u| set.contains(&u.to_string()))
    }
}

impl PreDispatchHook for ColoredHook {
    fn name(&self) -> &'static str {
        "colored"
    }

    fn inspect(&mut self, ctx: &HookCtx<'_>, term: &mut TermSink) -> Result<()> {
        let line = format!("{}\t{}", time_of_day(), ctx.line);
        let user = ctx.user_id();

        if Self::in_set(&self.official, user) {
            term.err_line(line.white().on_dark_red());
            return Ok(());
        }

        let styled = if Self::in_set(&self.myself, user) {
            style(line).with(Color::White).on(Color::DarkGreen)
        } else {
            match ctx.event {
                BroadcastEvent::ThrowGifts(gift) => {
                    let free = gift.gift_id.is_some_and(gifts::is_free_item);
                    if free {
                        style(line).with(Color::DarkGreen)
                    } else {
                        style(line).with(Color::Green)
                    }
                }
                BroadcastEvent::ViewComment(_) => style(line).with(Color::DarkYellow),
                BroadcastEvent::TwitterIcon { .. } => style(line).with(Color::Cyan),
                _ => style(line),
            }
        };
        term.out_line(styled);
        Ok(())
    }
}
