//! Track hook: highlight comments carrying the tracked marker character.

use crossterm::style::Stylize;

use livecast_core::error::Result;

use super::sink::TermSink;
use super::{time_of_day, HookCtx, PreDispatchHook};

/// "か" (U+304B).
const MARKER: char = '\u{304b}';

/// Runs after the watch stage; any comment containing the marker is echoed
/// white on yellow to the error stream.
#[derive(Default)]
pub struct TrackHook;

impl PreDispatchHook for TrackHook {
    fn name(&self) -> &'static str {
        "track"
    }

    fn inspect(&mut self, ctx: &HookCtx<'_>, term: &mut TermSink) -> Result<()> {
        if let Some(text) = ctx.comment() {
            if text.contains(MARKER) {
                let line = format!("{}\t{}", time_of_day(), ctx.line);
                term.err_line(line.white().on_dark_yellow());
            }
        }
        Ok(())
    }
}
