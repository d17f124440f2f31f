//! Watch hook: flag lines from official accounts and from the user.

use std::collections::HashSet;

use crossterm::style::Stylize;

use livecast_core::error::Result;

use super::sink::TermSink;
use super::{time_of_day, HookCtx, PreDispatchHook};

/// Highlights messages whose sender is in one of the two externally
/// maintained id sets: official accounts (white on red) and the user's own
/// accounts (white on green). Everything else passes silently.
pub struct WatchHook {
    official: HashSet<String>,
    myself: HashSet<String>,
}

impl WatchHook {
    pub fn new(official: HashSet<String>, myself: HashSet<String>) -> Self {
        Self { official, myself }
    }

    /// Membership is by string-cast user id; absent ids never match.
    pub(crate) fn is_official(&self, user_id: Option<i64>) -> bool {
        user_id.is_some_and(|u| self.official.contains(&u.to_string()))
    }

    pub(crate) fn is_myself(&self, user_id: Option<i64>) -> bool {
        user_id.is_some_and(|u| self.myself.contains(&u.to_string()))
    }
}

impl PreDispatchHook for WatchHook {
    fn name(&self) -> &'static str {
        "watch"
    }

    fn inspect(&mut self, ctx: &HookCtx<'_>, term: &mut TermSink) -> Result<()> {
        let user = ctx.user_id();
        if self.is_official(user) {
            let line = format!("{}\t{}", time_of_day(), ctx.line);
            term.err_line(line.white().on_dark_red());
        } else if self.is_myself(user) {
            let line = format!("{}\t{}", time_of_day(), ctx.line);
            term.err_line(line.white().on_dark_green());
        }
        Ok(())
    }
}
