//! Callback chain applied to every dispatched message.
//!
//! `BroadcastCallback` is the full handler surface with neutral defaults;
//! `CallbackChain` is the production implementation: a base layer (capture
//! sink + empty-read policy) plus an ordered pipeline of `PreDispatchHook`
//! stages. Variants differ only in their declared hook order; there is no
//! inheritance chain to trace.

pub mod chain;
pub mod colored;
pub mod factory;
pub mod readable;
pub mod sink;
pub mod track;
pub mod watch;

use async_trait::async_trait;
use serde_json::Value;

use livecast_core::error::Result;
use livecast_core::protocol::event::{
    field_i64, field_str, BravoResult, BroadcastEvent, EndVote, GiftLog, LegacyViewComment,
    PerformanceTime, StartVote, SupportGauge, ThrowGifts, ViewComment,
};
use livecast_core::protocol::frame::ParsedFrame;

use crate::room::Room;

pub use chain::{CallbackChain, EmptyReadPolicy};
pub use sink::{CaptureSink, CaptureTarget, TermSink};

/// Continue-or-stop verdict returned by every handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

impl Flow {
    pub fn is_stop(self) -> bool {
        matches!(self, Flow::Stop)
    }
}

/// Immutable view of one decoded MSG frame, handed to the hook pipeline.
pub struct HookCtx<'a> {
    /// The raw line exactly as received.
    pub line: &'a str,
    pub frame: &'a ParsedFrame,
    pub event: &'a BroadcastEvent,
    /// Full decoded payload, for fields read across message types.
    pub payload: &'a Value,
    pub room: &'a Room,
}

impl HookCtx<'_> {
    pub fn user_id(&self) -> Option<i64> {
        field_i64(self.payload, "u")
    }

    pub fn comment(&self) -> Option<&str> {
        field_str(self.payload, "cm")
    }
}

/// One stage of the pre-dispatch pipeline.
///
/// Stages observe and emit presentation output; they must not influence how
/// the frame is subsequently dispatched.
pub trait PreDispatchHook: Send {
    fn name(&self) -> &'static str;
    fn inspect(&mut self, ctx: &HookCtx<'_>, term: &mut TermSink) -> Result<()>;
}

/// Handler surface for everything the server pushes.
///
/// Defaults are deliberately inert: continue without side effects, except
/// end-live which stops the session. Implementations override only what
/// they care about.
#[async_trait]
pub trait BroadcastCallback: Send {
    fn alias(&self) -> &'static str {
        "default"
    }

    /// Called once after subscribing, before the first read.
    fn initialize(&mut self) -> Result<()> {
        Ok(())
    }

    /// Called once on session teardown, on every exit path.
    fn terminate(&mut self) -> Result<()> {
        Ok(())
    }

    /// Raw-line notification, before any parsing.
    fn new_message(&mut self, _line: &str) {}

    /// A read completed without producing a line. The returned verdict
    /// implements the retry budget.
    async fn empty_message(&mut self) -> Flow {
        Flow::Continue
    }

    /// Observation hook run before the type-specific handler of every MSG
    /// frame, whatever its type.
    fn pre_dispatch(&mut self, _ctx: &HookCtx<'_>) -> Result<()> {
        Ok(())
    }

    fn view_comment(&mut self, _msg: &ViewComment) -> Result<Flow> {
        Ok(Flow::Continue)
    }

    fn throw_gifts(&mut self, _msg: &ThrowGifts) -> Result<Flow> {
        Ok(Flow::Continue)
    }

    fn start_vote(&mut self, _msg: &StartVote) -> Result<Flow> {
        Ok(Flow::Continue)
    }

    fn end_vote(&mut self, _msg: &EndVote) -> Result<Flow> {
        Ok(Flow::Continue)
    }

    fn change_support_gauge(&mut self, _msg: &SupportGauge) -> Result<Flow> {
        Ok(Flow::Continue)
    }

    fn set_twitter_icon(&mut self, _user_id: Option<i64>) -> Result<Flow> {
        Ok(Flow::Continue)
    }

    fn set_telop(&mut self, _telop: Option<&str>) -> Result<Flow> {
        Ok(Flow::Continue)
    }

    fn hide_telop(&mut self) -> Result<Flow> {
        Ok(Flow::Continue)
    }

    fn add_gift_log(&mut self, _msg: &GiftLog) -> Result<Flow> {
        Ok(Flow::Continue)
    }

    fn start_performance_time(&mut self, _msg: &PerformanceTime) -> Result<Flow> {
        Ok(Flow::Continue)
    }

    fn start_bravo_time(&mut self) -> Result<Flow> {
        Ok(Flow::Continue)
    }

    fn finish_bravo_time(&mut self) -> Result<Flow> {
        Ok(Flow::Continue)
    }

    fn result_bravo_time(&mut self, _msg: &BravoResult) -> Result<Flow> {
        Ok(Flow::Continue)
    }

    fn speak(&mut self, _id: Option<i64>, _created_at: Option<i64>) -> Result<Flow> {
        Ok(Flow::Continue)
    }

    fn fetch_avatar(&mut self) -> Result<Flow> {
        Ok(Flow::Continue)
    }

    /// The broadcast has ended; stops the session unless overridden.
    fn end_live(&mut self, _anteroom: Option<&str>) -> Result<Flow> {
        Ok(Flow::Stop)
    }

    fn vote_refresh(&mut self, _created_at: Option<i64>) -> Result<Flow> {
        Ok(Flow::Continue)
    }

    fn reload_video(&mut self, _created_at: Option<i64>) -> Result<Flow> {
        Ok(Flow::Continue)
    }

    fn start_live(&mut self) -> Result<Flow> {
        Ok(Flow::Continue)
    }

    fn legacy_view_comment(&mut self, _msg: &LegacyViewComment) -> Result<Flow> {
        Ok(Flow::Continue)
    }

    fn enter_owner(&mut self) -> Result<Flow> {
        Ok(Flow::Continue)
    }

    fn leave_owner(&mut self) -> Result<Flow> {
        Ok(Flow::Continue)
    }

    fn unknown_message(&mut self, _payload: &Value) -> Result<Flow> {
        Ok(Flow::Continue)
    }

    fn ack_received(&mut self, _data: &str) -> Result<Flow> {
        Ok(Flow::Continue)
    }

    fn err_received(&mut self) -> Result<Flow> {
        Ok(Flow::Continue)
    }
}

/// Wall-clock time of day, the way hook output stamps lines.
pub(crate) fn time_of_day() -> String {
    chrono::Local::now().format("%H:%M:%S%.6f").to_string()
}
