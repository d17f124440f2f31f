//! Per-line decode and dispatch.
//!
//! Every error below the session loop is absorbed here: a malformed frame,
//! bad payload JSON, or a failing handler drops that one line and the loop
//! moves on. Only a handler's explicit `Flow::Stop` ends the session.

use std::sync::Arc;

use serde_json::Value;

use livecast_core::protocol::event::BroadcastEvent;
use livecast_core::protocol::frame::{ControlCode, ParsedFrame};

use crate::callbacks::{BroadcastCallback, Flow, HookCtx};
use crate::room::Room;

pub struct Dispatcher {
    room: Arc<Room>,
}

impl Dispatcher {
    pub fn new(room: Arc<Room>) -> Self {
        Self { room }
    }

    /// Decode one raw line and run it through the callback chain.
    pub fn process_line<C>(&self, line: &str, cb: &mut C) -> Flow
    where
        C: BroadcastCallback + ?Sized,
    {
        let frame = match ParsedFrame::parse(line) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::warn!(error = %e, "dropping malformed frame");
                return Flow::Continue;
            }
        };

        match frame.control() {
            ControlCode::Msg => self.dispatch_msg(line, &frame, cb),
            ControlCode::Ack => cb.ack_received(&frame.payload).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "ack handler failed");
                Flow::Continue
            }),
            ControlCode::Err => cb.err_received().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "err handler failed");
                Flow::Continue
            }),
            ControlCode::Other => {
                tracing::debug!(code = %frame.code, "unrecognized control code");
                Flow::Continue
            }
        }
    }

    fn dispatch_msg<C>(&self, line: &str, frame: &ParsedFrame, cb: &mut C) -> Flow
    where
        C: BroadcastCallback + ?Sized,
    {
        let payload: Value = match serde_json::from_str(&frame.payload) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(error = %e, "dropping frame with invalid payload JSON");
                return Flow::Continue;
            }
        };
        let event = match BroadcastEvent::from_payload(&payload) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(error = %e, "dropping unclassifiable message");
                return Flow::Continue;
            }
        };

        let ctx = HookCtx {
            line,
            frame,
            event: &event,
            payload: &payload,
            room: self.room.as_ref(),
        };
        if let Err(e) = cb.pre_dispatch(&ctx) {
            tracing::warn!(error = %e, "pre-dispatch hook failed");
        }

        let verdict = match &event {
            BroadcastEvent::ViewComment(msg) => cb.view_comment(msg),
            BroadcastEvent::ThrowGifts(msg) => cb.throw_gifts(msg),
            BroadcastEvent::StartVote(msg) => cb.start_vote(msg),
            BroadcastEvent::EndVote(msg) => cb.end_vote(msg),
            BroadcastEvent::SupportGauge(msg) => cb.change_support_gauge(msg),
            BroadcastEvent::TwitterIcon { user_id } => cb.set_twitter_icon(*user_id),
            BroadcastEvent::SetTelop { telop } => cb.set_telop(telop.as_deref()),
            BroadcastEvent::HideTelop => cb.hide_telop(),
            BroadcastEvent::GiftLog(msg) => cb.add_gift_log(msg),
            BroadcastEvent::StartPerformanceTime(msg) => cb.start_performance_time(msg),
            BroadcastEvent::StartBravoTime => cb.start_bravo_time(),
            BroadcastEvent::FinishBravoTime => cb.finish_bravo_time(),
            BroadcastEvent::ResultBravoTime(msg) => cb.result_bravo_time(msg),
            BroadcastEvent::Speak { id, created_at } => cb.speak(*id, *created_at),
            BroadcastEvent::FetchAvatar => cb.fetch_avatar(),
            BroadcastEvent::EndLive { anteroom } => cb.end_live(anteroom.as_deref()),
            BroadcastEvent::VoteRefresh { created_at } => cb.vote_refresh(*created_at),
            BroadcastEvent::ReloadVideo { created_at } => cb.reload_video(*created_at),
            BroadcastEvent::StartLive => cb.start_live(),
            BroadcastEvent::LegacyViewComment(msg) => cb.legacy_view_comment(msg),
            BroadcastEvent::EnterOwner => cb.enter_owner(),
            BroadcastEvent::LeaveOwner => cb.leave_owner(),
            BroadcastEvent::Unknown(payload) => cb.unknown_message(payload),
        };

        verdict.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "message handler failed; continuing");
            Flow::Continue
        })
    }
}
