//! Broadcast session state machine.
//!
//! Drives connect → subscribe → receive-loop → terminate against one live
//! endpoint. The keepalive tick is an arm of the same `select!` as the read,
//! so pings run while a read is pending but can never interleave with
//! another write, and dropping the interval on any exit path cancels it.

use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::time::{self, Duration, Instant, MissedTickBehavior};

use livecast_core::error::Result;
use livecast_core::protocol::frame::{ping_frame, quit_frame, subscribe_frame};

use crate::callbacks::{BroadcastCallback, Flow};
use crate::config::SessionSection;
use crate::dispatch::Dispatcher;
use crate::room::Room;
use crate::transport::{connect, FrameWriter, Framer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Connected,
    Subscribed,
    Receiving,
    Terminating,
    Closed,
}

/// Why the receive loop ended. Per-frame errors never surface here; the
/// session reports how it stopped, not a pile of exceptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// A handler returned `Flow::Stop` (typically end-live).
    HandlerStopped,
    /// The empty-read retry budget ran out.
    CommunicationLost,
}

pub struct BroadcastSession {
    room: Arc<Room>,
    recv_buffer_bytes: usize,
    ping_interval: Duration,
}

impl BroadcastSession {
    pub fn new(cfg: &SessionSection, room: Arc<Room>) -> Self {
        Self {
            room,
            recv_buffer_bytes: cfg.recv_buffer_bytes,
            ping_interval: Duration::from_secs(cfg.ping_interval_secs),
        }
    }

    /// Open the TCP stream to the room's live endpoint and run to completion.
    pub async fn connect_and_run<C>(&self, cb: &mut C) -> Result<SessionOutcome>
    where
        C: BroadcastCallback,
    {
        let live = &self.room.live;
        let stream = connect(&live.broadcast_host, live.broadcast_port).await?;
        self.run_on(stream, cb).await
    }

    /// Run the session over an already-opened duplex stream.
    pub async fn run_on<S, C>(&self, stream: S, cb: &mut C) -> Result<SessionOutcome>
    where
        S: AsyncRead + AsyncWrite + Unpin + Send,
        C: BroadcastCallback,
    {
        let mut state = SessionState::Idle;
        transition(&mut state, SessionState::Connected);

        let (rd, wr) = tokio::io::split(stream);
        let mut framer = Framer::new(rd, self.recv_buffer_bytes);
        let mut writer = FrameWriter::new(wr);

        let result = self.drive(&mut state, &mut framer, &mut writer, cb).await;

        // Teardown runs on every exit path; the keepalive interval is owned
        // by drive() and is already gone here.
        transition(&mut state, SessionState::Terminating);
        if let Err(e) = writer.send(&quit_frame()).await {
            tracing::warn!(error = %e, "quit frame not delivered");
        }
        if let Err(e) = cb.terminate() {
            tracing::warn!(error = %e, "callback teardown failed");
        }
        transition(&mut state, SessionState::Closed);

        result
    }

    async fn drive<R, W, C>(
        &self,
        state: &mut SessionState,
        framer: &mut Framer<R>,
        writer: &mut FrameWriter<W>,
        cb: &mut C,
    ) -> Result<SessionOutcome>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
        C: BroadcastCallback,
    {
        writer
            .send(&subscribe_frame(&self.room.live.broadcast_key))
            .await?;
        transition(state, SessionState::Subscribed);

        // First tick one full period out, then recurring.
        let mut keepalive =
            time::interval_at(Instant::now() + self.ping_interval, self.ping_interval);
        keepalive.set_missed_tick_behavior(MissedTickBehavior::Delay);

        cb.initialize()?;
        let dispatcher = Dispatcher::new(Arc::clone(&self.room));
        transition(state, SessionState::Receiving);

        let outcome = 'receive: loop {
            tokio::select! {
                lines = framer.receive() => {
                    if lines.is_empty() {
                        if cb.empty_message().await.is_stop() {
                            tracing::info!(room = self.room.room_id, "empty-read budget exhausted");
                            break 'receive SessionOutcome::CommunicationLost;
                        }
                    } else {
                        let mut flow = Flow::Continue;
                        for line in &lines {
                            cb.new_message(line);
                            flow = dispatcher.process_line(line, cb);
                        }
                        if flow.is_stop() {
                            break 'receive SessionOutcome::HandlerStopped;
                        }
                    }
                }
                _ = keepalive.tick() => {
                    if let Err(e) = writer.send(&ping_frame()).await {
                        tracing::warn!(error = %e, "keepalive ping not delivered");
                    }
                }
            }
        };
        Ok(outcome)
    }
}

fn transition(state: &mut SessionState, next: SessionState) {
    tracing::debug!(from = ?*state, to = ?next, "session state");
    *state = next;
}
