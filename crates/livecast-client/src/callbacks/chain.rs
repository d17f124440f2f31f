//! The composed production callback: base layer + hook pipeline.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use livecast_core::error::Result;

use crate::room::Room;

use super::sink::{CaptureSink, TermSink};
use super::{BroadcastCallback, Flow, HookCtx, PreDispatchHook};

/// Bounded-retry policy for reads that produce nothing.
#[derive(Debug, Clone, Copy)]
pub struct EmptyReadPolicy {
    /// Consecutive empty reads tolerated before giving up.
    pub limit: u32,
    /// Pause between retries.
    pub delay: Duration,
}

impl Default for EmptyReadPolicy {
    fn default() -> Self {
        Self {
            limit: 50,
            delay: Duration::from_secs(1),
        }
    }
}

/// Base layer (capture sink, empty-read budget) plus an ordered pipeline of
/// pre-dispatch hooks. All message handlers keep their inert defaults; the
/// chain variants only shape presentation.
pub struct CallbackChain {
    alias: &'static str,
    room: Arc<Room>,
    capture: CaptureSink,
    term: TermSink,
    hooks: Vec<Box<dyn PreDispatchHook>>,
    policy: EmptyReadPolicy,
    empty_count: u32,
}

impl CallbackChain {
    pub fn new(
        alias: &'static str,
        room: Arc<Room>,
        capture: CaptureSink,
        hooks: Vec<Box<dyn PreDispatchHook>>,
    ) -> Self {
        Self {
            alias,
            room,
            capture,
            term: TermSink::stdio(),
            hooks,
            policy: EmptyReadPolicy::default(),
            empty_count: 0,
        }
    }

    pub fn with_policy(mut self, policy: EmptyReadPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Swap the terminal sink; tests capture output through this.
    pub fn with_term(mut self, term: TermSink) -> Self {
        self.term = term;
        self
    }

    pub fn room(&self) -> &Room {
        &self.room
    }
}

#[async_trait]
impl BroadcastCallback for CallbackChain {
    fn alias(&self) -> &'static str {
        self.alias
    }

    fn initialize(&mut self) -> Result<()> {
        self.capture.open()
    }

    fn terminate(&mut self) -> Result<()> {
        self.capture.close()
    }

    fn new_message(&mut self, line: &str) {
        self.empty_count = 0;
        self.capture.record(line);
    }

    async fn empty_message(&mut self) -> Flow {
        self.empty_count += 1;
        if self.empty_count > self.policy.limit {
            self.new_message("No communication with server, aborting.");
            Flow::Stop
        } else {
            tokio::time::sleep(self.policy.delay).await;
            Flow::Continue
        }
    }

    fn pre_dispatch(&mut self, ctx: &HookCtx<'_>) -> Result<()> {
        for hook in &mut self.hooks {
            hook.inspect(ctx, &mut self.term)?;
        }
        Ok(())
    }
}
