use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickId(u64);

#[derive(Debug)]
struct ScheduledTick {
    id: TickId,
    handle: JoinHandle<()>,
}

/// Holds at most one pending playback tick.
///
/// A tick is a timer task that calls its `fire` callback once after the
/// period elapses. Cancelling clears the handle and aborts the timer; a tick
/// that still reaches the controller afterwards is recognized as stale by its
/// id and ignored.
#[derive(Debug, Default)]
pub struct TickScheduler {
    pending: Option<ScheduledTick>,
    next_id: u64,
}

impl TickScheduler {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: None,
            next_id: 0,
        }
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Schedules a tick `period` from now unless one is already pending.
    ///
    /// Must be called from within a tokio runtime.
    pub fn arm<F>(&mut self, period: Duration, fire: F) -> Option<TickId>
    where
        F: FnOnce(TickId) + Send + 'static,
    {
        if self.pending.is_some() {
            debug!("Tick already pending; not arming another");
            return None;
        }
        self.next_id = self.next_id.wrapping_add(1);
        let id = TickId(self.next_id);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(period).await;
            fire(id);
        });
        self.pending = Some(ScheduledTick { id, handle });
        Some(id)
    }

    /// Cancels the pending tick, if any.
    pub fn cancel(&mut self) -> bool {
        self.pending
            .take()
            .map(|tick| tick.handle.abort())
            .is_some()
    }

    /// Acknowledges a fired tick. Returns `false` for ticks that were
    /// cancelled or superseded.
    pub fn take_fired(&mut self, id: TickId) -> bool {
        if self.pending.as_ref().is_some_and(|tick| tick.id == id) {
            self.pending = None;
            return true;
        }
        false
    }
}

impl Drop for TickScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
