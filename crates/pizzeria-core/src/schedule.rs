//! # Deferred Actions
//!
//! Two things on the register happen "a moment later": returning to the menu
//! after a pizza is added, and printing once the ticket view has settled.
//! Both are scheduled here against virtual time so the session stays pure.
//!
//! ## Virtual Time
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  now = Duration since the session started, supplied by the caller       │
//! │                                                                         │
//! │  schedule(now=2.0s, 1.5s, ReturnToOrdering) ──► due at 3.5s             │
//! │  take_due(now=3.0s) ──► []                                              │
//! │  take_due(now=3.6s) ──► [ReturnToOrdering]                              │
//! │                                                                         │
//! │  register: tokio sleeps until next_deadline()                           │
//! │  tests:    call take_due() with whatever time they like                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

/// Something the session does later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    /// Close the customizer after a pizza was added.
    ReturnToOrdering,
    /// Send the shown ticket to the printer.
    Print,
}

/// Handle for cancelling a scheduled action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone)]
struct Scheduled {
    handle: TaskHandle,
    due: Duration,
    action: DeferredAction,
}

/// Pending deferred actions.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    pending: Vec<Scheduled>,
    next_handle: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `action` to run `delay` after `now`.
    pub fn schedule(&mut self, now: Duration, delay: Duration, action: DeferredAction) -> TaskHandle {
        self.next_handle += 1;
        let handle = TaskHandle(self.next_handle);
        self.pending.push(Scheduled {
            handle,
            due: now.saturating_add(delay),
            action,
        });
        handle
    }

    /// Cancels a pending action. Returns `false` if it already ran or was
    /// cancelled before.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|s| s.handle != handle);
        self.pending.len() != before
    }

    /// Removes and returns every action due at or before `now`, earliest
    /// first; actions due at the same instant keep scheduling order.
    pub fn take_due(&mut self, now: Duration) -> Vec<(TaskHandle, DeferredAction)> {
        let (mut due, pending): (Vec<Scheduled>, Vec<Scheduled>) =
            self.pending.drain(..).partition(|s| s.due <= now);
        self.pending = pending;

        due.sort_by_key(|s| (s.due, s.handle.0));
        due.into_iter().map(|s| (s.handle, s.action)).collect()
    }

    /// When the earliest pending action is due.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.iter().map(|s| s.due).min()
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.pending.iter().any(|s| s.handle == handle)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
