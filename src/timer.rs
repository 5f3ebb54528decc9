//! Pending timer bookkeeping.
//!
//! Each feature owns at most one outstanding timer.  The id is cleared when
//! the timer either expires or is cancelled, so "is a timer pending" is just
//! a check of the slot.  An expiry whose id doesn't match the slot belongs to
//! a timer that was superseded, and is dropped.

use fugit::MillisDurationU32;

use crate::{Host, Timer, TimerId};

#[derive(Debug)]
pub struct PendingTimer {
    kind: Timer,
    id: Option<TimerId>,
}

impl PendingTimer {
    pub fn new(kind: Timer) -> PendingTimer {
        PendingTimer { kind, id: None }
    }

    /// Start the timer, replacing any that is already running.
    pub fn start(&mut self, host: &mut dyn Host, delay: MillisDurationU32) {
        self.cancel(host);
        self.id = Some(host.schedule(delay, self.kind));
    }

    /// Cancel the timer, if there is one.
    pub fn cancel(&mut self, host: &mut dyn Host) {
        if let Some(id) = self.id.take() {
            host.cancel(id);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.id.is_some()
    }

    /// Handle the host reporting `id` as expired.  Returns true if it was our
    /// timer, which is then no longer pending.
    pub fn expire(&mut self, id: TimerId) -> bool {
        if self.id == Some(id) {
            self.id = None;
            true
        } else {
            false
        }
    }
}
