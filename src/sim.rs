//! A host with a hand-cranked clock.
//!
//! The simulator stands in for the keyboard's scheduler and HID side: it
//! records every event pushed at it, keeps a table of pending timers, and
//! only lets time pass when asked to.  Timers that come due while advancing
//! are handed back to the scanner in deadline order, ties going to the one
//! scheduled first.

use alloc::vec::Vec;

use fugit::MillisDurationU32;

use crate::{AbsoluteReport, Event, EventQueue, MotionScanner, Scheduler, Timable, Timer, TimerId};

#[derive(Clone, Copy, Debug)]
struct Pending {
    id: TimerId,
    deadline: u64,
    timer: Timer,
}

#[derive(Debug, Default)]
pub struct Simulator {
    now: u64,
    next_id: u32,
    pending: Vec<Pending>,
    events: Vec<(u64, Event)>,
}

impl Simulator {
    pub fn new() -> Simulator {
        Simulator::default()
    }

    /// Feed one normalized sample to the scanner, at the current time.
    pub fn scan(&mut self, scanner: &mut MotionScanner, x: f32, y: f32, touching: bool) {
        scanner.scan(x, y, touching, self);
    }

    /// Feed one raw sensor report to the scanner, at the current time.
    pub fn report(&mut self, scanner: &mut MotionScanner, report: &AbsoluteReport) {
        scanner.scan_report(report, self);
    }

    /// Let `ms` milliseconds pass, expiring any timers that come due.
    pub fn advance(&mut self, scanner: &mut MotionScanner, ms: u64) {
        let target = self.now + ms;
        while let Some(next) = self.next_due(target) {
            let entry = self.pending.remove(next);
            self.now = entry.deadline;
            scanner.expire(entry.timer, entry.id, self);
        }
        self.now = target;
    }

    /// Advance until no timers are pending, or `limit` milliseconds have
    /// passed.  Returns how long it took.
    pub fn settle(&mut self, scanner: &mut MotionScanner, limit: u64) -> u64 {
        let start = self.now;
        while let Some(deadline) = self.pending.iter().map(|p| p.deadline).min() {
            if deadline > start + limit {
                break;
            }
            self.advance(scanner, deadline - self.now);
        }
        self.now - start
    }

    fn next_due(&self, target: u64) -> Option<usize> {
        self.pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.deadline <= target)
            .min_by_key(|(_, p)| (p.deadline, p.id))
            .map(|(i, _)| i)
    }

    /// Events seen so far, with the time they were pushed.
    pub fn timed_events(&self) -> &[(u64, Event)] {
        &self.events
    }

    /// Remove and return the events seen so far.
    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.drain(..).map(|(_, e)| e).collect()
    }

    pub fn pending_timers(&self) -> usize {
        self.pending.len()
    }

    /// The id of a pending timer of the given kind.
    pub fn find_pending(&self, timer: Timer) -> Option<TimerId> {
        self.pending.iter().find(|p| p.timer == timer).map(|p| p.id)
    }

    /// Remove a pending timer of the given kind, as if it had just expired,
    /// without telling anyone.  For driving a single component by hand.
    pub fn take_pending(&mut self, timer: Timer) -> Option<TimerId> {
        let pos = self.pending.iter().position(|p| p.timer == timer)?;
        let entry = self.pending.remove(pos);
        Some(entry.id)
    }
}

impl EventQueue for Simulator {
    fn push(&mut self, val: Event) {
        self.events.push((self.now, val));
    }
}

impl Scheduler for Simulator {
    fn schedule(&mut self, delay: MillisDurationU32, timer: Timer) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.pending.push(Pending {
            id,
            deadline: self.now + delay.to_millis() as u64,
            timer,
        });
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.pending.retain(|p| p.id != id);
    }
}

impl Timable for Simulator {
    fn get_ticks(&self) -> u64 {
        self.now
    }
}
