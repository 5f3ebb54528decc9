//! Pointer inertia.
//!
//! We remember the last motion vector sent while the finger was down.  If it
//! was fast enough when the finger lifts, the pointer keeps moving along it,
//! slowing by `decay` every step until the rounded motion is zero.

use fugit::ExtU32;

use crate::log::info;
use crate::timer::PendingTimer;
use crate::{Event, Host, Timer, TimerId};

/// Period of the fling steps.
const FLING_PERIOD_MS: u32 = 10;

pub struct FlingHandler {
    dx: f32,
    dy: f32,
    decay: f32,
    min_velocity: f32,
    timer: PendingTimer,
}

impl FlingHandler {
    pub fn new(decay: f32, min_velocity: f32) -> FlingHandler {
        FlingHandler {
            dx: 0.0,
            dy: 0.0,
            decay,
            min_velocity,
            timer: PendingTimer::new(Timer::Fling),
        }
    }

    /// Remember the most recent motion sent.
    pub fn record_motion(&mut self, dx: i32, dy: i32) {
        self.dx = dx as f32;
        self.dy = dy as f32;
    }

    pub fn is_flinging(&self) -> bool {
        self.timer.is_pending()
    }

    /// The finger has lifted.  Start flinging if the last motion was fast
    /// enough.  Returns true if a fling was started.
    pub fn start_fling(&mut self, host: &mut dyn Host) -> bool {
        let magnitude = libm::sqrtf(self.dx * self.dx + self.dy * self.dy);
        if magnitude > self.min_velocity {
            info!("fling: start ({}, {})", self.dx, self.dy);
            self.timer.start(host, FLING_PERIOD_MS.millis());
            true
        } else {
            false
        }
    }

    /// Cancel any fling, and forget the motion.  A new touch must not have the
    /// pointer wandering off from under it.
    pub fn stop_fling(&mut self, host: &mut dyn Host) {
        self.timer.cancel(host);
        self.dx = 0.0;
        self.dy = 0.0;
    }

    pub fn expire(&mut self, id: TimerId, host: &mut dyn Host) -> bool {
        if !self.timer.expire(id) {
            return false;
        }

        let step_x = self.dx as i32;
        let step_y = self.dy as i32;
        self.dx *= self.decay;
        self.dy *= self.decay;

        if step_x != 0 || step_y != 0 {
            host.push(Event::Move { dx: step_x, dy: step_y });
            self.timer.start(host, FLING_PERIOD_MS.millis());
        } else {
            info!("fling: ended");
        }
        true
    }
}
