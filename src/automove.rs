//! Edge auto-move.
//!
//! The pad is round, and small.  When the finger reaches the outer ring it
//! runs out of room, so instead of stopping the pointer we keep moving it
//! along the last motion vector for as long as the finger stays out there.

use crate::log::debug;
use crate::{Event, Host};

pub struct Automover {
    center: f32,
    inner_radius: f32,
    dx: i32,
    dy: i32,
}

impl Automover {
    /// The outer `outer_percentage` percent of the pad's radius is the
    /// auto-move ring.
    pub fn new(touchpad_size: f32, outer_percentage: f32) -> Automover {
        let radius = touchpad_size / 2.0;
        Automover {
            center: radius,
            inner_radius: radius * (1.0 - outer_percentage / 100.0),
            dx: 0,
            dy: 0,
        }
    }

    pub fn record_motion(&mut self, dx: i32, dy: i32) {
        self.dx = dx;
        self.dy = dy;
    }

    pub fn is_active(&self, x: f32, y: f32) -> bool {
        let distance = libm::hypotf(x - self.center, y - self.center);
        distance > self.inner_radius
    }

    /// Send the remembered motion again.
    pub fn automove(&self, host: &mut dyn Host) {
        debug!("automove: ({}, {})", self.dx, self.dy);
        host.push(Event::Move { dx: self.dx, dy: self.dy });
    }

    pub fn clear(&mut self) {
        self.dx = 0;
        self.dy = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::Automover;
    use crate::sim::Simulator;
    use crate::Event;

    #[test]
    fn ring() {
        let am = Automover::new(1024.0, 20.0);
        // Inner radius is 409.6.
        assert!(!am.is_active(512.0, 512.0));
        assert!(!am.is_active(512.0 + 409.0, 512.0));
        assert!(am.is_active(512.0 + 410.0, 512.0));
        assert!(am.is_active(512.0 - 300.0, 512.0 - 300.0));
    }

    #[test]
    fn repeats_last_motion() {
        let mut sim = Simulator::new();
        let mut am = Automover::new(1024.0, 20.0);

        am.record_motion(3, -4);
        am.automove(&mut sim);
        am.automove(&mut sim);
        assert_eq!(
            sim.take_events(),
            vec![Event::Move { dx: 3, dy: -4 }, Event::Move { dx: 3, dy: -4 }]
        );

        am.clear();
        am.automove(&mut sim);
        assert_eq!(sim.take_events(), vec![Event::Move { dx: 0, dy: 0 }]);
    }
}
