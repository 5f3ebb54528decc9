//! Circular scrolling.
//!
//! A touch that starts in the strip along the right edge of the pad turns the
//! pad into a dial: moving the finger around the centre scrolls, with the
//! amount proportional to the angle swept.  When the finger lifts while
//! still scrolling fast enough, the scroll keeps going on its own, slowing
//! each step until it stops.

use core::f32::consts::{PI, TAU};

use fugit::ExtU32;

use crate::log::{debug, info};
use crate::timer::PendingTimer;
use crate::{Event, Host, Timer, TimerId};

/// Period of the fling steps.
const FLING_PERIOD_MS: u32 = 10;

/// Bring an angle into `(-π, π]`.
pub fn normalize_angle(angle: f32) -> f32 {
    let mut wrapped = (angle + PI) % TAU;
    if wrapped < 0.0 {
        wrapped += TAU;
    }
    let result = wrapped - PI;
    if result <= -PI {
        result + TAU
    } else {
        result
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum ScrollState {
    Inactive,
    /// Scrolling.  The angle is that of the last point a scroll was sent
    /// for, measured around the pad centre.
    Active { start_angle: f32 },
}

/// Tuning for [`CircularScroller`].
#[derive(Clone, Copy, Debug)]
pub struct ScrollConfig {
    pub touchpad_size: f32,
    pub sensitivity: f32,
    pub zone_percentage: f32,
    pub invert: bool,
    pub fling_decay: f32,
    pub fling_min_velocity: f32,
}

pub struct CircularScroller {
    state: ScrollState,
    center: f32,
    zone_left: f32,
    touchpad_size: f32,
    /// Scroll ticks per radian.
    scroll_scale: f32,
    invert: bool,
    /// The most recent amount sent, which seeds the fling.
    last_amount: i32,
    fling_min_velocity: f32,
    fling: ScrollFling,
}

impl CircularScroller {
    pub fn new(config: &ScrollConfig) -> CircularScroller {
        let zone_width = config.touchpad_size * (config.zone_percentage / 100.0);
        CircularScroller {
            state: ScrollState::Inactive,
            center: config.touchpad_size / 2.0,
            zone_left: config.touchpad_size - zone_width,
            touchpad_size: config.touchpad_size,
            // A sensitivity of 1 is one tick per 10 degrees.
            scroll_scale: config.sensitivity * (180.0 / PI) / 10.0,
            invert: config.invert,
            last_amount: 0,
            fling_min_velocity: config.fling_min_velocity,
            fling: ScrollFling::new(config.fling_decay),
        }
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, ScrollState::Active { .. })
    }

    pub fn is_flinging(&self) -> bool {
        self.fling.timer.is_pending()
    }

    fn angle(&self, x: f32, y: f32) -> f32 {
        libm::atan2f(y - self.center, x - self.center)
    }

    /// A touch has started.  Returns true, and begins scrolling, if it is
    /// within the scroll zone.
    pub fn start_scroll(&mut self, x: f32, y: f32) -> bool {
        self.last_amount = 0;
        if self.zone_left <= x && x <= self.touchpad_size {
            let start_angle = self.angle(x, y);
            info!("scroll: start at {}", start_angle);
            self.state = ScrollState::Active { start_angle };
            true
        } else {
            self.state = ScrollState::Inactive;
            false
        }
    }

    /// The finger has moved while scrolling.
    pub fn scroll(&mut self, x: f32, y: f32, host: &mut dyn Host) {
        let ScrollState::Active { start_angle } = self.state else {
            return;
        };

        let current = self.angle(x, y);
        let delta = normalize_angle(current - start_angle);
        let mut amount = (delta * self.scroll_scale) as i32;
        if self.invert {
            amount = -amount;
        }

        // Small motions accumulate against the angle of the last scroll sent,
        // until they add up to a whole tick.
        if amount != 0 {
            debug!("scroll: delta {} amount {}", delta, amount);
            host.push(Event::Scroll(amount));
            self.state = ScrollState::Active { start_angle: current };
            self.last_amount = amount;
        }
    }

    /// The finger has lifted.  Starts a fling if the last scroll was fast
    /// enough.
    pub fn end_scroll(&mut self, host: &mut dyn Host) {
        if self.is_active() {
            info!("scroll: end");
            self.state = ScrollState::Inactive;

            if libm::fabsf(self.last_amount as f32) > self.fling_min_velocity {
                self.fling.start(self.last_amount as f32, host);
            }
        }
    }

    /// Stop any fling in progress.
    pub fn stop_fling(&mut self, host: &mut dyn Host) {
        self.fling.stop(host);
    }

    pub fn expire(&mut self, id: TimerId, host: &mut dyn Host) -> bool {
        self.fling.expire(id, host)
    }
}

/// Scroll inertia.  The amount decays geometrically each step.  The decay is
/// applied to the unrounded amount, so the falloff stays smooth even though
/// only whole ticks are sent.
struct ScrollFling {
    amount: f32,
    decay: f32,
    timer: PendingTimer,
}

impl ScrollFling {
    fn new(decay: f32) -> ScrollFling {
        ScrollFling {
            amount: 0.0,
            decay,
            timer: PendingTimer::new(Timer::ScrollFling),
        }
    }

    fn start(&mut self, amount: f32, host: &mut dyn Host) {
        info!("scroll: fling {}", amount);
        self.amount = amount;
        self.timer.start(host, FLING_PERIOD_MS.millis());
    }

    fn stop(&mut self, host: &mut dyn Host) {
        self.timer.cancel(host);
        self.amount = 0.0;
    }

    fn expire(&mut self, id: TimerId, host: &mut dyn Host) -> bool {
        if !self.timer.expire(id) {
            return false;
        }

        let step = self.amount as i32;
        self.amount *= self.decay;
        if step != 0 {
            host.push(Event::Scroll(step));
            self.timer.start(host, FLING_PERIOD_MS.millis());
        } else {
            info!("scroll: fling ended");
            self.amount = 0.0;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use core::f32::consts::PI;

    use super::{normalize_angle, CircularScroller, ScrollConfig, ScrollState};
    use crate::sim::Simulator;
    use crate::{Event, Timer};

    fn config(invert: bool) -> ScrollConfig {
        ScrollConfig {
            touchpad_size: 1024.0,
            sensitivity: 4.0,
            zone_percentage: 20.0,
            invert,
            fling_decay: 0.97,
            fling_min_velocity: 1.0,
        }
    }

    #[test]
    fn normalize_range() {
        assert_eq!(normalize_angle(0.0), 0.0);
        let mut theta = -50.0f32;
        while theta < 50.0 {
            let n = normalize_angle(theta);
            assert!(n > -PI && n <= PI, "{} -> {}", theta, n);
            theta += 0.0137;
        }
        assert!((normalize_angle(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-5);
        assert!((normalize_angle(-3.0 * PI / 2.0) - PI / 2.0).abs() < 1e-5);
        assert!(normalize_angle(PI) > 0.0);
        assert!(normalize_angle(-PI) > 0.0);
    }

    #[test]
    fn zone_boundary() {
        let mut s = CircularScroller::new(&config(false));
        assert!(!s.start_scroll(819.0, 500.0));
        assert_eq!(s.state(), ScrollState::Inactive);
        assert!(s.start_scroll(819.25, 500.0));
        assert!(s.start_scroll(1024.0, 500.0));
        assert!(s.is_active());
    }

    #[test]
    fn scroll_example() {
        crate::testlog::setup();
        let mut sim = Simulator::new();
        let mut s = CircularScroller::new(&config(false));

        assert!(s.start_scroll(900.0, 500.0));
        match s.state() {
            ScrollState::Active { start_angle } => {
                assert!((start_angle + 0.0309).abs() < 1e-3)
            }
            ScrollState::Inactive => panic!("should be scrolling"),
        }
        s.scroll(900.0, 600.0, &mut sim);
        assert_eq!(sim.take_events(), vec![Event::Scroll(5)]);
    }

    #[test]
    fn inverted_scroll() {
        let mut sim = Simulator::new();
        let mut s = CircularScroller::new(&config(true));

        s.start_scroll(900.0, 500.0);
        s.scroll(900.0, 600.0, &mut sim);
        assert_eq!(sim.take_events(), vec![Event::Scroll(-5)]);

        // Going back the other way.
        s.scroll(900.0, 500.0, &mut sim);
        assert_eq!(sim.take_events(), vec![Event::Scroll(5)]);
    }

    #[test]
    fn sub_tick_motion_accumulates() {
        let mut sim = Simulator::new();
        let mut s = CircularScroller::new(&config(false));

        s.start_scroll(900.0, 512.0);
        // Each of these is well under a tick on its own.
        s.scroll(900.0, 515.0, &mut sim);
        s.scroll(900.0, 518.0, &mut sim);
        assert!(sim.take_events().is_empty());
        for y in (521..=560).step_by(3) {
            s.scroll(900.0, y as f32, &mut sim);
        }
        let total: i32 = sim
            .take_events()
            .iter()
            .map(|e| match e {
                Event::Scroll(n) => *n,
                _ => panic!("unexpected {:?}", e),
            })
            .sum();
        assert!(total >= 2);
    }

    #[test]
    fn fling_decays_and_stops() {
        let mut sim = Simulator::new();
        let mut s = CircularScroller::new(&config(false));

        s.start_scroll(900.0, 500.0);
        s.scroll(900.0, 600.0, &mut sim);
        sim.take_events();
        s.end_scroll(&mut sim);
        assert!(!s.is_active());
        assert!(s.is_flinging());

        let mut sent = Vec::new();
        let mut steps = 0;
        while let Some(id) = sim.take_pending(Timer::ScrollFling) {
            assert!(s.expire(id, &mut sim));
            steps += 1;
            assert!(steps < 200);
        }
        for e in sim.take_events() {
            match e {
                Event::Scroll(n) => sent.push(n),
                _ => panic!("unexpected {:?}", e),
            }
        }
        assert_eq!(sent[0], 5);
        assert!(sent.windows(2).all(|w| w[1] <= w[0]));
        assert!(sent.iter().all(|&n| n > 0));
        assert!(!s.is_flinging());
    }

    #[test]
    fn slow_scroll_does_not_fling() {
        let mut sim = Simulator::new();
        let mut s = CircularScroller::new(&config(false));

        // Exactly one tick, which isn't above the minimum of 1.
        s.start_scroll(900.0, 512.0);
        let mut y = 512.0;
        while sim.timed_events().is_empty() {
            y += 1.0;
            s.scroll(900.0, y, &mut sim);
        }
        assert_eq!(sim.take_events(), vec![Event::Scroll(1)]);
        s.end_scroll(&mut sim);
        assert!(!s.is_flinging());
        assert_eq!(sim.pending_timers(), 0);
    }

    #[test]
    fn stop_cancels_fling() {
        let mut sim = Simulator::new();
        let mut s = CircularScroller::new(&config(false));

        s.start_scroll(900.0, 500.0);
        s.scroll(900.0, 600.0, &mut sim);
        s.end_scroll(&mut sim);
        assert_eq!(sim.pending_timers(), 1);
        s.stop_fling(&mut sim);
        assert_eq!(sim.pending_timers(), 0);
        assert!(!s.is_flinging());
    }
}
