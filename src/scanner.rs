//! The motion scanner.
//!
//! Every sample from the pad comes through [`MotionScanner::scan`].  What
//! happens depends on how the touching state changed since the last sample:
//!
//! - Touch start: reset the smoothing window, and decide if this touch is a
//!   scroll (it started in the scroll zone) or a possible tap.  Any fling
//!   still running from the last touch is stopped.
//! - Move: smooth the position.  While the tap detector is still deciding,
//!   nothing moves.  Otherwise the motion goes to the scroller if scrolling,
//!   or becomes relative pointer motion.
//! - Touch end: finish the tap, and either end the scroll (which may fling
//!   the scroll) or fling the pointer.
//!
//! Timers requested by any of the parts are handed back through
//! [`MotionScanner::expire`].

use crate::automove::Automover;
use crate::config::{Config, ConfigError, Orientation};
use crate::coords::{CoordinateProcessor, Point};
use crate::debounce::Debouncer;
use crate::fling::FlingHandler;
use crate::log::{debug, info};
use crate::pinnacle::AbsoluteReport;
use crate::scroll::CircularScroller;
use crate::tap::TapDetector;
use crate::{Event, Host, Timer, TimerId};

pub struct MotionScanner {
    orientation: Orientation,
    touchpad_size: f32,
    coords: CoordinateProcessor,

    is_touching: bool,
    /// Last position that pointer motion was sent for.
    current: Point,

    debouncer: Debouncer,
    tap: TapDetector,
    scroller: CircularScroller,
    fling: FlingHandler,
    automover: Option<Automover>,
}

impl MotionScanner {
    pub fn new(config: &Config) -> Result<MotionScanner, ConfigError> {
        config.validate()?;
        let touchpad_size = config.touchpad_size as f32;
        Ok(MotionScanner {
            orientation: config.orientation,
            touchpad_size,
            coords: CoordinateProcessor::new(config.sensor, touchpad_size),
            is_touching: false,
            current: Point::default(),
            debouncer: Debouncer::new(config.debounce_samples as usize),
            tap: TapDetector::new(config.tap_timeout(), config.tap_button),
            scroller: CircularScroller::new(&config.scroll_config()),
            fling: FlingHandler::new(config.fling_decay, config.fling_min_velocity),
            automover: config
                .automove_zone_percentage
                .map(|pct| Automover::new(touchpad_size, pct)),
        })
    }

    pub fn is_touching(&self) -> bool {
        self.is_touching
    }

    pub fn is_scrolling(&self) -> bool {
        self.scroller.is_active()
    }

    pub fn is_flinging(&self) -> bool {
        self.fling.is_flinging() || self.scroller.is_flinging()
    }

    pub fn tap_detector(&self) -> &TapDetector {
        &self.tap
    }

    /// Handle a raw report from the sensor.
    pub fn scan_report(&mut self, report: &AbsoluteReport, host: &mut dyn Host) {
        let p = self
            .coords
            .clip_and_scale(report.x as i32, report.y as i32);
        self.scan(p.x, p.y, report.is_touching(), host);
    }

    /// Handle a sample already in the logical coordinate space.
    pub fn scan(&mut self, x: f32, y: f32, touching: bool, host: &mut dyn Host) {
        let (mut x, mut y) = (x, y);
        if self.orientation.contains(Orientation::SWAP_XY) {
            (x, y) = (y, x);
        }
        if self.orientation.contains(Orientation::INVERT_X) {
            x = self.touchpad_size - x;
        }
        if self.orientation.contains(Orientation::INVERT_Y) {
            y = self.touchpad_size - y;
        }

        match (touching, self.is_touching) {
            (true, false) => {
                self.debouncer.start(x, y);
                self.touch_start(x, y, host);
            }
            (false, true) => self.touch_end(host),
            (true, true) => {
                let (x, y) = self.debouncer.filter(x, y);
                self.motion(x, y, host);
            }
            (false, false) => (),
        }
    }

    fn touch_start(&mut self, x: f32, y: f32, host: &mut dyn Host) {
        info!("touch: start ({}, {})", x, y);
        self.is_touching = true;
        self.current = Point::new(x, y);

        // Stop anything left from the last touch before deciding what this
        // one is.
        self.fling.stop_fling(host);
        self.scroller.stop_fling(host);
        if let Some(automover) = &mut self.automover {
            automover.clear();
        }

        host.push(Event::TouchStart);

        if self.scroller.start_scroll(x, y) {
            self.tap.reset(host);
        } else {
            self.tap.on_touch_start(host);
        }
    }

    fn touch_end(&mut self, host: &mut dyn Host) {
        info!("touch: end");
        self.is_touching = false;
        host.push(Event::TouchEnd);

        self.tap.on_touch_end(host);
        if self.scroller.is_active() {
            self.scroller.end_scroll(host);
        } else {
            self.fling.start_fling(host);
        }
    }

    fn motion(&mut self, x: f32, y: f32, host: &mut dyn Host) {
        if self.tap.is_busy() {
            return;
        }

        if self.scroller.is_active() {
            self.scroller.scroll(x, y, host);
            return;
        }

        if let Some(automover) = &self.automover {
            if automover.is_active(x, y) {
                automover.automove(host);
                self.current = Point::new(x, y);
                return;
            }
        }

        let dx = (x - self.current.x) as i32;
        let dy = (y - self.current.y) as i32;
        host.push(Event::Move { dx, dy });
        self.current = Point::new(x, y);
        self.fling.record_motion(dx, dy);
        if let Some(automover) = &mut self.automover {
            automover.record_motion(dx, dy);
        }
    }

    /// A timer requested through the host has expired.
    pub fn expire(&mut self, timer: Timer, id: TimerId, host: &mut dyn Host) {
        let ours = match timer {
            Timer::Tap | Timer::DragRelease => self.tap.expire(id),
            Timer::Fling => self.fling.expire(id, host),
            Timer::ScrollFling => self.scroller.expire(id, host),
        };
        if !ours {
            debug!("scanner: stale timer {}", id.0);
        }
    }
}
