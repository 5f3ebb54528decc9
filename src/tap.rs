//! Tap and tap-and-drag detection.
//!
//! A touch that ends before the tap timeout is a tap.  We can't wait to see if
//! a drag follows before sending the tap, as that would make every click feel
//! sluggish, so the tap goes out immediately.  The drag-release window then
//! starts: if the finger comes back down before it closes, the button is
//! pressed and held until that second touch ends.
//!
//! A touch that outlasts the tap timeout is just pointer motion, and produces
//! no button events at all.
//!
//! While either timer is running, [`TapDetector::is_busy`] is true, and the
//! scanner holds back pointer motion so that the small wobble of a tapping
//! finger doesn't move the pointer away from what is being clicked.

use fugit::MillisDurationU32;

use crate::log::{debug, info};
use crate::timer::PendingTimer;
use crate::{Button, Event, Host, TimerId};

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum GestureState {
    Idle,
    /// Touching, and the tap timer is running.
    AwaitingTap,
    /// Second touch of a tap-and-drag.  The button is down.
    Dragging,
    /// Tap has been sent, and the drag-release timer is running.
    AwaitingDragRelease,
}

pub struct TapDetector {
    state: GestureState,
    timeout: MillisDurationU32,
    button: Button,
    tap_timer: PendingTimer,
    drag_timer: PendingTimer,
}

impl TapDetector {
    pub fn new(timeout: MillisDurationU32, button: Button) -> TapDetector {
        TapDetector {
            state: GestureState::Idle,
            timeout,
            button,
            tap_timer: PendingTimer::new(crate::Timer::Tap),
            drag_timer: PendingTimer::new(crate::Timer::DragRelease),
        }
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Are we in the middle of deciding what a touch means?
    pub fn is_busy(&self) -> bool {
        self.tap_timer.is_pending() || self.drag_timer.is_pending()
    }

    pub fn on_touch_start(&mut self, host: &mut dyn Host) {
        if self.state == GestureState::AwaitingDragRelease {
            info!("tap: drag start");
            self.drag_timer.cancel(host);
            self.state = GestureState::Dragging;
            host.push(Event::Press(self.button));
            return;
        }

        self.tap_timer.start(host, self.timeout);
        self.state = GestureState::AwaitingTap;
    }

    pub fn on_touch_end(&mut self, host: &mut dyn Host) {
        match self.state {
            GestureState::Dragging => {
                info!("tap: drag end");
                host.push(Event::Release(self.button));
                self.drag_timer.cancel(host);
                self.state = GestureState::Idle;
            }
            GestureState::AwaitingTap => {
                info!("tap: registered");
                self.tap_timer.cancel(host);
                host.push(Event::Tap(self.button));
                self.drag_timer.start(host, self.timeout);
                self.state = GestureState::AwaitingDragRelease;
            }
            GestureState::Idle | GestureState::AwaitingDragRelease => (),
        }
    }

    /// Drop whatever we were in the middle of, without sending a tap.  Used
    /// when a touch turns out to be a scroll.
    pub fn reset(&mut self, host: &mut dyn Host) {
        self.tap_timer.cancel(host);
        self.drag_timer.cancel(host);
        if self.state == GestureState::Dragging {
            host.push(Event::Release(self.button));
        }
        self.state = GestureState::Idle;
    }

    /// Handle one of our timers expiring.  Returns false if the timer wasn't
    /// ours, or has been superseded.
    pub fn expire(&mut self, id: TimerId) -> bool {
        if self.tap_timer.expire(id) {
            // Held too long to be a tap.
            debug!("tap: timed out");
            if self.state == GestureState::AwaitingTap {
                self.state = GestureState::Idle;
            }
            true
        } else if self.drag_timer.expire(id) {
            debug!("tap: drag window closed");
            if self.state == GestureState::AwaitingDragRelease {
                self.state = GestureState::Idle;
            }
            true
        } else {
            false
        }
    }
}
