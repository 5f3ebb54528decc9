//! BBQ trackpad gestures
//!
//! Interprets the stream of absolute samples from a Cirque Pinnacle trackpad
//! as pointer motion, taps, tap-and-drag, circular scrolling, and the
//! inertial "fling" that continues motion after the finger lifts.
//!
//! The engine doesn't talk to USB, and doesn't own a clock. Everything it
//! wants done goes through a [`Host`]: events are pushed onto its
//! [`EventQueue`], and timeouts are requested from its [`Scheduler`]. When a
//! requested timer elapses, the host hands it back through
//! [`MotionScanner::expire`].

#![cfg_attr(not(any(feature = "std", test)), no_std)]
// #![deny(missing_docs)]

#[cfg(not(any(feature = "std", test)))]
extern crate core as std;

extern crate alloc;

use fugit::MillisDurationU32;
use minicbor::{Decode, Encode};

pub use config::{Config, ConfigError, Orientation};
pub use coords::{AxisBounds, CoordinateProcessor, Point, SensorBounds};
pub use pinnacle::AbsoluteReport;
pub use scanner::MotionScanner;

pub mod automove;
pub mod config;
pub mod coords;
pub mod debounce;
pub mod fling;
pub mod pinnacle;
pub mod scanner;
pub mod scroll;
pub mod tap;
pub mod timer;

#[cfg(any(feature = "std", test))]
pub mod sim;

#[cfg(test)]
mod testlog;

cfg_if::cfg_if! {
    if #[cfg(feature = "defmt")] {
        mod log {
            pub use defmt::{debug, info, warn};
        }
    } else if #[cfg(feature = "log")] {
        mod log {
            pub use ::log::{debug, info, warn};
        }
    } else {
        #[allow(unused_macros)]
        mod log {
            macro_rules! debug { ($($arg:tt)*) => {{}}; }
            macro_rules! info { ($($arg:tt)*) => {{}}; }
            macro_rules! warn { ($($arg:tt)*) => {{}}; }
            #[allow(unused_imports)]
            pub(crate) use {debug, info, warn};
        }
    }
}

/// The logical pointer buttons the engine can press.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cbor(index_only)]
pub enum Button {
    #[n(0)]
    Left,
    #[n(1)]
    Right,
    #[n(2)]
    Middle,
}

/// An event is something the engine has decided the host should do.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum Event {
    /// Relative pointer motion.
    Move { dx: i32, dy: i32 },

    /// Scroll wheel ticks.  Positive values follow counter-clockwise motion
    /// around the pad, unless scrolling is inverted.
    Scroll(i32),

    /// Hold the given button down.
    Press(Button),

    /// Let go of the given button.
    Release(Button),

    /// Press and immediately release the given button.
    Tap(Button),

    /// A finger has come down on the pad.  Keymaps use this to bring in a
    /// mouse-button layer while touching.
    TouchStart,

    /// The finger has left the pad.
    TouchEnd,
}

/// A generalized event queue.
pub trait EventQueue {
    // Push an event.  Events may be discarded if the queue is full.
    fn push(&mut self, val: Event);
}

/// The features of the engine that use timers.  The host keeps this with the
/// timer, and gives it back when the timer expires.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum Timer {
    /// Deciding if a touch is a tap.
    Tap,
    /// After a tap, waiting to see if the finger comes back down to drag.
    DragRelease,
    /// Inertial pointer motion.
    Fling,
    /// Inertial scrolling.
    ScrollFling,
}

/// Handle of a scheduled timer, handed out by the [`Scheduler`].
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Debug)]
pub struct TimerId(pub u32);

/// Something that can run a timer for us.  Timers are one-shot.  Cancelling
/// a timer that has already expired, or was already cancelled, must do
/// nothing.
pub trait Scheduler {
    fn schedule(&mut self, delay: MillisDurationU32, timer: Timer) -> TimerId;
    fn cancel(&mut self, id: TimerId);
}

/// Everything the engine needs from its surroundings.
pub trait Host: EventQueue + Scheduler {}

impl<T: EventQueue + Scheduler + ?Sized> Host for T {}

/// Something we can use to get time.
pub trait Timable {
    fn get_ticks(&self) -> u64;
}
