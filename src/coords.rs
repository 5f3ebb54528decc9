//! Sensor coordinate handling.
//!
//! The Pinnacle reports absolute positions over a range that is larger than
//! what a finger can actually reach.  Readings are clipped to the reachable
//! area, moved so that the reachable corner is at the origin, and scaled into
//! a square logical space (`0..=scale` on both axes).

use minicbor::{Decode, Encode};

/// A position in the logical coordinate space.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Point {
        Point { x, y }
    }
}

/// The reachable range of one sensor axis.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisBounds {
    #[n(0)]
    pub lower: i32,
    #[n(1)]
    pub upper: i32,
}

impl AxisBounds {
    pub const fn new(lower: i32, upper: i32) -> AxisBounds {
        AxisBounds { lower, upper }
    }

    /// Width of the axis.  In `i64`, so no pair of bounds overflows.
    pub fn range(&self) -> i64 {
        self.upper as i64 - self.lower as i64
    }

    pub fn clip(&self, raw: i32) -> i32 {
        raw.clamp(self.lower, self.upper)
    }

    /// Non-empty, and within what the sensor can report.
    pub fn is_valid(&self) -> bool {
        self.lower >= 0 && self.upper <= u16::MAX as i32 && self.range() > 0
    }

    /// Clip, translate to the origin, and scale to `0..=scale`.  The division
    /// is done in floating point so small ranges don't bias toward zero.
    pub fn scale(&self, raw: i32, scale: f32) -> f32 {
        let translated = self.clip(raw) as i64 - self.lower as i64;
        translated as f32 * scale / self.range() as f32
    }
}

/// Reachable area of the sensor.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorBounds {
    #[n(0)]
    pub x: AxisBounds,
    #[n(1)]
    pub y: AxisBounds,
}

impl SensorBounds {
    /// The Pinnacle in absolute mode with ADC gain 0.
    pub const PINNACLE: SensorBounds = SensorBounds {
        x: AxisBounds::new(127, 1919),
        y: AxisBounds::new(63, 1471),
    };

    /// Tighter bounds, for pads under a thick overlay where the edges don't
    /// register.
    pub const PINNACLE_TIGHT: SensorBounds = SensorBounds {
        x: AxisBounds::new(296, 1755),
        y: AxisBounds::new(194, 1360),
    };

    pub fn is_valid(&self) -> bool {
        self.x.is_valid() && self.y.is_valid()
    }
}

impl Default for SensorBounds {
    fn default() -> Self {
        SensorBounds::PINNACLE
    }
}

/// Maps raw sensor readings into the logical space.
#[derive(Clone, Debug)]
pub struct CoordinateProcessor {
    bounds: SensorBounds,
    scale: f32,
}

impl CoordinateProcessor {
    /// The bounds must have a non-empty range on both axes, which
    /// `Config::validate` checks.
    pub fn new(bounds: SensorBounds, scale: f32) -> CoordinateProcessor {
        CoordinateProcessor { bounds, scale }
    }

    pub fn clip_and_scale(&self, raw_x: i32, raw_y: i32) -> Point {
        Point {
            x: self.bounds.x.scale(raw_x, self.scale),
            y: self.bounds.y.scale(raw_y, self.scale),
        }
    }
}
