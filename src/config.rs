//! Trackpad configuration.
//!
//! The defaults are the tuning used on the keyboard.  A configuration can
//! also be stored as a cbor record, in the same manner as the board
//! information page, so a build can carry its own tuning.

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;

use bitflags::bitflags;
use fugit::{ExtU32, MillisDurationU32};
use minicbor::{Decode, Encode};

use crate::debounce::MAX_DEBOUNCE_SAMPLES;
use crate::log::warn;
use crate::scroll::ScrollConfig;
use crate::{Button, SensorBounds};

bitflags! {
    /// How the pad is mounted, relative to the pointer axes.  Swapping is
    /// applied before inversion.
    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
    pub struct Orientation: u8 {
        const SWAP_XY = 0b0000_0001;
        const INVERT_X = 0b0000_0010;
        const INVERT_Y = 0b0000_0100;
    }
}

/// Tag for the cbor record: "trackpad".
pub const CONFIG_TAG: u64 = 0x747261636b706164;

#[derive(Clone, Debug, PartialEq, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
#[cbor(tag(0x747261636b706164))]
#[cbor(map)]
pub struct Config {
    /// Number of samples averaged together for smoothing.
    #[n(1)]
    pub debounce_samples: u8,

    /// How long a touch can last and still be a tap.  Also the window after
    /// a tap in which touching again starts a drag.
    #[n(2)]
    pub tap_timeout_ms: u32,

    /// Pointer fling decay per step, in (0, 1).
    #[n(3)]
    pub fling_decay: f32,

    /// Motion (in logical units per sample) needed at release to fling.
    #[n(4)]
    pub fling_min_velocity: f32,

    #[n(5)]
    pub scroll_sensitivity: f32,

    /// Width of the scroll strip on the right edge, as a percentage of the
    /// pad.
    #[n(6)]
    pub scroll_zone_percentage: f32,

    #[n(7)]
    pub invert_scroll: bool,

    #[n(8)]
    pub scroll_fling_decay: f32,

    /// Scroll ticks per sample needed at release to fling.
    #[n(9)]
    pub scroll_fling_min_velocity: f32,

    #[n(10)]
    #[cbor(with = "orientcbor")]
    pub orientation: Orientation,

    /// Size of the logical coordinate space, on both axes.
    #[n(11)]
    pub touchpad_size: u16,

    /// Button sent for taps and drags.
    #[n(12)]
    pub tap_button: Button,

    /// Width of the auto-move ring as a percentage of the radius.  `None`
    /// disables auto-move.
    #[n(13)]
    pub automove_zone_percentage: Option<f32>,

    #[n(14)]
    pub sensor: SensorBounds,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            debounce_samples: 10,
            tap_timeout_ms: 100,
            fling_decay: 0.95,
            fling_min_velocity: 10.0,
            scroll_sensitivity: 4.0,
            scroll_zone_percentage: 20.0,
            invert_scroll: false,
            scroll_fling_decay: 0.97,
            scroll_fling_min_velocity: 1.0,
            orientation: Orientation::empty(),
            touchpad_size: 1024,
            tap_button: Button::Left,
            automove_zone_percentage: None,
            sensor: SensorBounds::PINNACLE,
        }
    }
}

/// Problems with a configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The named setting is outside of what the engine can use.
    OutOfRange { field: &'static str },
    /// The sensor bounds are empty, or beyond what the sensor reports, on at
    /// least one axis.
    SensorBounds,
    /// A stored record couldn't be decoded.
    Decode,
    /// The record couldn't be encoded.
    Encode,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::OutOfRange { field } => write!(f, "{} is out of range", field),
            ConfigError::SensorBounds => write!(f, "sensor bounds are empty or out of range"),
            ConfigError::Decode => write!(f, "invalid trackpad config record"),
            ConfigError::Encode => write!(f, "unable to encode trackpad config"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

fn check(ok: bool, field: &'static str) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        warn!("config: {} is out of range", field);
        Err(ConfigError::OutOfRange { field })
    }
}

fn unit_interval(v: f32) -> bool {
    v > 0.0 && v < 1.0
}

fn percentage(v: f32) -> bool {
    (0.0..=100.0).contains(&v)
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check(
            self.debounce_samples >= 1 && self.debounce_samples as usize <= MAX_DEBOUNCE_SAMPLES,
            "debounce_samples",
        )?;
        check(self.tap_timeout_ms > 0, "tap_timeout_ms")?;
        check(unit_interval(self.fling_decay), "fling_decay")?;
        check(self.fling_min_velocity >= 0.0, "fling_min_velocity")?;
        check(self.scroll_sensitivity > 0.0, "scroll_sensitivity")?;
        check(percentage(self.scroll_zone_percentage), "scroll_zone_percentage")?;
        check(unit_interval(self.scroll_fling_decay), "scroll_fling_decay")?;
        check(self.scroll_fling_min_velocity >= 0.0, "scroll_fling_min_velocity")?;
        check(self.touchpad_size > 0, "touchpad_size")?;
        if let Some(pct) = self.automove_zone_percentage {
            check(percentage(pct), "automove_zone_percentage")?;
        }
        if !self.sensor.is_valid() {
            warn!("config: bad sensor bounds");
            return Err(ConfigError::SensorBounds);
        }
        Ok(())
    }

    pub fn tap_timeout(&self) -> MillisDurationU32 {
        self.tap_timeout_ms.millis()
    }

    pub fn scroll_config(&self) -> ScrollConfig {
        ScrollConfig {
            touchpad_size: self.touchpad_size as f32,
            sensitivity: self.scroll_sensitivity,
            zone_percentage: self.scroll_zone_percentage,
            invert: self.invert_scroll,
            fling_decay: self.scroll_fling_decay,
            fling_min_velocity: self.scroll_fling_min_velocity,
        }
    }

    /// Encode as a cbor record.
    pub fn to_cbor(&self) -> Result<Vec<u8>, ConfigError> {
        minicbor::to_vec(self).map_err(|_| ConfigError::Encode)
    }

    /// Decode, and validate, a cbor record.
    pub fn from_cbor(data: &[u8]) -> Result<Config, ConfigError> {
        let config: Config = match minicbor::decode(data) {
            Ok(config) => config,
            Err(_) => {
                warn!("config: unable to decode record");
                return Err(ConfigError::Decode);
            }
        };
        config.validate()?;
        Ok(config)
    }
}

mod orientcbor {
    //! Orientation flags are encoded as their bits.

    use minicbor::{encode::Write, Decoder, Encoder};

    use super::Orientation;

    pub fn decode<'b, Ctx>(
        d: &mut Decoder<'b>,
        _ctx: &mut Ctx,
    ) -> Result<Orientation, minicbor::decode::Error> {
        Ok(Orientation::from_bits_truncate(d.u8()?))
    }

    pub fn encode<Ctx, W: Write>(
        v: &Orientation,
        e: &mut Encoder<W>,
        _ctx: &mut Ctx,
    ) -> Result<(), minicbor::encode::Error<W::Error>> {
        e.u8(v.bits())?;
        Ok(())
    }
}
