//! LED types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum brightness value accepted by the native layer
pub const BRIGHTNESS_MAX: u32 = 255;

/// RGB color value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Reduce to what an LED with the given depth can show.
    ///
    /// Monochrome LEDs only know on/off and RGB111 LEDs one bit per channel,
    /// so each channel is thresholded at half intensity.
    pub fn quantize(self, depth: ColorDepth) -> Self {
        let bit = |c: u8| if c >= 0x80 { 0xFF } else { 0x00 };
        match depth {
            ColorDepth::Rgb888 => self,
            ColorDepth::Rgb111 => Self::new(bit(self.r), bit(self.g), bit(self.b)),
            ColorDepth::Monochrome => {
                if self.r.max(self.g).max(self.b) >= 0x80 {
                    Self::WHITE
                } else {
                    Self::BLACK
                }
            }
        }
    }

    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };
    pub const WHITE: Self = Self {
        r: 255,
        g: 255,
        b: 255,
    };
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// LED effect mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[repr(u32)]
pub enum LedMode {
    Off = 0,
    On = 1,
    Cycle = 2,
    Breathing = 3,
}

impl LedMode {
    pub const ALL: &'static [Self] = &[Self::Off, Self::On, Self::Cycle, Self::Breathing];

    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Off),
            1 => Some(Self::On),
            2 => Some(Self::Cycle),
            3 => Some(Self::Breathing),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Off => "Off",
            Self::On => "Solid",
            Self::Cycle => "Cycle",
            Self::Breathing => "Breathing",
        }
    }

    /// Whether the effect has a speed (effect duration) parameter
    pub fn has_duration(&self) -> bool {
        matches!(self, Self::Cycle | Self::Breathing)
    }
}

/// Color resolution an LED supports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[repr(u32)]
pub enum ColorDepth {
    Monochrome = 0,
    #[default]
    Rgb888 = 1,
    Rgb111 = 2,
}

impl ColorDepth {
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Monochrome),
            1 => Some(Self::Rgb888),
            2 => Some(Self::Rgb111),
            _ => None,
        }
    }
}
