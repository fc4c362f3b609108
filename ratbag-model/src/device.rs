//! Device, button action and identifier types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of device as reported by the native layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceType {
    #[default]
    Unspecified,
    Other,
    Mouse,
    Keyboard,
}

impl DeviceType {
    pub fn from_u32(value: u32) -> Self {
        match value {
            1 => Self::Other,
            2 => Self::Mouse,
            3 => Self::Keyboard,
            _ => Self::Unspecified,
        }
    }

    pub fn raw(self) -> u32 {
        match self {
            Self::Unspecified => 0,
            Self::Other => 1,
            Self::Mouse => 2,
            Self::Keyboard => 3,
        }
    }
}

/// Bus, vendor and product identifiers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceIds {
    /// Bus type as the kernel names it (`usb`, `bluetooth`)
    pub bustype: String,
    pub vendor_id: u16,
    pub product_id: u16,
}

impl DeviceIds {
    /// Model string in the `bus:vid:pid:version` form used by device files
    pub fn model(&self) -> String {
        format!("{}:{:04x}:{:04x}:0", self.bustype, self.vendor_id, self.product_id)
    }
}

impl fmt::Display for DeviceIds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04x}:{:04x}", self.vendor_id, self.product_id)
    }
}

/// What a button does when pressed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionType {
    /// Button is disabled
    #[default]
    None,
    /// Logical mouse button
    Button,
    /// Device-specific special function
    Special,
    /// Single keycode
    Key,
    /// Key/wait macro
    Macro,
    /// Action the native layer could not decode
    Unknown,
}

impl ActionType {
    pub const ALL: &'static [Self] = &[
        Self::None,
        Self::Button,
        Self::Special,
        Self::Key,
        Self::Macro,
        Self::Unknown,
    ];

    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::None),
            1 => Some(Self::Button),
            2 => Some(Self::Special),
            3 => Some(Self::Key),
            4 => Some(Self::Macro),
            1000 => Some(Self::Unknown),
            _ => None,
        }
    }

    pub fn raw(self) -> u32 {
        match self {
            Self::None => 0,
            Self::Button => 1,
            Self::Special => 2,
            Self::Key => 3,
            Self::Macro => 4,
            Self::Unknown => 1000,
        }
    }
}

/// Base value of special action codes
pub const SPECIAL_ACTION_BASE: u32 = 0x4000_0000;

/// Special button functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpecialAction {
    Unknown,
    Doubleclick,
    WheelLeft,
    WheelRight,
    WheelUp,
    WheelDown,
    RatchetModeSwitch,
    ResolutionCycleUp,
    ResolutionCycleDown,
    ResolutionUp,
    ResolutionDown,
    ResolutionAlternate,
    ResolutionDefault,
    ProfileCycleUp,
    ProfileCycleDown,
    ProfileUp,
    ProfileDown,
    SecondMode,
    BatteryLevel,
}

impl SpecialAction {
    /// All special actions in native code order
    pub const ALL: &'static [Self] = &[
        Self::Unknown,
        Self::Doubleclick,
        Self::WheelLeft,
        Self::WheelRight,
        Self::WheelUp,
        Self::WheelDown,
        Self::RatchetModeSwitch,
        Self::ResolutionCycleUp,
        Self::ResolutionCycleDown,
        Self::ResolutionUp,
        Self::ResolutionDown,
        Self::ResolutionAlternate,
        Self::ResolutionDefault,
        Self::ProfileCycleUp,
        Self::ProfileCycleDown,
        Self::ProfileUp,
        Self::ProfileDown,
        Self::SecondMode,
        Self::BatteryLevel,
    ];

    pub fn from_u32(value: u32) -> Option<Self> {
        let offset = value.checked_sub(SPECIAL_ACTION_BASE)?;
        Self::ALL.get(offset as usize).copied()
    }

    pub fn raw(self) -> u32 {
        // ALL is in native order, so the position is the offset
        let offset = Self::ALL.iter().position(|&a| a == self).unwrap_or(0);
        SPECIAL_ACTION_BASE + offset as u32
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Doubleclick => "Double Click",
            Self::WheelLeft => "Wheel Left",
            Self::WheelRight => "Wheel Right",
            Self::WheelUp => "Wheel Up",
            Self::WheelDown => "Wheel Down",
            Self::RatchetModeSwitch => "Ratchet Mode",
            Self::ResolutionCycleUp => "Cycle Resolution Up",
            Self::ResolutionCycleDown => "Cycle Resolution Down",
            Self::ResolutionUp => "Resolution Up",
            Self::ResolutionDown => "Resolution Down",
            Self::ResolutionAlternate => "Resolution Switch",
            Self::ResolutionDefault => "Default Resolution",
            Self::ProfileCycleUp => "Cycle Profile Up",
            Self::ProfileCycleDown => "Cycle Profile Down",
            Self::ProfileUp => "Profile Up",
            Self::ProfileDown => "Profile Down",
            Self::SecondMode => "Second Mode",
            Self::BatteryLevel => "Battery Level",
        }
    }
}

impl fmt::Display for SpecialAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
