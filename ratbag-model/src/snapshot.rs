//! Typed plain-data view of a native device
//!
//! [`load_device`] walks a native device once, converts every raw code into
//! its typed enum and queries every capability into a
//! [`CapabilitySet`]. The result is ordinary data: cloneable, serializable
//! and detached from the native context.

use crate::capability::{Capability, CapabilitySet, ProfileCapability, ResolutionCapability};
use crate::device::{ActionType, DeviceIds, DeviceType, SpecialAction};
use crate::error::RatbagError;
use crate::led::{Color, ColorDepth, LedMode};
use crate::native::{
    NativeButton, NativeDevice, NativeLed, NativeMacro, NativeProfile, NativeResolution,
};
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionSnapshot {
    pub index: usize,
    pub dpi: (u32, u32),
    pub dpi_list: Vec<u32>,
    pub capabilities: CapabilitySet<ResolutionCapability>,
    pub is_active: bool,
    pub is_default: bool,
    pub is_disabled: bool,
}

/// Decoded button action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ButtonAction {
    None,
    Button { button: u32 },
    Special { special: SpecialAction },
    Key { key: u32 },
    /// Macro with its number of native events
    Macro { events: usize },
    Unknown,
}

impl ButtonAction {
    pub fn action_type(&self) -> ActionType {
        match self {
            Self::None => ActionType::None,
            Self::Button { .. } => ActionType::Button,
            Self::Special { .. } => ActionType::Special,
            Self::Key { .. } => ActionType::Key,
            Self::Macro { .. } => ActionType::Macro,
            Self::Unknown => ActionType::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ButtonSnapshot {
    pub index: usize,
    pub action: ButtonAction,
    pub action_types: Vec<ActionType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedSnapshot {
    pub index: usize,
    pub mode: LedMode,
    pub modes: Vec<LedMode>,
    pub color: Color,
    pub color_depth: ColorDepth,
    pub effect_duration: u32,
    pub brightness: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileSnapshot {
    pub index: usize,
    pub name: Option<String>,
    pub capabilities: CapabilitySet<ProfileCapability>,
    pub is_active: bool,
    pub is_enabled: bool,
    pub report_rate: u32,
    pub report_rates: Vec<u32>,
    pub debounce: Option<u32>,
    pub debounces: Vec<u32>,
    pub resolutions: Vec<ResolutionSnapshot>,
    pub buttons: Vec<ButtonSnapshot>,
    pub leds: Vec<LedSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceSnapshot {
    pub sysname: String,
    pub name: String,
    pub ids: DeviceIds,
    pub firmware_version: String,
    pub device_type: DeviceType,
    pub profiles: Vec<ProfileSnapshot>,
}

impl DeviceSnapshot {
    /// The active profile, if the device reports one
    pub fn active_profile(&self) -> Option<&ProfileSnapshot> {
        self.profiles.iter().find(|p| p.is_active)
    }
}

/// Read a whole device into a [`DeviceSnapshot`]
pub fn load_device<D: NativeDevice>(device: &D) -> Result<DeviceSnapshot, RatbagError> {
    let profiles = (0..device.num_profiles())
        .map(|i| load_profile(device.profile(i)?, i))
        .collect::<Result<Vec<_>, _>>()?;

    debug!("{}: loaded {} profiles", device.sysname(), profiles.len());

    Ok(DeviceSnapshot {
        sysname: device.sysname().to_string(),
        name: device.name().to_string(),
        ids: device.ids(),
        firmware_version: device.firmware_version(),
        device_type: DeviceType::from_u32(device.device_type()),
        profiles,
    })
}

pub fn load_profile<P: NativeProfile>(
    profile: &P,
    index: usize,
) -> Result<ProfileSnapshot, RatbagError> {
    let resolutions = (0..profile.num_resolutions())
        .map(|i| Ok(load_resolution(profile.resolution(i)?, i)))
        .collect::<Result<Vec<_>, RatbagError>>()?;
    let buttons = (0..profile.num_buttons())
        .map(|i| load_button(profile.button(i)?, i))
        .collect::<Result<Vec<_>, _>>()?;
    let leds = (0..profile.num_leds())
        .map(|i| load_led(profile.led(i)?, i))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ProfileSnapshot {
        index,
        name: profile.name(),
        capabilities: CapabilitySet::query(|c: ProfileCapability| {
            profile.has_capability(c.raw())
        }),
        is_active: profile.is_active(),
        is_enabled: profile.is_enabled(),
        report_rate: profile.report_rate(),
        report_rates: profile.report_rates(),
        debounce: profile.debounce(),
        debounces: profile.debounces(),
        resolutions,
        buttons,
        leds,
    })
}

pub fn load_resolution<R: NativeResolution>(resolution: &R, index: usize) -> ResolutionSnapshot {
    ResolutionSnapshot {
        index,
        dpi: resolution.dpi(),
        dpi_list: resolution.dpi_list(),
        capabilities: CapabilitySet::query(|c: ResolutionCapability| {
            resolution.has_capability(c.raw())
        }),
        is_active: resolution.is_active(),
        is_default: resolution.is_default(),
        is_disabled: resolution.is_disabled(),
    }
}

pub fn load_button<B: NativeButton>(
    button: &B,
    index: usize,
) -> Result<ButtonSnapshot, RatbagError> {
    let raw = button.action_type();
    let action = match ActionType::from_u32(raw) {
        Some(ActionType::None) => ButtonAction::None,
        Some(ActionType::Button) => ButtonAction::Button {
            button: button.button(),
        },
        Some(ActionType::Special) => {
            let code = button.special();
            let special = SpecialAction::from_u32(code).ok_or_else(|| {
                RatbagError::Implementation(format!("button {index}: special action {code:#x}"))
            })?;
            ButtonAction::Special { special }
        }
        Some(ActionType::Key) => ButtonAction::Key { key: button.key() },
        Some(ActionType::Macro) => ButtonAction::Macro {
            events: button.macro_events().map_or(0, |m| m.num_events()),
        },
        Some(ActionType::Unknown) => ButtonAction::Unknown,
        None => {
            warn!("button {index}: unrecognised action type {raw}");
            ButtonAction::Unknown
        }
    };

    let action_types = ActionType::ALL
        .iter()
        .copied()
        .filter(|t| button.has_action_type(t.raw()))
        .collect();

    Ok(ButtonSnapshot {
        index,
        action,
        action_types,
    })
}

pub fn load_led<L: NativeLed>(led: &L, index: usize) -> Result<LedSnapshot, RatbagError> {
    let mode = LedMode::from_u32(led.mode())
        .ok_or_else(|| RatbagError::Implementation(format!("LED {index}: mode {}", led.mode())))?;
    let color_depth = ColorDepth::from_u32(led.color_depth()).ok_or_else(|| {
        RatbagError::Implementation(format!("LED {index}: color depth {}", led.color_depth()))
    })?;

    Ok(LedSnapshot {
        index,
        mode,
        modes: LedMode::ALL
            .iter()
            .copied()
            .filter(|&m| led.has_mode(m as u32))
            .collect(),
        color: led.color(),
        color_depth,
        effect_duration: led.effect_duration(),
        brightness: led.brightness(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{
        MemoryAction, MemoryButton, MemoryDevice, MemoryLed, MemoryMacro, MemoryProfile,
        MemoryResolution,
    };
    use crate::native::macro_event;

    fn sample_device() -> MemoryDevice {
        let mut events = MemoryMacro::default();
        events.push_event(macro_event::KEY_PRESSED, 30).unwrap();
        events.push_event(macro_event::KEY_RELEASED, 30).unwrap();

        let profile = MemoryProfile {
            name: Some("Work".into()),
            capabilities: vec![ProfileCapability::Disable],
            active: true,
            enabled: true,
            report_rate: 1000,
            report_rates: vec![125, 500, 1000],
            debounce: None,
            debounces: vec![],
            resolutions: vec![MemoryResolution {
                dpi_x: 800,
                dpi_y: 800,
                capabilities: vec![ResolutionCapability::SeparateXyResolution],
                active: true,
                default: true,
                ..Default::default()
            }],
            buttons: vec![
                MemoryButton {
                    action: MemoryAction::Button { button: 1 },
                    action_types: vec![ActionType::Button],
                },
                MemoryButton {
                    action: MemoryAction::Macro { events },
                    ..Default::default()
                },
            ],
            leds: vec![MemoryLed {
                mode: LedMode::Breathing,
                modes: vec![LedMode::Off, LedMode::Breathing],
                color: Color::new(0, 0, 255),
                color_depth: ColorDepth::Rgb888,
                effect_duration: 2000,
                brightness: 128,
            }],
        };

        let mut dev = MemoryDevice::new(
            "hidraw2",
            "Test Mouse",
            DeviceIds {
                bustype: "usb".into(),
                vendor_id: 0x1038,
                product_id: 0x1824,
            },
        );
        dev.profiles.push(profile);
        dev
    }

    #[test]
    fn snapshot_decodes_everything_once() {
        let snap = load_device(&sample_device()).unwrap();
        assert_eq!(snap.device_type, DeviceType::Mouse);
        let profile = snap.active_profile().unwrap();
        assert_eq!(profile.name.as_deref(), Some("Work"));
        assert!(profile.capabilities.contains(ProfileCapability::Disable));
        assert!(!profile.capabilities.contains(ProfileCapability::WriteOnly));

        let res = &profile.resolutions[0];
        assert!(res
            .capabilities
            .contains(ResolutionCapability::SeparateXyResolution));
        assert_eq!(res.dpi, (800, 800));

        assert_eq!(profile.buttons[0].action, ButtonAction::Button { button: 1 });
        assert_eq!(profile.buttons[0].action_types, vec![ActionType::Button]);
        assert_eq!(profile.buttons[1].action, ButtonAction::Macro { events: 2 });
        assert_eq!(profile.buttons[1].action.action_type(), ActionType::Macro);

        let led = &profile.leds[0];
        assert_eq!(led.mode, LedMode::Breathing);
        assert_eq!(led.modes, vec![LedMode::Off, LedMode::Breathing]);
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let snap = load_device(&sample_device()).unwrap();
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["profiles"][0]["capabilities"][0], "disable");
        assert_eq!(json["profiles"][0]["buttons"][1]["action"]["type"], "macro");
    }
}
