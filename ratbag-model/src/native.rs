//! Native collaborator interface
//!
//! These traits describe what the binding needs from an initialized native
//! configuration context. Enumerated values cross this boundary as raw
//! `u32` codes, the way the native library hands them out; the
//! [`snapshot`](crate::snapshot) loader turns them into typed values.
//!
//! Setters validate their input and report failures through
//! [`RatbagError`]. Nothing reaches hardware until [`NativeDevice::commit`].

use crate::device::DeviceIds;
use crate::error::RatbagError;
use crate::led::Color;

/// Raw macro event kind codes
pub mod macro_event {
    pub const NONE: u32 = 0;
    pub const KEY_PRESSED: u32 = 1;
    pub const KEY_RELEASED: u32 = 2;
    pub const WAIT: u32 = 3;
}

/// Native macro event list.
///
/// A fresh list is created with `Default`, filled with
/// [`push_event`](NativeMacro::push_event) and bound to a button with
/// [`NativeButton::set_macro`].
pub trait NativeMacro: Default {
    fn num_events(&self) -> usize;

    /// Raw kind of the event at `index` (see [`macro_event`])
    fn event_kind(&self, index: usize) -> Result<u32, RatbagError>;

    /// Keycode or wait duration of the event at `index`
    fn event_value(&self, index: usize) -> Result<u32, RatbagError>;

    /// Append one event
    fn push_event(&mut self, kind: u32, value: u32) -> Result<(), RatbagError>;
}

pub trait NativeButton {
    type Macro: NativeMacro;

    /// Raw [`ActionType`](crate::ActionType) code
    fn action_type(&self) -> u32;
    fn has_action_type(&self, action_type: u32) -> bool;

    /// Logical mouse button, 0 when the action is not a button
    fn button(&self) -> u32;
    fn set_button(&mut self, button: u32) -> Result<(), RatbagError>;

    /// Raw [`SpecialAction`](crate::SpecialAction) code, 0 when not special
    fn special(&self) -> u32;
    fn set_special(&mut self, special: u32) -> Result<(), RatbagError>;

    /// Keycode, 0 when the action is not a key
    fn key(&self) -> u32;
    fn set_key(&mut self, key: u32) -> Result<(), RatbagError>;

    /// Copy of the bound macro, `None` when the action is not a macro
    fn macro_events(&self) -> Option<Self::Macro>;
    fn set_macro(&mut self, events: Self::Macro) -> Result<(), RatbagError>;

    fn disable(&mut self) -> Result<(), RatbagError>;
}

pub trait NativeResolution {
    /// `(x, y)` DPI; both equal unless separate XY resolution is supported
    fn dpi(&self) -> (u32, u32);
    fn set_dpi(&mut self, dpi: u32) -> Result<(), RatbagError>;
    fn set_dpi_xy(&mut self, x: u32, y: u32) -> Result<(), RatbagError>;
    fn dpi_list(&self) -> Vec<u32>;

    fn has_capability(&self, cap: u32) -> bool;

    fn is_active(&self) -> bool;
    fn is_default(&self) -> bool;
    fn is_disabled(&self) -> bool;
    fn set_disabled(&mut self, disabled: bool) -> Result<(), RatbagError>;
}

pub trait NativeLed {
    /// Raw [`LedMode`](crate::LedMode) code
    fn mode(&self) -> u32;
    fn set_mode(&mut self, mode: u32) -> Result<(), RatbagError>;
    fn has_mode(&self, mode: u32) -> bool;

    fn color(&self) -> Color;
    fn set_color(&mut self, color: Color) -> Result<(), RatbagError>;

    /// Raw [`ColorDepth`](crate::ColorDepth) code
    fn color_depth(&self) -> u32;

    /// Effect duration in ms
    fn effect_duration(&self) -> u32;
    fn set_effect_duration(&mut self, ms: u32) -> Result<(), RatbagError>;

    fn brightness(&self) -> u32;
    fn set_brightness(&mut self, brightness: u32) -> Result<(), RatbagError>;
}

pub trait NativeProfile {
    type Resolution: NativeResolution;
    type Button: NativeButton;
    type Led: NativeLed;

    fn name(&self) -> Option<String>;
    fn set_name(&mut self, name: &str) -> Result<(), RatbagError>;

    fn has_capability(&self, cap: u32) -> bool;

    fn is_active(&self) -> bool;
    fn is_enabled(&self) -> bool;
    fn set_enabled(&mut self, enabled: bool) -> Result<(), RatbagError>;

    /// Report rate in Hz
    fn report_rate(&self) -> u32;
    fn set_report_rate(&mut self, hz: u32) -> Result<(), RatbagError>;
    fn report_rates(&self) -> Vec<u32>;

    /// Debounce time in ms, `None` when the device has no debounce setting
    fn debounce(&self) -> Option<u32>;
    fn set_debounce(&mut self, ms: u32) -> Result<(), RatbagError>;
    fn debounces(&self) -> Vec<u32>;

    fn num_resolutions(&self) -> usize;
    fn resolution(&self, index: usize) -> Result<&Self::Resolution, RatbagError>;
    fn resolution_mut(&mut self, index: usize) -> Result<&mut Self::Resolution, RatbagError>;

    fn num_buttons(&self) -> usize;
    fn button(&self, index: usize) -> Result<&Self::Button, RatbagError>;
    fn button_mut(&mut self, index: usize) -> Result<&mut Self::Button, RatbagError>;

    fn num_leds(&self) -> usize;
    fn led(&self, index: usize) -> Result<&Self::Led, RatbagError>;
    fn led_mut(&mut self, index: usize) -> Result<&mut Self::Led, RatbagError>;
}

pub trait NativeDevice {
    type Profile: NativeProfile;

    /// Kernel name of the device node (`hidraw3`)
    fn sysname(&self) -> &str;
    fn name(&self) -> &str;
    fn ids(&self) -> DeviceIds;
    fn firmware_version(&self) -> String;
    /// Raw [`DeviceType`](crate::DeviceType) code
    fn device_type(&self) -> u32;

    fn num_profiles(&self) -> usize;
    fn profile(&self, index: usize) -> Result<&Self::Profile, RatbagError>;
    fn profile_mut(&mut self, index: usize) -> Result<&mut Self::Profile, RatbagError>;

    /// Write pending changes to the device
    fn commit(&mut self) -> Result<(), RatbagError>;
}

/// An initialized native context
pub trait NativeContext {
    type Device: NativeDevice;

    /// Sysnames of all supported devices
    fn sysnames(&self) -> Vec<String>;
    fn device(&self, sysname: &str) -> Result<&Self::Device, RatbagError>;
    fn device_mut(&mut self, sysname: &str) -> Result<&mut Self::Device, RatbagError>;
}
