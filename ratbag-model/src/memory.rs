//! In-memory native context backed by a JSON device file
//!
//! Stands in for the native library: it holds simulated devices, validates
//! setters the way the native layer does, and counts commits instead of
//! writing to hardware. The whole context serializes back to JSON so a
//! front end can keep state between runs.

use crate::capability::{Capability, ProfileCapability, ResolutionCapability};
use crate::device::{ActionType, DeviceIds, DeviceType, SpecialAction};
use crate::error::RatbagError;
use crate::input_codes::KEY_MAX;
use crate::led::{Color, ColorDepth, LedMode, BRIGHTNESS_MAX};
use crate::native::{
    macro_event, NativeButton, NativeContext, NativeDevice, NativeLed, NativeMacro,
    NativeProfile, NativeResolution,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Longest macro the native layer accepts
pub const MACRO_MAX_EVENTS: usize = 256;

/// One raw macro event as stored in device files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMacroEvent {
    pub kind: u32,
    pub value: u32,
}

/// Native macro event list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryMacro {
    events: Vec<RawMacroEvent>,
}

fn out_of_range(what: &str, index: usize, len: usize) -> RatbagError {
    RatbagError::NotFound(format!("{what} {index} (have {len})"))
}

impl NativeMacro for MemoryMacro {
    fn num_events(&self) -> usize {
        self.events.len()
    }

    fn event_kind(&self, index: usize) -> Result<u32, RatbagError> {
        self.events
            .get(index)
            .map(|e| e.kind)
            .ok_or_else(|| out_of_range("macro event", index, self.events.len()))
    }

    fn event_value(&self, index: usize) -> Result<u32, RatbagError> {
        self.events
            .get(index)
            .map(|e| e.value)
            .ok_or_else(|| out_of_range("macro event", index, self.events.len()))
    }

    fn push_event(&mut self, kind: u32, value: u32) -> Result<(), RatbagError> {
        if self.events.len() >= MACRO_MAX_EVENTS {
            return Err(RatbagError::Value(format!(
                "macro longer than {MACRO_MAX_EVENTS} events"
            )));
        }
        match kind {
            macro_event::KEY_PRESSED | macro_event::KEY_RELEASED if value > KEY_MAX => {
                return Err(RatbagError::Value(format!("keycode {value} out of range")));
            }
            macro_event::KEY_PRESSED | macro_event::KEY_RELEASED | macro_event::WAIT => {}
            other => {
                return Err(RatbagError::Value(format!("macro event kind {other}")));
            }
        }
        self.events.push(RawMacroEvent { kind, value });
        Ok(())
    }
}

/// Current button action
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum MemoryAction {
    #[default]
    None,
    Button {
        button: u32,
    },
    Special {
        special: SpecialAction,
    },
    Key {
        key: u32,
    },
    Macro {
        events: MemoryMacro,
    },
    Unknown,
}

fn default_action_types() -> Vec<ActionType> {
    vec![
        ActionType::None,
        ActionType::Button,
        ActionType::Special,
        ActionType::Key,
        ActionType::Macro,
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryButton {
    #[serde(default)]
    pub action: MemoryAction,
    #[serde(default = "default_action_types")]
    pub action_types: Vec<ActionType>,
}

impl Default for MemoryButton {
    fn default() -> Self {
        Self {
            action: MemoryAction::None,
            action_types: default_action_types(),
        }
    }
}

impl MemoryButton {
    fn require(&self, action_type: ActionType) -> Result<(), RatbagError> {
        if self.action_types.contains(&action_type) {
            Ok(())
        } else {
            Err(RatbagError::Capability(format!(
                "button does not support {action_type:?} actions"
            )))
        }
    }
}

impl NativeButton for MemoryButton {
    type Macro = MemoryMacro;

    fn action_type(&self) -> u32 {
        let action_type = match self.action {
            MemoryAction::None => ActionType::None,
            MemoryAction::Button { .. } => ActionType::Button,
            MemoryAction::Special { .. } => ActionType::Special,
            MemoryAction::Key { .. } => ActionType::Key,
            MemoryAction::Macro { .. } => ActionType::Macro,
            MemoryAction::Unknown => ActionType::Unknown,
        };
        action_type.raw()
    }

    fn has_action_type(&self, action_type: u32) -> bool {
        self.action_types.iter().any(|t| t.raw() == action_type)
    }

    fn button(&self) -> u32 {
        match self.action {
            MemoryAction::Button { button } => button,
            _ => 0,
        }
    }

    fn set_button(&mut self, button: u32) -> Result<(), RatbagError> {
        self.require(ActionType::Button)?;
        if button == 0 {
            return Err(RatbagError::Value("mouse buttons start at 1".into()));
        }
        self.action = MemoryAction::Button { button };
        Ok(())
    }

    fn special(&self) -> u32 {
        match self.action {
            MemoryAction::Special { special } => special.raw(),
            _ => 0,
        }
    }

    fn set_special(&mut self, special: u32) -> Result<(), RatbagError> {
        self.require(ActionType::Special)?;
        let special = SpecialAction::from_u32(special)
            .ok_or_else(|| RatbagError::Value(format!("special action {special:#x}")))?;
        self.action = MemoryAction::Special { special };
        Ok(())
    }

    fn key(&self) -> u32 {
        match self.action {
            MemoryAction::Key { key } => key,
            _ => 0,
        }
    }

    fn set_key(&mut self, key: u32) -> Result<(), RatbagError> {
        self.require(ActionType::Key)?;
        if key == 0 || key > KEY_MAX {
            return Err(RatbagError::Value(format!("keycode {key} out of range")));
        }
        self.action = MemoryAction::Key { key };
        Ok(())
    }

    fn macro_events(&self) -> Option<MemoryMacro> {
        match &self.action {
            MemoryAction::Macro { events } => Some(events.clone()),
            _ => None,
        }
    }

    fn set_macro(&mut self, events: MemoryMacro) -> Result<(), RatbagError> {
        self.require(ActionType::Macro)?;
        debug!("Binding macro with {} events", events.num_events());
        self.action = MemoryAction::Macro { events };
        Ok(())
    }

    fn disable(&mut self) -> Result<(), RatbagError> {
        self.require(ActionType::None)?;
        self.action = MemoryAction::None;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryResolution {
    pub dpi_x: u32,
    pub dpi_y: u32,
    #[serde(default)]
    pub dpi_list: Vec<u32>,
    #[serde(default)]
    pub capabilities: Vec<ResolutionCapability>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub default: bool,
    #[serde(default)]
    pub disabled: bool,
}

impl MemoryResolution {
    fn check_dpi(&self, dpi: u32) -> Result<(), RatbagError> {
        if dpi == 0 || (!self.dpi_list.is_empty() && !self.dpi_list.contains(&dpi)) {
            return Err(RatbagError::Value(format!("unsupported DPI {dpi}")));
        }
        Ok(())
    }

    fn has(&self, cap: ResolutionCapability) -> bool {
        self.capabilities.contains(&cap)
    }
}

impl NativeResolution for MemoryResolution {
    fn dpi(&self) -> (u32, u32) {
        (self.dpi_x, self.dpi_y)
    }

    fn set_dpi(&mut self, dpi: u32) -> Result<(), RatbagError> {
        self.check_dpi(dpi)?;
        self.dpi_x = dpi;
        self.dpi_y = dpi;
        Ok(())
    }

    fn set_dpi_xy(&mut self, x: u32, y: u32) -> Result<(), RatbagError> {
        if x != y && !self.has(ResolutionCapability::SeparateXyResolution) {
            return Err(RatbagError::Capability("separate x/y resolution".into()));
        }
        self.check_dpi(x)?;
        self.check_dpi(y)?;
        self.dpi_x = x;
        self.dpi_y = y;
        Ok(())
    }

    fn dpi_list(&self) -> Vec<u32> {
        self.dpi_list.clone()
    }

    fn has_capability(&self, cap: u32) -> bool {
        ResolutionCapability::from_raw(cap).is_some_and(|c| self.has(c))
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn is_default(&self) -> bool {
        self.default
    }

    fn is_disabled(&self) -> bool {
        self.disabled
    }

    fn set_disabled(&mut self, disabled: bool) -> Result<(), RatbagError> {
        if !self.has(ResolutionCapability::Disable) {
            return Err(RatbagError::Capability("disabling resolutions".into()));
        }
        if disabled && (self.active || self.default) {
            return Err(RatbagError::Value(
                "cannot disable the active or default resolution".into(),
            ));
        }
        self.disabled = disabled;
        Ok(())
    }
}

fn default_led_modes() -> Vec<LedMode> {
    LedMode::ALL.to_vec()
}

fn default_brightness() -> u32 {
    BRIGHTNESS_MAX
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryLed {
    pub mode: LedMode,
    #[serde(default = "default_led_modes")]
    pub modes: Vec<LedMode>,
    #[serde(default)]
    pub color: Color,
    #[serde(default)]
    pub color_depth: ColorDepth,
    #[serde(default)]
    pub effect_duration: u32,
    #[serde(default = "default_brightness")]
    pub brightness: u32,
}

impl NativeLed for MemoryLed {
    fn mode(&self) -> u32 {
        self.mode as u32
    }

    fn set_mode(&mut self, mode: u32) -> Result<(), RatbagError> {
        let mode =
            LedMode::from_u32(mode).ok_or_else(|| RatbagError::Value(format!("LED mode {mode}")))?;
        if !self.modes.contains(&mode) {
            return Err(RatbagError::Capability(format!("LED mode {}", mode.name())));
        }
        self.mode = mode;
        Ok(())
    }

    fn has_mode(&self, mode: u32) -> bool {
        LedMode::from_u32(mode).is_some_and(|m| self.modes.contains(&m))
    }

    fn color(&self) -> Color {
        self.color
    }

    fn set_color(&mut self, color: Color) -> Result<(), RatbagError> {
        self.color = color.quantize(self.color_depth);
        Ok(())
    }

    fn color_depth(&self) -> u32 {
        self.color_depth as u32
    }

    fn effect_duration(&self) -> u32 {
        self.effect_duration
    }

    fn set_effect_duration(&mut self, ms: u32) -> Result<(), RatbagError> {
        if ms > 10_000 {
            return Err(RatbagError::Value(format!("effect duration {ms}ms")));
        }
        self.effect_duration = ms;
        Ok(())
    }

    fn brightness(&self) -> u32 {
        self.brightness
    }

    fn set_brightness(&mut self, brightness: u32) -> Result<(), RatbagError> {
        if brightness > BRIGHTNESS_MAX {
            return Err(RatbagError::Value(format!("brightness {brightness}")));
        }
        self.brightness = brightness;
        Ok(())
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryProfile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub capabilities: Vec<ProfileCapability>,
    #[serde(default)]
    pub active: bool,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub report_rate: u32,
    #[serde(default)]
    pub report_rates: Vec<u32>,
    #[serde(default)]
    pub debounce: Option<u32>,
    #[serde(default)]
    pub debounces: Vec<u32>,
    #[serde(default)]
    pub resolutions: Vec<MemoryResolution>,
    #[serde(default)]
    pub buttons: Vec<MemoryButton>,
    #[serde(default)]
    pub leds: Vec<MemoryLed>,
}

impl Default for MemoryProfile {
    fn default() -> Self {
        Self {
            name: None,
            capabilities: Vec::new(),
            active: false,
            enabled: true,
            report_rate: 0,
            report_rates: Vec::new(),
            debounce: None,
            debounces: Vec::new(),
            resolutions: Vec::new(),
            buttons: Vec::new(),
            leds: Vec::new(),
        }
    }
}

fn get<'a, T>(items: &'a [T], what: &str, index: usize) -> Result<&'a T, RatbagError> {
    items.get(index).ok_or_else(|| out_of_range(what, index, items.len()))
}

fn get_mut<'a, T>(items: &'a mut [T], what: &str, index: usize) -> Result<&'a mut T, RatbagError> {
    let len = items.len();
    items.get_mut(index).ok_or_else(|| out_of_range(what, index, len))
}

impl NativeProfile for MemoryProfile {
    type Resolution = MemoryResolution;
    type Button = MemoryButton;
    type Led = MemoryLed;

    fn name(&self) -> Option<String> {
        self.name.clone()
    }

    fn set_name(&mut self, name: &str) -> Result<(), RatbagError> {
        if self.name.is_none() {
            return Err(RatbagError::Capability("profile names".into()));
        }
        self.name = Some(name.to_string());
        Ok(())
    }

    fn has_capability(&self, cap: u32) -> bool {
        ProfileCapability::from_raw(cap).is_some_and(|c| self.capabilities.contains(&c))
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) -> Result<(), RatbagError> {
        if !self.capabilities.contains(&ProfileCapability::Disable) {
            return Err(RatbagError::Capability("disabling profiles".into()));
        }
        if !enabled && self.active {
            return Err(RatbagError::Value("cannot disable the active profile".into()));
        }
        self.enabled = enabled;
        Ok(())
    }

    fn report_rate(&self) -> u32 {
        self.report_rate
    }

    fn set_report_rate(&mut self, hz: u32) -> Result<(), RatbagError> {
        if !self.report_rates.contains(&hz) {
            return Err(RatbagError::Value(format!("report rate {hz}Hz")));
        }
        self.report_rate = hz;
        Ok(())
    }

    fn report_rates(&self) -> Vec<u32> {
        self.report_rates.clone()
    }

    fn debounce(&self) -> Option<u32> {
        self.debounce
    }

    fn set_debounce(&mut self, ms: u32) -> Result<(), RatbagError> {
        if self.debounce.is_none() {
            return Err(RatbagError::Capability("debounce".into()));
        }
        if !self.debounces.contains(&ms) {
            return Err(RatbagError::Value(format!("debounce {ms}ms")));
        }
        self.debounce = Some(ms);
        Ok(())
    }

    fn debounces(&self) -> Vec<u32> {
        self.debounces.clone()
    }

    fn num_resolutions(&self) -> usize {
        self.resolutions.len()
    }

    fn resolution(&self, index: usize) -> Result<&MemoryResolution, RatbagError> {
        get(&self.resolutions, "resolution", index)
    }

    fn resolution_mut(&mut self, index: usize) -> Result<&mut MemoryResolution, RatbagError> {
        get_mut(&mut self.resolutions, "resolution", index)
    }

    fn num_buttons(&self) -> usize {
        self.buttons.len()
    }

    fn button(&self, index: usize) -> Result<&MemoryButton, RatbagError> {
        get(&self.buttons, "button", index)
    }

    fn button_mut(&mut self, index: usize) -> Result<&mut MemoryButton, RatbagError> {
        get_mut(&mut self.buttons, "button", index)
    }

    fn num_leds(&self) -> usize {
        self.leds.len()
    }

    fn led(&self, index: usize) -> Result<&MemoryLed, RatbagError> {
        get(&self.leds, "LED", index)
    }

    fn led_mut(&mut self, index: usize) -> Result<&mut MemoryLed, RatbagError> {
        get_mut(&mut self.leds, "LED", index)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryDevice {
    pub sysname: String,
    pub name: String,
    pub ids: DeviceIds,
    #[serde(default)]
    pub firmware_version: String,
    #[serde(default)]
    pub device_type: DeviceType,
    #[serde(default)]
    pub profiles: Vec<MemoryProfile>,
    /// Number of successful commits
    #[serde(default)]
    pub commits: u32,
    /// Simulate a device that stopped responding
    #[serde(default)]
    pub offline: bool,
    #[serde(skip)]
    dirty: bool,
}

impl MemoryDevice {
    pub fn new(sysname: &str, name: &str, ids: DeviceIds) -> Self {
        Self {
            sysname: sysname.to_string(),
            name: name.to_string(),
            ids,
            firmware_version: String::new(),
            device_type: DeviceType::Mouse,
            profiles: Vec::new(),
            commits: 0,
            offline: false,
            dirty: false,
        }
    }

    /// Whether changes are pending since the last commit.
    ///
    /// Any mutable profile access counts as a change.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

impl NativeDevice for MemoryDevice {
    type Profile = MemoryProfile;

    fn sysname(&self) -> &str {
        &self.sysname
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn ids(&self) -> DeviceIds {
        self.ids.clone()
    }

    fn firmware_version(&self) -> String {
        self.firmware_version.clone()
    }

    fn device_type(&self) -> u32 {
        self.device_type.raw()
    }

    fn num_profiles(&self) -> usize {
        self.profiles.len()
    }

    fn profile(&self, index: usize) -> Result<&MemoryProfile, RatbagError> {
        get(&self.profiles, "profile", index)
    }

    fn profile_mut(&mut self, index: usize) -> Result<&mut MemoryProfile, RatbagError> {
        let profile = get_mut(&mut self.profiles, "profile", index)?;
        self.dirty = true;
        Ok(profile)
    }

    fn commit(&mut self) -> Result<(), RatbagError> {
        if self.offline {
            return Err(RatbagError::Device(format!("{} is not responding", self.sysname)));
        }
        if !self.dirty {
            debug!("{}: nothing to commit", self.sysname);
            return Ok(());
        }
        self.commits += 1;
        self.dirty = false;
        info!("{}: committed changes (commit #{})", self.sysname, self.commits);
        Ok(())
    }
}

/// Simulated native context
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryContext {
    #[serde(default)]
    pub devices: Vec<MemoryDevice>,
}

impl MemoryContext {
    pub fn new(devices: Vec<MemoryDevice>) -> Self {
        Self { devices }
    }

    pub fn from_json(json: &str) -> Result<Self, RatbagError> {
        let ctx: Self = serde_json::from_str(json)
            .map_err(|e| RatbagError::System(format!("invalid device file: {e}")))?;
        debug!("Loaded {} simulated devices", ctx.devices.len());
        Ok(ctx)
    }

    /// Load a device file; a missing file yields an empty context
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, RatbagError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No device file at {}", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| RatbagError::System(format!("{}: {e}", path.display())))?;
        Self::from_json(&content)
    }

    pub fn to_json(&self) -> Result<String, RatbagError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| RatbagError::System(format!("serializing devices: {e}")))
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), RatbagError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| RatbagError::System(format!("{}: {e}", parent.display())))?;
        }
        std::fs::write(path, self.to_json()?)
            .map_err(|e| RatbagError::System(format!("{}: {e}", path.display())))
    }
}

impl NativeContext for MemoryContext {
    type Device = MemoryDevice;

    fn sysnames(&self) -> Vec<String> {
        self.devices.iter().map(|d| d.sysname.clone()).collect()
    }

    fn device(&self, sysname: &str) -> Result<&MemoryDevice, RatbagError> {
        self.devices
            .iter()
            .find(|d| d.sysname == sysname)
            .ok_or_else(|| RatbagError::NotFound(format!("device {sysname}")))
    }

    fn device_mut(&mut self, sysname: &str) -> Result<&mut MemoryDevice, RatbagError> {
        self.devices
            .iter_mut()
            .find(|d| d.sysname == sysname)
            .ok_or_else(|| RatbagError::NotFound(format!("device {sysname}")))
    }
}
