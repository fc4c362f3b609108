//! Typed object model for ratbag-style configurable mice
//!
//! This crate describes the native configuration layer (devices, profiles,
//! resolutions, buttons, LEDs and macro event lists) as traits, provides
//! typed enums and plain-data snapshots for everything the native layer
//! reports as raw codes, and ships an in-memory implementation of the
//! traits backed by a JSON device file.

pub mod capability;
pub mod device;
pub mod error;
pub mod input_codes;
pub mod led;
pub mod memory;
pub mod native;
pub mod snapshot;

pub use capability::{Capability, CapabilitySet, ProfileCapability, ResolutionCapability};
pub use device::{ActionType, DeviceIds, DeviceType, SpecialAction};
pub use error::RatbagError;
pub use led::{Color, ColorDepth, LedMode};
pub use memory::{MemoryContext, MemoryDevice};
pub use native::{
    NativeButton, NativeContext, NativeDevice, NativeLed, NativeMacro, NativeProfile,
    NativeResolution,
};
pub use snapshot::{load_device, ButtonAction, DeviceSnapshot};
