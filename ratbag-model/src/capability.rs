//! Capability flags as fixed bitsets
//!
//! The native layer answers "does this object support X" one query at a
//! time. The snapshot loader asks every known capability once and stores
//! the answers in a [`CapabilitySet`], so callers read plain data.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

/// A capability enum that can live in a [`CapabilitySet`].
pub trait Capability: Copy + Eq + fmt::Debug + 'static {
    /// Every capability of this kind, in bit order
    const ALL: &'static [Self];

    /// Bit position within the set (must be < 32 and unique per variant)
    fn bit(self) -> u32;

    /// Native capability code
    fn raw(self) -> u32;

    /// Look up a capability by native code
    fn from_raw(raw: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.raw() == raw)
    }
}

/// Optional profile features
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProfileCapability {
    /// A profile can be marked as the power-on default
    SetDefault,
    /// Profiles can be disabled
    Disable,
    /// Profile data cannot be read back from the device
    WriteOnly,
}

impl Capability for ProfileCapability {
    const ALL: &'static [Self] = &[Self::SetDefault, Self::Disable, Self::WriteOnly];

    fn bit(self) -> u32 {
        match self {
            Self::SetDefault => 0,
            Self::Disable => 1,
            Self::WriteOnly => 2,
        }
    }

    fn raw(self) -> u32 {
        match self {
            Self::SetDefault => 101,
            Self::Disable => 102,
            Self::WriteOnly => 103,
        }
    }
}

/// Optional resolution features
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionCapability {
    /// X and Y DPI can be set independently
    SeparateXyResolution,
    /// Individual resolutions can be disabled
    Disable,
}

impl Capability for ResolutionCapability {
    const ALL: &'static [Self] = &[Self::SeparateXyResolution, Self::Disable];

    fn bit(self) -> u32 {
        match self {
            Self::SeparateXyResolution => 0,
            Self::Disable => 1,
        }
    }

    fn raw(self) -> u32 {
        match self {
            Self::SeparateXyResolution => 1,
            Self::Disable => 2,
        }
    }
}

/// Set of capabilities of one kind, stored as a `u32` bitmask.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct CapabilitySet<C> {
    bits: u32,
    _kind: PhantomData<C>,
}

impl<C: Capability> CapabilitySet<C> {
    /// Empty set
    pub const fn empty() -> Self {
        Self {
            bits: 0,
            _kind: PhantomData,
        }
    }

    /// Build a set by asking `has` once per known capability.
    pub fn query(mut has: impl FnMut(C) -> bool) -> Self {
        C::ALL
            .iter()
            .copied()
            .filter(|&c| has(c))
            .collect()
    }

    pub fn insert(&mut self, cap: C) {
        self.bits |= 1 << cap.bit();
    }

    pub fn remove(&mut self, cap: C) {
        self.bits &= !(1 << cap.bit());
    }

    pub fn contains(&self, cap: C) -> bool {
        self.bits & (1 << cap.bit()) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Raw bitmask
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Iterate over contained capabilities in bit order
    pub fn iter(&self) -> impl Iterator<Item = C> + '_ {
        C::ALL.iter().copied().filter(move |&c| self.contains(c))
    }
}

impl<C: Capability> Default for CapabilitySet<C> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<C: Capability> FromIterator<C> for CapabilitySet<C> {
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
        let mut set = Self::empty();
        for cap in iter {
            set.insert(cap);
        }
        set
    }
}

impl<C: Capability> fmt::Debug for CapabilitySet<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<C: Capability + Serialize> Serialize for CapabilitySet<C> {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_seq(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_asks_each_capability_once() {
        let mut asked = Vec::new();
        let set = CapabilitySet::<ProfileCapability>::query(|c| {
            asked.push(c);
            c != ProfileCapability::WriteOnly
        });
        assert_eq!(asked, ProfileCapability::ALL);
        assert!(set.contains(ProfileCapability::SetDefault));
        assert!(set.contains(ProfileCapability::Disable));
        assert!(!set.contains(ProfileCapability::WriteOnly));
    }

    #[test]
    fn insert_remove() {
        let mut set = CapabilitySet::empty();
        assert!(set.is_empty());
        set.insert(ResolutionCapability::Disable);
        assert_eq!(set.bits(), 0b10);
        set.remove(ResolutionCapability::Disable);
        assert!(set.is_empty());
    }

    #[test]
    fn raw_codes_round_trip() {
        for &cap in ProfileCapability::ALL {
            assert_eq!(ProfileCapability::from_raw(cap.raw()), Some(cap));
        }
        assert_eq!(
            ResolutionCapability::from_raw(1),
            Some(ResolutionCapability::SeparateXyResolution)
        );
        assert_eq!(ResolutionCapability::from_raw(99), None);
    }

    #[test]
    fn serializes_as_name_list() {
        let set: CapabilitySet<ProfileCapability> =
            [ProfileCapability::WriteOnly, ProfileCapability::SetDefault]
                .into_iter()
                .collect();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["set-default","write-only"]"#);
    }
}
