//! ID types for materials.

use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identifier of a craftable material.
///
/// Ids are either assigned by whoever owns the material catalogue or derived
/// from the material name with [`MaterialId::from_name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MaterialId(u32);

impl MaterialId {
    /// Creates a material ID from a raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Derives an ID from a material name.
    ///
    /// The derivation is stable across runs and processes: the same name
    /// always maps to the same ID. The name is hashed as given, so callers
    /// that want `" Herb "` and `"Herb"` to agree must trim first.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let mut hasher = FxHasher::default();
        name.hash(&mut hasher);
        let hash = hasher.finish();
        // Fold the high half in so short names still spread over all 32 bits.
        Self((hash ^ (hash >> 32)) as u32)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for MaterialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for MaterialId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}
