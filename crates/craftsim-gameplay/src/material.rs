//! Material identity.
//!
//! A material is recognised by either of two keys: its numeric id or its
//! name (compared case-insensitively). Two materials are equal when *either*
//! key matches, which makes equality non-transitive:
//!
//! ```text
//! A = (1, "Herb")   B = (2, "herb")   C = (2, "Water")
//! A == B (name), B == C (id), but A != C
//! ```
//!
//! `Material` therefore implements `PartialEq` but not `Eq`. Its `Hash`
//! combines id and name verbatim, so two values that are equal by name only
//! can hash differently. Hash-keyed containers of `Material` are unreliable;
//! [`crate::inventory::MaterialInventory`] keeps separate id and name indices
//! instead.

use craftsim_common::MaterialId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A craftable resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    id: MaterialId,
    name: String,
}

impl Material {
    /// Creates a material from an explicit id and name.
    #[must_use]
    pub fn new(id: MaterialId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Creates a material whose id is derived from its trimmed name.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        Self::new(MaterialId::from_name(name), name)
    }

    /// Returns the material id.
    #[must_use]
    pub const fn id(&self) -> MaterialId {
        self.id
    }

    /// Returns the material name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True if the ids are the same.
    #[must_use]
    pub fn matches_id(&self, other: &Self) -> bool {
        self.id == other.id
    }

    /// True if the names match ignoring case.
    #[must_use]
    pub fn matches_name(&self, other: &Self) -> bool {
        names_match(&self.name, &other.name)
    }
}

impl PartialEq for Material {
    fn eq(&self, other: &Self) -> bool {
        self.matches_id(other) || self.matches_name(other)
    }
}

impl Hash for Material {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.name.hash(state);
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Case-insensitive name comparison shared by materials and recipes.
pub(crate) fn names_match(a: &str, b: &str) -> bool {
    if a.is_ascii() && b.is_ascii() {
        a.eq_ignore_ascii_case(b)
    } else {
        a.to_lowercase() == b.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_by_id() {
        let a = Material::new(MaterialId::new(7), "Iron");
        let b = Material::new(MaterialId::new(7), "Ferrum");
        assert_eq!(a, b);
    }

    #[test]
    fn test_equal_by_name_ignoring_case() {
        let a = Material::new(MaterialId::new(1), "Herb");
        let b = Material::new(MaterialId::new(2), "hERB");
        assert_eq!(a, b);
        assert!(!a.matches_id(&b));
        assert!(a.matches_name(&b));
    }

    #[test]
    fn test_not_equal_when_both_keys_differ() {
        let a = Material::new(MaterialId::new(1), "Herb");
        let b = Material::new(MaterialId::new(2), "Water");
        assert_ne!(a, b);
    }

    #[test]
    fn test_equality_is_not_transitive() {
        let a = Material::new(MaterialId::new(1), "Herb");
        let b = Material::new(MaterialId::new(2), "herb");
        let c = Material::new(MaterialId::new(2), "Water");

        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_ne!(a, c);
    }

    #[test]
    fn test_from_name_trims_and_derives_id() {
        let material = Material::from_name("  Herb \t");
        assert_eq!(material.name(), "Herb");
        assert_eq!(material.id(), MaterialId::from_name("Herb"));
        assert_eq!(material, Material::from_name("Herb"));
    }

    #[test]
    fn test_hash_uses_both_keys() {
        use std::collections::hash_map::DefaultHasher;

        fn hash_of(m: &Material) -> u64 {
            let mut hasher = DefaultHasher::new();
            m.hash(&mut hasher);
            hasher.finish()
        }

        let a = Material::new(MaterialId::new(1), "Herb");
        let b = Material::new(MaterialId::new(2), "Herb");
        // Equal by name, yet hashed apart.
        assert_eq!(a, b);
        assert_ne!(hash_of(&a), hash_of(&b));
    }
}
