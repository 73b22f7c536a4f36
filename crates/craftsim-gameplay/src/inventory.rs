//! Inventory system.
//!
//! The crafting engine only needs to ask how much of a material is held and
//! to take some away; [`Inventory`] is that boundary. [`MaterialInventory`]
//! is the in-memory store used by the CLI and the tests.

use craftsim_common::MaterialId;
use std::collections::HashMap;

use crate::material::Material;

/// Store of held materials, as seen by crafting.
pub trait Inventory {
    /// Returns how much of `material` is held (0 if none).
    fn quantity(&self, material: &Material) -> u32;

    /// Removes `amount` of `material`.
    ///
    /// Returns `false` without changing anything if less than `amount` is
    /// held.
    fn remove(&mut self, material: &Material, amount: u32) -> bool;
}

/// In-memory inventory keyed by material id and by name.
///
/// Materials match by id *or* case-insensitive name, which a single hash key
/// cannot express. Each stack is therefore reachable through two indices and a
/// lookup tries the id index first, then the name index.
#[derive(Debug, Clone, Default)]
pub struct MaterialInventory {
    /// Stacks in first-added order
    stacks: Vec<(Material, u32)>,
    /// Stack index by material id
    by_id: HashMap<MaterialId, usize>,
    /// Stack index by lowercase material name
    by_name: HashMap<String, usize>,
}

impl MaterialInventory {
    /// Creates an empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of distinct stacks, including emptied ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    /// Returns true if no material was ever added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    /// Adds `amount` of `material`, saturating at `u32::MAX`.
    pub fn add(&mut self, material: &Material, amount: u32) {
        if let Some(slot) = self.resolve(material) {
            let count = &mut self.stacks[slot].1;
            *count = count.saturating_add(amount);
            return;
        }

        let slot = self.stacks.len();
        self.by_id.entry(material.id()).or_insert(slot);
        self.by_name
            .entry(material.name().to_lowercase())
            .or_insert(slot);
        self.stacks.push((material.clone(), amount));
    }

    /// Returns true if at least `amount` of `material` is held.
    #[must_use]
    pub fn has(&self, material: &Material, amount: u32) -> bool {
        self.quantity(material) >= amount
    }

    /// Returns an iterator over all stacks in first-added order.
    pub fn iter(&self) -> impl Iterator<Item = (&Material, u32)> + '_ {
        self.stacks.iter().map(|(m, count)| (m, *count))
    }

    fn resolve(&self, material: &Material) -> Option<usize> {
        self.by_id
            .get(&material.id())
            .or_else(|| self.by_name.get(&material.name().to_lowercase()))
            .copied()
    }
}

impl Inventory for MaterialInventory {
    fn quantity(&self, material: &Material) -> u32 {
        self.resolve(material)
            .map_or(0, |slot| self.stacks[slot].1)
    }

    fn remove(&mut self, material: &Material, amount: u32) -> bool {
        let Some(slot) = self.resolve(material) else {
            return amount == 0;
        };
        let count = &mut self.stacks[slot].1;
        if *count < amount {
            return false;
        }
        *count -= amount;
        true
    }
}
