//! Recipe definitions.

use serde::Serialize;
use std::cmp::Ordering;

use crate::material::Material;

/// Ordered material requirements of a recipe.
///
/// Keys are unique under [`Material`] equality and iterate in insertion
/// order, which is also the order crafting validates and consumes them in.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RequiredMaterials {
    entries: Vec<(Material, i32)>,
}

impl RequiredMaterials {
    /// Creates an empty requirement list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a requirement.
    ///
    /// Returns `false` and leaves the list unchanged if an equal material is
    /// already present.
    pub fn insert(&mut self, material: Material, quantity: i32) -> bool {
        if self.contains(&material) {
            return false;
        }
        self.entries.push((material, quantity));
        true
    }

    /// Returns the required quantity of a material, if listed.
    #[must_use]
    pub fn get(&self, material: &Material) -> Option<i32> {
        self.entries
            .iter()
            .find(|(m, _)| m == material)
            .map(|(_, qty)| *qty)
    }

    /// True if an equal material is listed.
    #[must_use]
    pub fn contains(&self, material: &Material) -> bool {
        self.entries.iter().any(|(m, _)| m == material)
    }

    /// Number of distinct materials.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is required.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates requirements in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Material, i32)> + '_ {
        self.entries.iter().map(|(m, qty)| (m, *qty))
    }
}

impl FromIterator<(Material, i32)> for RequiredMaterials {
    /// Later duplicates of an already listed material are dropped.
    fn from_iter<T: IntoIterator<Item = (Material, i32)>>(iter: T) -> Self {
        let mut required = Self::new();
        for (material, quantity) in iter {
            required.insert(material, quantity);
        }
        required
    }
}

/// A craftable item: what it costs and how likely it is to come out.
#[derive(Debug, Clone, Serialize)]
pub struct Recipe {
    name: String,
    required_materials: RequiredMaterials,
    success_rate: f64,
}

impl Recipe {
    /// Creates a recipe.
    ///
    /// The requirements are copied, so the caller may keep mutating its own
    /// list. Neither `success_rate` nor the quantities are range-checked.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        required_materials: &RequiredMaterials,
        success_rate: f64,
    ) -> Self {
        Self {
            name: name.into(),
            required_materials: required_materials.clone(),
            success_rate,
        }
    }

    /// The craft key.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Material requirements in validation order.
    #[must_use]
    pub fn required_materials(&self) -> &RequiredMaterials {
        &self.required_materials
    }

    /// Probability of a successful roll.
    #[must_use]
    pub const fn success_rate(&self) -> f64 {
        self.success_rate
    }

    /// Ordinal (byte-wise) comparison of recipe names.
    #[must_use]
    pub fn compare_name(&self, other: &Self) -> Ordering {
        self.name.as_bytes().cmp(other.name.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use craftsim_common::MaterialId;

    fn herb() -> Material {
        Material::from_name("Herb")
    }

    fn water() -> Material {
        Material::from_name("Water")
    }

    #[test]
    fn test_required_materials_keep_insertion_order() {
        let mut required = RequiredMaterials::new();
        assert!(required.insert(water(), 1));
        assert!(required.insert(herb(), 2));

        let names: Vec<_> = required.iter().map(|(m, _)| m.name().to_string()).collect();
        assert_eq!(names, vec!["Water", "Herb"]);
    }

    #[test]
    fn test_required_materials_reject_equal_key() {
        let mut required = RequiredMaterials::new();
        assert!(required.insert(herb(), 2));
        // Same name, different case and id: still the same material.
        assert!(!required.insert(Material::new(MaterialId::new(99), "HERB"), 5));
        assert_eq!(required.len(), 1);
        assert_eq!(required.get(&herb()), Some(2));
    }

    #[test]
    fn test_recipe_copies_requirements() {
        let mut required = RequiredMaterials::new();
        required.insert(herb(), 2);

        let recipe = Recipe::new("Potion", &required, 0.5);
        required.insert(water(), 1);

        assert_eq!(recipe.required_materials().len(), 1);
        assert!(!recipe.required_materials().contains(&water()));
    }

    #[test]
    fn test_recipe_accepts_unchecked_values() {
        let required: RequiredMaterials = [(herb(), -3)].into_iter().collect();
        let recipe = Recipe::new("Odd", &required, 1.5);

        assert!((recipe.success_rate() - 1.5).abs() < f64::EPSILON);
        assert_eq!(recipe.required_materials().get(&herb()), Some(-3));
    }

    #[test]
    fn test_compare_name_is_ordinal() {
        let empty = RequiredMaterials::new();
        let upper = Recipe::new("Zinc", &empty, 1.0);
        let lower = Recipe::new("apple", &empty, 1.0);

        // 'Z' (0x5A) sorts before 'a' (0x61) in byte order.
        assert_eq!(upper.compare_name(&lower), Ordering::Less);
        assert_eq!(lower.compare_name(&upper), Ordering::Greater);
        assert_eq!(upper.compare_name(&upper.clone()), Ordering::Equal);
    }
}
