//! Crafting system.
//!
//! A craft attempt runs lookup, validation, consumption and an outcome roll,
//! in that order, and ends in exactly one [`CraftOutcome`] or
//! [`CraftingError`].
//!
//! Validation is read-only and stops at the first material that falls short.
//! Consumption then removes materials one by one; if the inventory refuses a
//! removal part-way through, materials already removed stay removed. A failed
//! roll also keeps the materials: the success rate is the risk of losing them.
//!
//! The validate-then-consume sequence is not atomic. Callers sharing one
//! inventory between threads must serialize craft calls themselves.

use std::fmt;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

use crate::inventory::Inventory;
use crate::material::{names_match, Material};
use crate::random::RandomSource;
use crate::recipe::Recipe;
use crate::recipe_loader::{LoadReport, RecipeLoader};

/// Crafting error types.
///
/// The display strings are the user-facing messages.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CraftingError {
    /// No recipe has the requested name
    #[error("Recipe not found.")]
    RecipeNotFound(String),

    /// A required material is not held at all
    #[error("Missing material: {material}")]
    MissingMaterial {
        /// First material found missing
        material: Material,
    },

    /// A required material is held, but not enough of it
    #[error("Not enough {material} (need {required}, have {held})")]
    InsufficientMaterial {
        /// First material found short
        material: Material,
        /// Amount the recipe needs
        required: i32,
        /// Amount the inventory holds
        held: u32,
    },

    /// The inventory refused a removal after validation had passed
    #[error("Not enough materials")]
    ConsumptionFailed {
        /// Recipe being crafted
        recipe: String,
        /// Material whose removal was refused
        material: Material,
    },
}

impl CraftingError {
    /// True if the inventory was left untouched.
    #[must_use]
    pub fn inventory_unchanged(&self) -> bool {
        !matches!(self, Self::ConsumptionFailed { .. })
    }
}

/// Result type for crafting operations.
pub type CraftingResult<T> = Result<T, CraftingError>;

/// How a craft attempt ended once its materials were consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CraftOutcome {
    /// The roll beat the success rate; the item is made
    Success {
        /// Name of the crafted recipe
        recipe: String,
    },
    /// The roll failed; the materials are lost
    Failure {
        /// Name of the attempted recipe
        recipe: String,
    },
}

impl CraftOutcome {
    /// True for [`CraftOutcome::Success`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Name of the recipe the outcome belongs to.
    #[must_use]
    pub fn recipe(&self) -> &str {
        match self {
            Self::Success { recipe } | Self::Failure { recipe } => recipe,
        }
    }
}

impl fmt::Display for CraftOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success { recipe } => write!(f, "Crafting '{recipe}' succeeded!"),
            Self::Failure { recipe } => write!(f, "Crafting '{recipe}' failed. Materials lost."),
        }
    }
}

/// Holds the loaded recipes and performs craft attempts.
///
/// Recipes are kept in load order, duplicates included. The inventory is not
/// owned; each craft call borrows it.
#[derive(Debug)]
pub struct CraftingEngine<R = fastrand::Rng> {
    /// Recipes in load order
    recipes: Vec<Recipe>,
    /// Source for outcome rolls
    rng: R,
}

impl CraftingEngine {
    /// Creates an engine with an entropy-seeded random source.
    #[must_use]
    pub fn new() -> Self {
        Self::with_random(fastrand::Rng::new())
    }

    /// Creates an engine whose rolls are reproducible for a given seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_random(fastrand::Rng::with_seed(seed))
    }
}

impl Default for CraftingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandomSource> CraftingEngine<R> {
    /// Creates an engine with the given random source.
    #[must_use]
    pub fn with_random(rng: R) -> Self {
        Self {
            recipes: Vec::new(),
            rng,
        }
    }

    /// Loads recipe files in order, appending every parsed recipe.
    ///
    /// Never fails: unreadable files and malformed lines are logged and
    /// returned in the report.
    pub fn load<P: AsRef<Path>>(&mut self, sources: &[P]) -> LoadReport {
        let mut loader = RecipeLoader::new();
        loader.load_sources(sources, &mut self.recipes);
        loader.into_report()
    }

    /// Appends a recipe.
    pub fn add_recipe(&mut self, recipe: Recipe) {
        self.recipes.push(recipe);
    }

    /// Returns all recipes in load order.
    #[must_use]
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Returns the number of loaded recipes.
    #[must_use]
    pub fn recipe_count(&self) -> usize {
        self.recipes.len()
    }

    /// Returns recipes ordered by name (ordinal), ties in load order.
    #[must_use]
    pub fn sorted_recipes(&self) -> Vec<&Recipe> {
        let mut sorted: Vec<_> = self.recipes.iter().collect();
        sorted.sort_by(|a, b| a.compare_name(b));
        sorted
    }

    /// Finds the first recipe whose name matches, ignoring case.
    #[must_use]
    pub fn find_recipe(&self, name: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| names_match(r.name(), name))
    }

    /// Returns the random source.
    pub fn random_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Checks that `name` exists and `inventory` covers it, without changing
    /// anything.
    pub fn validate_craft<I: Inventory + ?Sized>(
        &self,
        inventory: &I,
        name: &str,
    ) -> CraftingResult<&Recipe> {
        let recipe = self
            .find_recipe(name)
            .ok_or_else(|| CraftingError::RecipeNotFound(name.to_string()))?;
        check_materials(recipe, inventory)?;
        Ok(recipe)
    }

    /// Attempts to craft `name` from `inventory`.
    ///
    /// On `Ok`, the required materials have been removed whether the roll
    /// succeeded or not. On `Err`, the inventory is unchanged unless the error
    /// is [`CraftingError::ConsumptionFailed`].
    pub fn craft<I: Inventory + ?Sized>(
        &mut self,
        inventory: &mut I,
        name: &str,
    ) -> CraftingResult<CraftOutcome> {
        let Some(recipe) = self.recipes.iter().find(|r| names_match(r.name(), name)) else {
            debug!("Craft request for unknown recipe {:?}", name);
            return Err(CraftingError::RecipeNotFound(name.to_string()));
        };

        check_materials(recipe, &*inventory)?;
        consume_materials(recipe, &mut *inventory)?;

        let roll = self.rng.next_unit();
        let outcome = if roll < recipe.success_rate() {
            CraftOutcome::Success {
                recipe: recipe.name().to_string(),
            }
        } else {
            CraftOutcome::Failure {
                recipe: recipe.name().to_string(),
            }
        };

        debug!(
            "Crafted {:?}: roll {:.3} against {:.3}, success = {}",
            recipe.name(),
            roll,
            recipe.success_rate(),
            outcome.is_success()
        );
        Ok(outcome)
    }

    /// Attempts a craft and returns the message to show the player.
    pub fn craft_message<I: Inventory + ?Sized>(&mut self, inventory: &mut I, name: &str) -> String {
        match self.craft(inventory, name) {
            Ok(outcome) => outcome.to_string(),
            Err(e) => e.to_string(),
        }
    }
}

/// Read-only pass; reports the first material that falls short.
fn check_materials<I: Inventory + ?Sized>(recipe: &Recipe, inventory: &I) -> CraftingResult<()> {
    for (material, required) in recipe.required_materials().iter() {
        let held = inventory.quantity(material);
        if i64::from(held) >= i64::from(required) {
            continue;
        }
        return Err(if held == 0 {
            CraftingError::MissingMaterial {
                material: material.clone(),
            }
        } else {
            CraftingError::InsufficientMaterial {
                material: material.clone(),
                required,
                held,
            }
        });
    }
    Ok(())
}

/// Removes every requirement in order. Stops at the first refusal without
/// restoring earlier removals.
fn consume_materials<I: Inventory + ?Sized>(
    recipe: &Recipe,
    inventory: &mut I,
) -> CraftingResult<()> {
    for (material, required) in recipe.required_materials().iter() {
        // A negative requirement passes validation but cannot be removed.
        let removed = u32::try_from(required).is_ok_and(|amount| inventory.remove(material, amount));
        if !removed {
            warn!(
                "Inventory refused to remove {} x{} while crafting {:?}",
                material,
                required,
                recipe.name()
            );
            return Err(CraftingError::ConsumptionFailed {
                recipe: recipe.name().to_string(),
                material: material.clone(),
            });
        }
    }
    Ok(())
}
