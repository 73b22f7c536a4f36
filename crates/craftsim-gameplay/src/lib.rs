//! # CraftSim Gameplay
//!
//! The crafting core:
//! - Material identity (match by id or by name)
//! - Recipes and their material requirements
//! - Recipe loading from comma-delimited text files
//! - Inventory boundary and an in-memory inventory
//! - Random sources for outcome rolls
//! - The crafting engine: lookup, validate, consume, roll

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod crafting;
pub mod inventory;
pub mod material;
pub mod random;
pub mod recipe;
pub mod recipe_loader;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::crafting::*;
    pub use crate::inventory::*;
    pub use crate::material::*;
    pub use crate::random::*;
    pub use crate::recipe::*;
    pub use crate::recipe_loader::*;
}

pub use prelude::*;
