//! # CraftSim Engine
//!
//! Front end for the crafting core:
//! - Configuration file (recipe files, seed, log filter, starting inventory)
//! - Command-line arguments and the craft driver

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod app;
pub mod config;
