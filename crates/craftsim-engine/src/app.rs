//! Command-line driver: load recipes, seed an inventory, craft, report.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use craftsim_common::{CraftsimError, CraftsimResult};
use craftsim_gameplay::{CraftingEngine, Inventory, LoadReport, MaterialInventory, RandomSource};
use tracing::{info, warn};

use crate::config::{CraftsimConfig, StartingStack, CONFIG_FILE};

/// Load recipe files and attempt crafts against a starting inventory
#[derive(Parser, Debug)]
#[command(name = "craftsim")]
#[command(about = "Load recipe files and attempt crafts against a starting inventory")]
pub struct Args {
    /// Configuration file
    #[arg(long, default_value = CONFIG_FILE)]
    pub config: PathBuf,

    /// Extra recipe file, loaded after those in the config (repeatable)
    #[arg(long)]
    pub recipes: Vec<PathBuf>,

    /// Random seed for reproducible outcome rolls
    #[arg(long)]
    pub seed: Option<u64>,

    /// Add materials to the starting inventory, as NAME=QTY
    #[arg(long, value_parser = parse_stack)]
    pub give: Vec<StartingStack>,

    /// Print the loaded recipes sorted by name
    #[arg(long)]
    pub list: bool,

    /// Recipe names to craft, in order
    pub craft: Vec<String>,
}

/// Parses a `NAME=QTY` inventory argument.
pub fn parse_stack(arg: &str) -> CraftsimResult<StartingStack> {
    let (name, qty) = arg
        .rsplit_once('=')
        .ok_or_else(|| CraftsimError::InvalidArgument(format!("expected NAME=QTY, got {arg:?}")))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(CraftsimError::InvalidArgument(format!(
            "missing material name in {arg:?}"
        )));
    }
    let quantity = qty
        .trim()
        .parse()
        .map_err(|_| CraftsimError::InvalidArgument(format!("invalid quantity in {arg:?}")))?;
    Ok(StartingStack {
        material: name.to_string(),
        quantity,
    })
}

/// Reads the config file without logging, so the log filter can come from it.
///
/// Returns the defaults and the failure if the file exists but is unusable.
pub fn read_config(path: &Path) -> (CraftsimConfig, Option<CraftsimError>) {
    if !path.exists() {
        return (CraftsimConfig::default(), None);
    }
    match CraftsimConfig::try_load_from(path) {
        Ok(config) => (config, None),
        Err(e) => (CraftsimConfig::default(), Some(e)),
    }
}

/// Applies command-line overrides on top of the file config.
pub fn merge_args(mut config: CraftsimConfig, args: &Args) -> CraftsimConfig {
    config.recipe_files.extend(args.recipes.iter().cloned());
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.inventory.extend(args.give.iter().cloned());
    config.validate();
    config
}

/// Crafts each name in order and collects the messages.
pub fn craft_all<R, I>(engine: &mut CraftingEngine<R>, inventory: &mut I, names: &[String]) -> Vec<String>
where
    R: RandomSource,
    I: Inventory + ?Sized,
{
    names
        .iter()
        .map(|name| engine.craft_message(&mut *inventory, name))
        .collect()
}

fn log_load_report(report: &LoadReport) {
    for error in &report.errors {
        warn!("{error}");
    }
    info!(
        "{} recipes from {} files, {} malformed lines, {} unreadable files",
        report.recipes_loaded,
        report.files_loaded,
        report.malformed_lines(),
        report.unreadable_sources()
    );
}

fn print_inventory(inventory: &MaterialInventory) {
    println!("Inventory:");
    for (material, count) in inventory.iter() {
        println!("  {material}: {count}");
    }
}

/// Runs the CLI with an already merged configuration.
pub fn run(config: &CraftsimConfig, args: &Args) -> Result<()> {
    let mut engine = match config.seed {
        Some(seed) => CraftingEngine::with_seed(seed),
        None => CraftingEngine::new(),
    };
    let report = engine.load(&config.recipe_files);
    log_load_report(&report);

    if args.list {
        for recipe in engine.sorted_recipes() {
            let materials: Vec<String> = recipe
                .required_materials()
                .iter()
                .map(|(m, qty)| format!("{m} x{qty}"))
                .collect();
            println!(
                "{} ({:.0}%): {}",
                recipe.name(),
                recipe.success_rate() * 100.0,
                materials.join(", ")
            );
        }
    }

    let mut inventory = config.build_inventory();
    for message in craft_all(&mut engine, &mut inventory, &args.craft) {
        println!("{message}");
    }

    if !args.craft.is_empty() {
        print_inventory(&inventory);
    }
    Ok(())
}
