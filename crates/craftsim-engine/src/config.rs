//! CraftSim configuration.
//!
//! Recipe files, RNG seed, log filter and the starting inventory can be set in
//! a TOML file. Every field has a default, so a partial file is fine.

use craftsim_common::{CraftsimError, CraftsimResult};
use craftsim_gameplay::{Material, MaterialInventory};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Configuration file name.
pub const CONFIG_FILE: &str = "craftsim.toml";

/// A starting stack of some material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartingStack {
    /// Material name
    pub material: String,
    /// Amount held
    pub quantity: u32,
}

/// CraftSim configuration parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CraftsimConfig {
    /// Recipe files, loaded in order
    pub recipe_files: Vec<PathBuf>,
    /// Seed for outcome rolls (None = random)
    pub seed: Option<u64>,
    /// Tracing filter directive used when RUST_LOG is unset
    pub log_filter: String,
    /// Inventory at startup
    pub inventory: Vec<StartingStack>,
}

impl Default for CraftsimConfig {
    fn default() -> Self {
        Self {
            recipe_files: vec![PathBuf::from("recipes.txt")],
            seed: None,
            log_filter: "craftsim=info".to_string(),
            inventory: Vec::new(),
        }
    }
}

impl CraftsimConfig {
    /// Load configuration from a specific path.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file {} not found, using defaults", path.display());
            return Self::default();
        }

        match Self::try_load_from(path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            },
            Err(e) => {
                warn!("{e}; using defaults");
                Self::default()
            },
        }
    }

    /// Load configuration from a specific path, reporting any failure.
    pub fn try_load_from<P: AsRef<Path>>(path: P) -> CraftsimResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| CraftsimError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> CraftsimResult<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self).map_err(|e| CraftsimError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        fs::write(path, contents)?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Drop starting stacks that are empty or unnamed.
    pub fn validate(&mut self) {
        self.inventory.retain(|stack| {
            let keep = stack.quantity > 0 && !stack.material.trim().is_empty();
            if !keep {
                warn!("Ignoring starting stack {:?}", stack);
            }
            keep
        });
        if self.log_filter.trim().is_empty() {
            self.log_filter = Self::default().log_filter;
        }
    }

    /// Build the starting inventory.
    #[must_use]
    pub fn build_inventory(&self) -> MaterialInventory {
        let mut inventory = MaterialInventory::new();
        for stack in &self.inventory {
            inventory.add(&Material::from_name(&stack.material), stack.quantity);
        }
        inventory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use craftsim_gameplay::Inventory;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = CraftsimConfig::default();
        assert_eq!(config.recipe_files, vec![PathBuf::from("recipes.txt")]);
        assert_eq!(config.seed, None);
        assert_eq!(config.log_filter, "craftsim=info");
        assert!(config.inventory.is_empty());
    }

    #[test]
    fn test_config_save_load() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join(CONFIG_FILE);

        let mut config = CraftsimConfig::default();
        config.seed = Some(12345);
        config.recipe_files = vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")];
        config.inventory.push(StartingStack {
            material: "Herb".to_string(),
            quantity: 4,
        });

        config.save_to(&config_path).expect("Failed to save config");

        let loaded = CraftsimConfig::load_from(&config_path);
        assert_eq!(loaded.seed, Some(12345));
        assert_eq!(loaded.recipe_files, config.recipe_files);
        assert_eq!(loaded.inventory, config.inventory);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&path, "seed = 7\n").expect("write config");

        let config = CraftsimConfig::load_from(&path);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.log_filter, "craftsim=info");
    }

    #[test]
    fn test_config_load_missing_file() {
        let config = CraftsimConfig::load_from("/nonexistent/path/craftsim.toml");
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&path, "seed = \"not a number\"\n").expect("write config");

        assert!(matches!(
            CraftsimConfig::try_load_from(&path),
            Err(CraftsimError::Config { .. })
        ));
        assert_eq!(CraftsimConfig::load_from(&path).seed, None);
    }

    #[test]
    fn test_validate_drops_empty_stacks() {
        let mut config = CraftsimConfig::default();
        config.log_filter = "  ".to_string();
        config.inventory = vec![
            StartingStack {
                material: "Herb".to_string(),
                quantity: 0,
            },
            StartingStack {
                material: " ".to_string(),
                quantity: 3,
            },
            StartingStack {
                material: "Water".to_string(),
                quantity: 2,
            },
        ];

        config.validate();

        assert_eq!(config.inventory.len(), 1);
        assert_eq!(config.inventory[0].material, "Water");
        assert_eq!(config.log_filter, "craftsim=info");
    }

    #[test]
    fn test_build_inventory() {
        let mut config = CraftsimConfig::default();
        config.inventory.push(StartingStack {
            material: " Herb ".to_string(),
            quantity: 2,
        });
        config.inventory.push(StartingStack {
            material: "herb".to_string(),
            quantity: 3,
        });

        let inventory = config.build_inventory();
        assert_eq!(inventory.len(), 1);
        assert_eq!(inventory.quantity(&Material::from_name("Herb")), 5);
    }
}
