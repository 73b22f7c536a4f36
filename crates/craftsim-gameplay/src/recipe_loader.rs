//! Recipe loading from comma-delimited text files.
//!
//! One recipe per line:
//!
//! ```text
//! <name>, <success rate>, <material>, <quantity>, <material>, <quantity>, ...
//! ```
//!
//! Blank lines are skipped. Names cannot contain commas; there is no quoting.
//!
//! Loading is best effort: an unreadable file or a malformed line is logged,
//! recorded in the [`LoadReport`], and skipped. Recipes parsed before the
//! failure are kept.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::material::Material;
use crate::recipe::{Recipe, RequiredMaterials};

/// Why a single line could not be turned into a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    /// Recipe name field is empty.
    #[error("recipe name is empty")]
    EmptyName,

    /// Only a name was given.
    #[error("missing success rate")]
    MissingSuccessRate,

    /// Success rate is not a decimal number.
    #[error("invalid success rate {0:?}")]
    InvalidSuccessRate(String),

    /// A material name has no quantity after it.
    #[error("material {0:?} has no quantity")]
    UnpairedMaterial(String),

    /// A material name field is empty.
    #[error("empty material name in field {0}")]
    EmptyMaterialName(usize),

    /// Quantity is not an integer.
    #[error("invalid quantity {value:?} for material {material:?}")]
    InvalidQuantity {
        /// Material the quantity belongs to
        material: String,
        /// Raw field text
        value: String,
    },

    /// The same material is listed twice.
    #[error("material {0:?} listed more than once")]
    DuplicateMaterial(String),
}

/// A failure isolated to one source or one line.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Source file could not be read.
    #[error("cannot read recipe file {path:?}: {source}")]
    SourceUnreadable {
        /// Source path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// A line failed to parse.
    #[error("{path:?} line {line}: {reason}")]
    MalformedLine {
        /// Source path
        path: PathBuf,
        /// 1-based line number
        line: usize,
        /// What was wrong with it
        #[source]
        reason: LineError,
    },
}

/// Outcome of a bulk load.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Every failure, in the order encountered.
    pub errors: Vec<LoadError>,
    /// Number of files read successfully.
    pub files_loaded: u32,
    /// Number of recipes appended.
    pub recipes_loaded: u32,
}

impl LoadReport {
    /// True if nothing failed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of lines skipped as malformed.
    #[must_use]
    pub fn malformed_lines(&self) -> usize {
        self.errors
            .iter()
            .filter(|e| matches!(e, LoadError::MalformedLine { .. }))
            .count()
    }

    /// Number of sources that could not be read.
    #[must_use]
    pub fn unreadable_sources(&self) -> usize {
        self.errors
            .iter()
            .filter(|e| matches!(e, LoadError::SourceUnreadable { .. }))
            .count()
    }

    /// Folds another report into this one.
    pub fn merge(&mut self, other: Self) {
        self.errors.extend(other.errors);
        self.files_loaded += other.files_loaded;
        self.recipes_loaded += other.recipes_loaded;
    }
}

/// Parses one non-blank line into a recipe.
pub fn parse_line(line: &str) -> Result<Recipe, LineError> {
    let mut fields = line.split(',');

    let name = fields.next().unwrap_or_default().trim();
    if name.is_empty() {
        return Err(LineError::EmptyName);
    }

    let rate_field = fields.next().ok_or(LineError::MissingSuccessRate)?.trim();
    let success_rate: f64 = rate_field
        .parse()
        .map_err(|_| LineError::InvalidSuccessRate(rate_field.to_string()))?;

    let mut required = RequiredMaterials::new();
    let mut index = 2;
    while let Some(material_field) = fields.next() {
        let material_name = material_field.trim();
        if material_name.is_empty() {
            return Err(LineError::EmptyMaterialName(index));
        }
        let quantity_field = fields
            .next()
            .ok_or_else(|| LineError::UnpairedMaterial(material_name.to_string()))?
            .trim();
        let quantity: i32 = quantity_field
            .parse()
            .map_err(|_| LineError::InvalidQuantity {
                material: material_name.to_string(),
                value: quantity_field.to_string(),
            })?;

        if !required.insert(Material::from_name(material_name), quantity) {
            return Err(LineError::DuplicateMaterial(material_name.to_string()));
        }
        index += 2;
    }

    Ok(Recipe::new(name, &required, success_rate))
}

/// Reads recipe files into an ordered recipe list.
#[derive(Debug, Default)]
pub struct RecipeLoader {
    report: LoadReport,
}

impl RecipeLoader {
    /// Creates a loader with an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns what has been loaded and what failed so far.
    #[must_use]
    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    /// Consumes the loader, returning its report.
    #[must_use]
    pub fn into_report(self) -> LoadReport {
        self.report
    }

    /// Loads every source in order, appending to `recipes`.
    pub fn load_sources<P: AsRef<Path>>(&mut self, sources: &[P], recipes: &mut Vec<Recipe>) {
        for source in sources {
            self.load_file(source.as_ref(), recipes);
        }
        info!(
            "Loaded {} recipes from {} files ({} problems)",
            self.report.recipes_loaded,
            self.report.files_loaded,
            self.report.errors.len()
        );
    }

    /// Loads one file, appending to `recipes`.
    ///
    /// Returns `false` if the file could not be read at all.
    pub fn load_file(&mut self, path: &Path, recipes: &mut Vec<Recipe>) -> bool {
        debug!("Loading recipe file: {:?}", path);

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(source) => {
                warn!("Failed to read recipe file {:?}: {}", path, source);
                self.report.errors.push(LoadError::SourceUnreadable {
                    path: path.to_path_buf(),
                    source,
                });
                return false;
            },
        };

        let loaded = self.load_str(path, &content, recipes);
        self.report.files_loaded += 1;
        debug!("Loaded {} recipes from {:?}", loaded, path);
        true
    }

    /// Parses already-read text; `origin` is only used for diagnostics.
    ///
    /// Returns the number of recipes appended.
    pub fn load_str(&mut self, origin: &Path, content: &str, recipes: &mut Vec<Recipe>) -> u32 {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut loaded = 0;

        for (index, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match parse_line(line) {
                Ok(recipe) => {
                    recipes.push(recipe);
                    loaded += 1;
                },
                Err(reason) => {
                    warn!("Skipping line {} of {:?}: {}", index + 1, origin, reason);
                    self.report.errors.push(LoadError::MalformedLine {
                        path: origin.to_path_buf(),
                        line: index + 1,
                        reason,
                    });
                },
            }
        }

        self.report.recipes_loaded += loaded;
        loaded
    }
}
