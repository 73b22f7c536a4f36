//! Error types for CraftSim.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for CraftSim operations.
#[derive(Debug, Error)]
pub enum CraftsimError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed or written
    #[error("Config error in {path}: {message}")]
    Config {
        /// Path of the offending file
        path: PathBuf,
        /// Parser or serializer message
        message: String,
    },

    /// A command-line or config value was not understood
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type alias for CraftSim operations.
pub type CraftsimResult<T> = Result<T, CraftsimError>;
