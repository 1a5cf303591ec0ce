//! Error types for the API

use std::path::PathBuf;
use thiserror::Error;

/// Error type for splitter operations
#[derive(Debug, Error)]
pub enum SplitError {
    /// Invalid or contradictory options
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Requested preset does not exist
    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    /// Malformed TOML configuration
    #[error("Failed to parse configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// AST input whose ranges cannot be scanned
    #[error("Malformed node structure: {0}")]
    Structure(String),

    /// Configuration file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for splitter operations
pub type Result<T> = std::result::Result<T, SplitError>;
