/// Error types for the context map generator.
use crate::ooxml::OoxmlError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for context map operations.
pub type Result<T> = std::result::Result<T, ContextMapError>;

/// Error types for context map operations.
#[derive(Error, Debug)]
pub enum ContextMapError {
    /// Template could not be opened as a presentation
    #[error("Failed to open template {}: {source}", path.display())]
    Template {
        path: PathBuf,
        #[source]
        source: OoxmlError,
    },

    /// Output could not be written
    #[error("Failed to save {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: OoxmlError,
    },

    /// Data file could not be parsed as JSON
    #[error("Invalid data file {}: {source}", path.display())]
    Data {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration file could not be parsed
    #[error("Invalid config file {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    /// OOXML error while rewriting slides
    #[error("OOXML error: {0}")]
    Ooxml(#[from] OoxmlError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
