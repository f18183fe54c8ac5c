//! Error types for the cognitive map engine.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for cognitive map operations.
#[derive(Error, Debug)]
pub enum CogMapsError {
    /// A field that must be numeric could not be parsed.
    #[error("Parse error at line {line}: {message}")]
    Parse {
        /// 1-based line number in the source file.
        line: u64,
        /// What went wrong.
        message: String,
    },

    /// Error raised by the tabular reader or writer.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Attempted assignment to a view that is derived from the maps.
    #[error("CogMaps.{0} does not support direct assignment")]
    ReadOnly(&'static str),

    /// Weighting scheme name absent from the loaded schemes.
    #[error("Unknown weighting scheme: {0}")]
    UnknownScheme(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Empty input.
    #[error("Empty input: {0}")]
    EmptyInput(String),
}

/// Result type alias for cognitive map operations.
pub type Result<T> = std::result::Result<T, CogMapsError>;

impl CogMapsError {
    /// Builds a [`CogMapsError::Parse`] for the given line.
    pub fn parse(line: u64, message: impl Into<String>) -> Self {
        CogMapsError::Parse {
            line,
            message: message.into(),
        }
    }
}
