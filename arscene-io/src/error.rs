//! Error types for dataset loading

use thiserror::Error;

/// Errors that can occur while loading a capture dataset
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("{path}: source is empty, expected a header line")]
    EmptySource { path: String },

    #[error("{path}: missing required column '{column}'")]
    MissingColumn { path: String, column: String },

    #[error("{path}:{line}: {message}")]
    MalformedRow {
        path: String,
        line: usize,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for dataset loading
pub type Result<T> = std::result::Result<T, LoadError>;

impl From<LoadError> for arscene_core::Error {
    fn from(e: LoadError) -> Self {
        match e {
            LoadError::Io(io) => arscene_core::Error::Io(io),
            other => arscene_core::Error::Load(other.to_string()),
        }
    }
}
