//! Error types for arscene

use thiserror::Error;

/// Main error type for arscene operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Dataset load failed: {0}")]
    Load(String),

    #[error("Visualization error: {0}")]
    Visualization(String),
}

/// Result type alias for arscene operations
pub type Result<T> = std::result::Result<T, Error>;
