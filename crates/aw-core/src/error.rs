//! Error types for aw-core

use thiserror::Error;

/// Main error type for aw-core
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for aw-core
pub type Result<T> = std::result::Result<T, Error>;
