//! Error types for aw-wiki

use thiserror::Error;

/// aw-wiki error type
#[derive(Error, Debug)]
pub enum WikiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Wikipedia API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Article not found: {0}")]
    NotFound(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, WikiError>;
