//! Error types for aw-llm

use thiserror::Error;

/// aw-llm error type
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("LLM API key is not configured")]
    CredentialMissing,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("LLM API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("LLM response contained no choices")]
    EmptyResponse,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, LlmError>;
