//! Error types for aw-graph

use thiserror::Error;

/// aw-graph error type
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Graph API returned {status}: {body}")]
    Transport { status: u16, body: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed Teams URL: {0}")]
    MalformedUrl(String),

    #[error("Could not extract {0} from URL")]
    MissingField(&'static str),

    #[error("No team is provisioned for group {0}")]
    TeamNotFound(String),

    #[error("Graph access token is not configured")]
    CredentialMissing,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write messages: {0}")]
    Export(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, GraphError>;

/// Truncate a response body for error reporting.
pub(crate) fn body_snippet(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        let truncated: String = body.chars().take(MAX).collect();
        format!("{}...", truncated)
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_snippet_short() {
        assert_eq!(body_snippet("short body"), "short body");
    }

    #[test]
    fn test_body_snippet_truncates() {
        let long = "x".repeat(500);
        let snippet = body_snippet(&long);
        assert_eq!(snippet.len(), 203);
        assert!(snippet.ends_with("..."));
    }
}
