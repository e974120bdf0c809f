//! Error types for aw-voice

use thiserror::Error;

/// A single segment's synthesis failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentFailure {
    /// Zero-based position in the parsed segment list
    pub index: usize,
    /// Human-readable failure reason
    pub reason: String,
}

fn describe_failures(failures: &[SegmentFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("#{}: {}", f.index, f.reason))
        .collect::<Vec<_>>()
        .join("; ")
}

/// aw-voice error type
#[derive(Error, Debug)]
pub enum VoiceError {
    #[error("TTS API key is not configured")]
    CredentialMissing,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("TTS API returned {status}: {message}")]
    UpstreamRejection { status: u16, message: String },

    #[error("TTS API returned an empty audio payload")]
    EmptyAudio,

    #[error("All {} synthesis attempt(s) failed: {}", failures.len(), describe_failures(failures))]
    AllSegmentsFailed { failures: Vec<SegmentFailure> },

    #[error("No audio clips to export")]
    NoAudioToExport,

    #[error("Failed to export audio: {0}")]
    Export(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, VoiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_segments_failed_lists_indices() {
        let error = VoiceError::AllSegmentsFailed {
            failures: vec![
                SegmentFailure { index: 0, reason: "timeout".to_string() },
                SegmentFailure { index: 2, reason: "429".to_string() },
            ],
        };
        let message = error.to_string();
        assert!(message.contains("All 2"));
        assert!(message.contains("#0: timeout"));
        assert!(message.contains("#2: 429"));
    }
}
