//! Text-to-speech HTTP client
//!
//! Supports two providers, fixed at configuration time:
//! - ElevenLabs (MP3 output)
//! - OpenAI TTS (WAV output, which the mixer can normalize)
//!
//! Each provider has exactly one request shape; there is no runtime
//! probing of API availability.

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};

use aw_core::{SpeechConfig, SpeechProvider};

use crate::error::{Result, VoiceError};

/// TTS API provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TtsProvider {
    /// ElevenLabs API
    ElevenLabs,
    /// OpenAI TTS API
    OpenAi,
}

/// TTS configuration
#[derive(Debug, Clone)]
pub struct TtsConfig {
    /// API key
    pub api_key: String,
    /// Provider to use
    pub provider: TtsProvider,
    /// Model to use
    pub model: String,
    /// Voice stability (ElevenLabs tuning, 0.0 - 1.0)
    pub stability: f32,
    /// Similarity boost (ElevenLabs tuning, 0.0 - 1.0)
    pub similarity_boost: f32,
    /// Custom API base URL (for testing)
    pub base_url: Option<String>,
}

impl TtsConfig {
    /// Create a new ElevenLabs configuration
    pub fn elevenlabs(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            provider: TtsProvider::ElevenLabs,
            model: "eleven_multilingual_v2".to_string(),
            stability: 0.5,
            similarity_boost: 0.75,
            base_url: None,
        }
    }

    /// Create a new OpenAI TTS configuration
    pub fn openai(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            provider: TtsProvider::OpenAi,
            model: "tts-1".to_string(),
            stability: 0.5,
            similarity_boost: 0.75,
            base_url: None,
        }
    }

    /// Build a configuration from the application speech settings.
    pub fn from_speech(config: &SpeechConfig) -> Self {
        let mut tts = match config.provider {
            SpeechProvider::ElevenLabs => Self::elevenlabs(config.api_key()),
            SpeechProvider::OpenAi => Self::openai(config.api_key()),
        };
        tts.stability = config.stability;
        tts.similarity_boost = config.similarity_boost;
        tts
    }

    /// Set voice stability
    pub fn with_stability(mut self, stability: f32) -> Self {
        self.stability = stability.clamp(0.0, 1.0);
        self
    }

    /// Set similarity boost
    pub fn with_similarity_boost(mut self, boost: f32) -> Self {
        self.similarity_boost = boost.clamp(0.0, 1.0);
        self
    }

    /// Set a custom API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Get the API base URL for the provider
    pub fn base_url(&self) -> &str {
        if let Some(url) = &self.base_url {
            return url;
        }
        match self.provider {
            TtsProvider::ElevenLabs => "https://api.elevenlabs.io/v1",
            TtsProvider::OpenAi => "https://api.openai.com/v1",
        }
    }
}

/// TTS client for speech synthesis
pub struct TtsClient {
    client: Client,
    config: TtsConfig,
}

impl TtsClient {
    /// Create a new TTS client
    pub fn new(config: TtsConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .map_err(|e| VoiceError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Whether an API key is configured
    pub fn has_credentials(&self) -> bool {
        !self.config.api_key.is_empty()
    }

    /// Synthesize speech for one piece of text with the given voice.
    ///
    /// Returns the encoded audio bytes from the provider.
    pub async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>> {
        match self.config.provider {
            TtsProvider::ElevenLabs => self.synthesize_elevenlabs(text, voice).await,
            TtsProvider::OpenAi => self.synthesize_openai(text, voice).await,
        }
    }

    async fn synthesize_elevenlabs(&self, text: &str, voice_id: &str) -> Result<Vec<u8>> {
        let url = format!("{}/text-to-speech/{}", self.config.base_url(), voice_id);

        debug!("Synthesizing {} chars with ElevenLabs voice {}", text.len(), voice_id);

        let body = serde_json::json!({
            "text": text,
            "model_id": self.config.model,
            "voice_settings": {
                "stability": self.config.stability,
                "similarity_boost": self.config.similarity_boost,
                "style": 0.5,
                "use_speaker_boost": true,
            }
        });

        let response = self
            .client
            .post(&url)
            .header("xi-api-key", &self.config.api_key)
            .header("Accept", "audio/mpeg")
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        self.read_audio(response).await
    }

    async fn synthesize_openai(&self, text: &str, voice: &str) -> Result<Vec<u8>> {
        let url = format!("{}/audio/speech", self.config.base_url());

        debug!("Synthesizing {} chars with OpenAI voice {}", text.len(), voice);

        let body = serde_json::json!({
            "model": self.config.model,
            "input": text,
            "voice": voice,
            "response_format": "wav",
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        self.read_audio(response).await
    }

    async fn read_audio(&self, response: reqwest::Response) -> Result<Vec<u8>> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VoiceError::UpstreamRejection {
                status: status.as_u16(),
                message: rejection_message(&body),
            });
        }

        let audio = response.bytes().await?;
        if audio.is_empty() {
            return Err(VoiceError::EmptyAudio);
        }
        info!("Synthesis complete: {} bytes", audio.len());
        Ok(audio.to_vec())
    }
}

/// Pull the human-readable message out of a provider error payload.
///
/// Providers disagree on the field name (`detail`, `message`,
/// `error.message`); fall back to the raw body when none parses.
fn rejection_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        let candidates = [
            &value["detail"]["message"],
            &value["detail"],
            &value["message"],
            &value["error"]["message"],
        ];
        for candidate in candidates {
            if let Some(text) = candidate.as_str() {
                return text.to_string();
            }
        }
    }

    let snippet: String = body.chars().take(200).collect();
    snippet
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_elevenlabs() {
        let config = TtsConfig::elevenlabs("key");
        assert_eq!(config.provider, TtsProvider::ElevenLabs);
        assert_eq!(config.model, "eleven_multilingual_v2");
        assert_eq!(config.base_url(), "https://api.elevenlabs.io/v1");
    }

    #[test]
    fn test_config_openai() {
        let config = TtsConfig::openai("key");
        assert_eq!(config.provider, TtsProvider::OpenAi);
        assert_eq!(config.model, "tts-1");
        assert_eq!(config.base_url(), "https://api.openai.com/v1");
    }

    #[test]
    fn test_config_tuning_clamped() {
        let config = TtsConfig::elevenlabs("key")
            .with_stability(1.5)
            .with_similarity_boost(-0.2);
        assert_eq!(config.stability, 1.0);
        assert_eq!(config.similarity_boost, 0.0);
    }

    #[test]
    fn test_config_from_speech() {
        let speech = SpeechConfig {
            provider: SpeechProvider::OpenAi,
            openai_api_key: "oa-key".to_string(),
            stability: 0.3,
            ..SpeechConfig::default()
        };
        let config = TtsConfig::from_speech(&speech);
        assert_eq!(config.provider, TtsProvider::OpenAi);
        assert_eq!(config.api_key, "oa-key");
        assert_eq!(config.stability, 0.3);
    }

    #[test]
    fn test_custom_base_url_wins() {
        let config = TtsConfig::elevenlabs("key").with_base_url("http://localhost:9999");
        assert_eq!(config.base_url(), "http://localhost:9999");
    }

    #[test]
    fn test_rejection_message_detail_string() {
        assert_eq!(rejection_message(r#"{"detail": "quota exceeded"}"#), "quota exceeded");
    }

    #[test]
    fn test_rejection_message_nested_detail() {
        assert_eq!(
            rejection_message(r#"{"detail": {"status": "quota_exceeded", "message": "out of credits"}}"#),
            "out of credits"
        );
    }

    #[test]
    fn test_rejection_message_openai_shape() {
        assert_eq!(
            rejection_message(r#"{"error": {"message": "invalid voice"}}"#),
            "invalid voice"
        );
    }

    #[test]
    fn test_rejection_message_unparseable_body() {
        assert_eq!(rejection_message("<html>502</html>"), "<html>502</html>");
    }
}
