//! Configuration management
//!
//! Settings are resolved in the following order:
//! 1. Environment variables
//! 2. airwave.toml configuration file
//! 3. Defaults
//!
//! Inside the config file, `${VAR_NAME}` expands to the value of the
//! corresponding environment variable.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// TTS provider selection
///
/// The provider is fixed at configuration time; each one has exactly one
/// request shape. There is no runtime probing of which API is available.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SpeechProvider {
    /// ElevenLabs text-to-speech API
    #[default]
    ElevenLabs,
    /// OpenAI text-to-speech API
    OpenAi,
}

/// Microsoft Graph configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Bearer access token for the Graph API
    pub access_token: String,

    /// API base URL
    #[serde(default = "default_graph_base_url")]
    pub base_url: String,

    /// Page size hint sent with the first request ($top). Advisory only,
    /// the server may ignore it.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            base_url: default_graph_base_url(),
            page_size: default_page_size(),
        }
    }
}

/// LLM configuration (OpenAI-compatible chat completions)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// API key
    pub api_key: String,

    /// Model to use
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL (defaults to the Groq OpenAI-compatible endpoint)
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            base_url: default_llm_base_url(),
        }
    }
}

/// Speech synthesis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Provider to use
    #[serde(default)]
    pub provider: SpeechProvider,

    /// ElevenLabs API key
    #[serde(default)]
    pub elevenlabs_api_key: String,

    /// OpenAI API key
    #[serde(default)]
    pub openai_api_key: String,

    /// Voice identifier for the first host
    #[serde(default = "default_voice_a")]
    pub voice_a: String,

    /// Voice identifier for the second host
    #[serde(default = "default_voice_b")]
    pub voice_b: String,

    /// Voice stability (ElevenLabs tuning, 0.0 - 1.0)
    #[serde(default = "default_stability")]
    pub stability: f32,

    /// Similarity boost (ElevenLabs tuning, 0.0 - 1.0)
    #[serde(default = "default_similarity_boost")]
    pub similarity_boost: f32,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            provider: SpeechProvider::default(),
            elevenlabs_api_key: String::new(),
            openai_api_key: String::new(),
            voice_a: default_voice_a(),
            voice_b: default_voice_b(),
            stability: default_stability(),
            similarity_boost: default_similarity_boost(),
        }
    }
}

impl SpeechConfig {
    /// API key for the selected provider
    pub fn api_key(&self) -> &str {
        match self.provider {
            SpeechProvider::ElevenLabs => &self.elevenlabs_api_key,
            SpeechProvider::OpenAi => &self.openai_api_key,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default path for extracted messages (JSON)
    #[serde(default = "default_messages_path")]
    pub messages_path: String,

    /// Default path for the combined audio file
    #[serde(default = "default_audio_path")]
    pub audio_path: String,

    /// Silence inserted between consecutive clips, in milliseconds
    #[serde(default = "default_gap_ms")]
    pub gap_ms: u64,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            messages_path: default_messages_path(),
            audio_path: default_audio_path(),
            gap_ms: default_gap_ms(),
        }
    }
}

fn default_graph_base_url() -> String {
    "https://graph.microsoft.com/v1.0".to_string()
}

fn default_page_size() -> u32 {
    50
}

fn default_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}

fn default_llm_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_voice_a() -> String {
    "21m00Tcm4TlvDq8ikWAM".to_string()
}

fn default_voice_b() -> String {
    "pNInz6obpgDQGcFmaJgB".to_string()
}

fn default_stability() -> f32 {
    0.5
}

fn default_similarity_boost() -> f32 {
    0.75
}

fn default_messages_path() -> String {
    "teams_messages.json".to_string()
}

fn default_audio_path() -> String {
    "radio_show.wav".to_string()
}

fn default_gap_ms() -> u64 {
    300
}

/// Main configuration for airwave
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Microsoft Graph configuration
    #[serde(default)]
    pub graph: GraphConfig,

    /// LLM configuration
    #[serde(default)]
    pub llm: LlmConfig,

    /// Speech synthesis configuration
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Expand `${VAR_NAME}` occurrences to environment variable values.
    ///
    /// Unset variables expand to the empty string.
    fn expand_env_vars(value: &str) -> String {
        let mut result = String::new();
        let mut chars = value.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '$' && chars.peek() == Some(&'{') {
                chars.next(); // consume '{'

                let mut var_name = String::new();
                while let Some(&c) = chars.peek() {
                    if c == '}' {
                        chars.next(); // consume '}'
                        break;
                    }
                    var_name.push(chars.next().unwrap());
                }

                if let Ok(env_value) = std::env::var(&var_name) {
                    result.push_str(&env_value);
                }
            } else {
                result.push(c);
            }
        }

        result
    }

    /// Load configuration from a TOML file.
    ///
    /// `${VAR_NAME}` placeholders in the file are replaced with environment
    /// variable values before parsing; environment variables then override
    /// the parsed values.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let toml_content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

        let expanded_content = Self::expand_env_vars(&toml_content);

        let mut config: Config = toml::from_str(&expanded_content)
            .map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))?;

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load configuration from the default locations.
    ///
    /// Reads `./airwave.toml` when present, otherwise falls back to
    /// environment variables alone.
    pub fn load() -> Result<Self> {
        if Path::new("airwave.toml").exists() {
            return Self::from_toml_file("airwave.toml");
        }

        Ok(Self::from_env())
    }

    /// Load configuration from environment variables only.
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Override settings from environment variables.
    fn apply_env_overrides(&mut self) {
        if let Ok(token) = std::env::var("GRAPH_ACCESS_TOKEN") {
            self.graph.access_token = token;
        }
        if let Ok(url) = std::env::var("GRAPH_BASE_URL") {
            if !url.is_empty() {
                self.graph.base_url = url;
            }
        }
        if let Ok(size) = std::env::var("GRAPH_PAGE_SIZE") {
            if let Ok(n) = size.parse() {
                self.graph.page_size = n;
            }
        }

        if let Ok(key) = std::env::var("LLM_API_KEY")
            .or_else(|_| std::env::var("GROQ_API_KEY"))
        {
            self.llm.api_key = key;
        }
        if let Ok(model) = std::env::var("LLM_MODEL") {
            if !model.is_empty() {
                self.llm.model = model;
            }
        }
        if let Ok(url) = std::env::var("LLM_BASE_URL") {
            if !url.is_empty() {
                self.llm.base_url = url;
            }
        }

        if let Ok(provider) = std::env::var("TTS_PROVIDER") {
            self.speech.provider = match provider.to_lowercase().as_str() {
                "openai" => SpeechProvider::OpenAi,
                _ => SpeechProvider::ElevenLabs,
            };
        }
        if let Ok(key) = std::env::var("ELEVENLABS_API_KEY") {
            self.speech.elevenlabs_api_key = key;
        }
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            self.speech.openai_api_key = key;
        }
        if let Ok(voice) = std::env::var("VOICE_A_ID") {
            if !voice.is_empty() {
                self.speech.voice_a = voice;
            }
        }
        if let Ok(voice) = std::env::var("VOICE_B_ID") {
            if !voice.is_empty() {
                self.speech.voice_b = voice;
            }
        }

        if let Ok(path) = std::env::var("MESSAGES_OUTPUT_PATH") {
            self.output.messages_path = path;
        }
        if let Ok(path) = std::env::var("AUDIO_OUTPUT_PATH") {
            self.output.audio_path = path;
        }
        if let Ok(gap) = std::env::var("AUDIO_GAP_MS") {
            if let Ok(ms) = gap.parse() {
                self.output.gap_ms = ms;
            }
        }
    }
}
