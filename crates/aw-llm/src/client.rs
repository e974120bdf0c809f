//! Chat completion HTTP client
//!
//! Talks to any OpenAI-compatible `/chat/completions` endpoint; the
//! default configuration points at Groq.

use reqwest::Client;
use tracing::{debug, info, warn};

use aw_core::LlmConfig;

use crate::error::{LlmError, Result};
use crate::prompt::{dialogue_prompt, system_prompt, DialogueStyle};
use crate::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

/// OpenAI-compatible chat completion client
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl LlmClient {
    /// Create a new LLM client.
    pub fn new(config: &LlmConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(LlmError::CredentialMissing);
        }

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Send a chat completion request and return the first choice's text.
    pub async fn complete(&self, request: ChatCompletionRequest) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);

        debug!("Sending chat completion request: model={}", request.model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("LLM API error: {} - {}", status, body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&body)?;
        let choice = parsed.choices.into_iter().next().ok_or(LlmError::EmptyResponse)?;

        info!(
            "Chat completion: finish_reason={:?}, tokens={}",
            choice.finish_reason,
            parsed.usage.map(|u| u.completion_tokens).unwrap_or(0)
        );

        Ok(choice.message.content)
    }

    /// Generate a two-host dialogue script for an article.
    pub async fn generate_script(
        &self,
        article_text: &str,
        style: DialogueStyle,
    ) -> Result<String> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(system_prompt(style)),
                ChatMessage::user(dialogue_prompt(article_text, style)),
            ],
            temperature: Some(0.8),
            max_tokens: Some(800),
        };

        let script = self.complete(request).await?;
        info!("Script generated: {} characters", script.chars().count());
        Ok(script)
    }
}
