//! aw-llm: dialogue script generation
//!
//! OpenAI-compatible chat completion client (Groq by default) plus the
//! radio-show prompt that yields a `Person A:` / `Person B:` script.

pub mod client;
pub mod error;
pub mod prompt;
pub mod types;

pub use client::LlmClient;
pub use error::{LlmError, Result};
pub use prompt::{dialogue_prompt, system_prompt, DialogueStyle};
pub use types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
