//! aw-core: airwave core library
//!
//! Shared configuration and error types for the airwave pipelines.

pub mod config;
pub mod error;

pub use config::{Config, GraphConfig, LlmConfig, OutputConfig, SpeechConfig, SpeechProvider};
pub use error::{Error, Result};
