//! LLM client module for StayVision
//!
//! Provides the completion trait, the OpenAI implementation, and the
//! scripted offline fallback.

use std::sync::Arc;

use tracing::debug;

pub mod client;
mod error;
mod openai;
mod scripted;
mod types;

pub use client::LlmClient;
pub use error::LlmError;
pub use openai::OpenAiClient;
pub use scripted::ScriptedClient;
pub use types::{CompletionRequest, CompletionResponse, Message, ResponseFormat, Role, StopReason, TokenUsage};

use crate::config::LlmConfig;

/// Create an LLM client based on the provider specified in config
///
/// Supports "openai" (the real API) and "scripted" (offline fallback).
pub fn create_client(config: &LlmConfig) -> Result<Arc<dyn LlmClient>, LlmError> {
    debug!(provider = %config.provider, model = %config.model, "create_client: called");
    match config.provider.as_str() {
        "openai" => {
            debug!("create_client: creating OpenAI client");
            Ok(Arc::new(OpenAiClient::from_config(config)?))
        }
        "scripted" => {
            debug!("create_client: creating scripted offline client");
            Ok(Arc::new(ScriptedClient::new()))
        }
        other => {
            debug!(provider = %other, "create_client: unknown provider");
            Err(LlmError::InvalidResponse(format!(
                "Unknown LLM provider: '{}'. Supported: openai, scripted",
                other
            )))
        }
    }
}
