//! LLM request/response types for StayVision
//!
//! These types model the OpenAI Chat Completions API but stay provider-agnostic
//! enough to back the scripted offline client as well.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A completion request - everything needed for one LLM call
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// System prompt (rendered from a Handlebars template)
    pub system_prompt: String,

    /// Conversation history (user/assistant turns)
    pub messages: Vec<Message>,

    /// Max tokens for the response (from config)
    pub max_tokens: u32,

    /// Optional structured-output constraint (final itinerary call)
    pub response_format: Option<ResponseFormat>,
}

impl CompletionRequest {
    /// Create a plain text request with no history
    pub fn new(system_prompt: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            messages: Vec::new(),
            max_tokens,
            response_format: None,
        }
    }

    /// Constrain the response to a JSON object
    pub fn json_object(mut self) -> Self {
        debug!("CompletionRequest::json_object: called");
        self.response_format = Some(ResponseFormat::JsonObject);
        self
    }
}

/// Structured output constraint passed to the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    /// The provider must return a single valid JSON object
    JsonObject,
}

/// A message in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Create a user message
    pub fn user(text: impl Into<String>) -> Self {
        debug!("Message::user: called");
        Self {
            role: Role::User,
            content: text.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(text: impl Into<String>) -> Self {
        debug!("Message::assistant: called");
        Self {
            role: Role::Assistant,
            content: text.into(),
        }
    }
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Response from a completion request
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Assistant text (if any)
    pub content: Option<String>,

    /// Why the model stopped
    pub stop_reason: StopReason,

    /// Token usage for cost tracking
    pub usage: TokenUsage,
}

impl CompletionResponse {
    /// Build a plain text response (scripted client, tests)
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            stop_reason: StopReason::EndTurn,
            usage: TokenUsage::default(),
        }
    }

    /// The assistant text, or an error if the model returned nothing
    pub fn require_content(self) -> Result<String, super::LlmError> {
        debug!("CompletionResponse::require_content: called");
        self.content
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| super::LlmError::InvalidResponse("Model returned empty content".to_string()))
    }
}

/// Why the model stopped generating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    EndTurn,
    MaxTokens,
}

impl StopReason {
    /// Parse from an OpenAI finish_reason string
    pub fn from_finish_reason(s: &str) -> Self {
        debug!(%s, "StopReason::from_finish_reason: called");
        match s {
            "length" => {
                debug!("StopReason::from_finish_reason: MaxTokens");
                StopReason::MaxTokens
            }
            _ => {
                debug!("StopReason::from_finish_reason: EndTurn");
                StopReason::EndTurn
            }
        }
    }
}

/// Token usage for cost tracking
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}
