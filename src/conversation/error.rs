//! Conversation error types

use thiserror::Error;

use crate::llm::LlmError;

/// Errors surfaced by the conversation orchestrator
///
/// All of these end the in-flight step, none are fatal to the process: the
/// session parks in the Errored phase and the user can retry or restart.
#[derive(Debug, Error)]
pub enum ConversationError {
    #[error("Model call failed: {0}")]
    Upstream(#[from] LlmError),

    #[error("Malformed model output: {0}")]
    MalformedOutput(String),

    #[error("Prompt rendering failed: {0}")]
    Prompt(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl ConversationError {
    /// Whether a user-initiated retry of the same call could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            ConversationError::Upstream(e) => e.is_retryable(),
            ConversationError::MalformedOutput(_) => true,
            ConversationError::Prompt(_) => false,
            ConversationError::InvalidState(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryability() {
        assert!(ConversationError::MalformedOutput("bad json".to_string()).is_retryable());
        assert!(!ConversationError::InvalidState("already completed".to_string()).is_retryable());
        assert!(
            ConversationError::Upstream(LlmError::ApiError {
                status: 503,
                message: "unavailable".to_string()
            })
            .is_retryable()
        );
    }
}
