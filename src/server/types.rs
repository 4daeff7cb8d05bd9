//! Wire types for the HTTP API
//!
//! Field names follow the frontend's camelCase convention. The conversation
//! endpoint is stateless: the client sends the whole history on every call
//! and gets it back extended by one turn.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::Property;
use crate::conversation::SimulationResult;
use crate::llm::{Message, Role};

use super::feedback::FeedbackTag;

/// Role of a message on the wire
///
/// Unlike [`Role`], the wire vocabulary includes `system` because the client
/// replays the seeded system prompt on every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireRole {
    System,
    User,
    Assistant,
}

/// One message of the replayed conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireMessage {
    pub role: WireRole,
    pub content: String,
}

impl WireMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: WireRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: WireRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: WireRole::Assistant,
            content: content.into(),
        }
    }

    /// Convert to an LLM message, dropping system messages
    ///
    /// System content travels separately in the completion request.
    pub fn to_llm_message(&self) -> Option<Message> {
        match self.role {
            WireRole::System => None,
            WireRole::User => Some(Message {
                role: Role::User,
                content: self.content.clone(),
            }),
            WireRole::Assistant => Some(Message {
                role: Role::Assistant,
                content: self.content.clone(),
            }),
        }
    }
}

/// Request body for POST /api/getResponseFromLLM
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationRequest {
    pub property_id: String,

    /// Conversation so far, as returned by the previous call
    #[serde(default)]
    pub messages: Vec<WireMessage>,

    /// The guest's newest message, if any
    #[serde(default)]
    pub user_message: Option<String>,

    /// Optional system prompt override for the whole conversation
    #[serde(default)]
    pub system_prompt: Option<String>,
}

/// Response body for POST /api/getResponseFromLLM
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationResponse {
    pub success: bool,

    pub property: Property,

    /// Full history including the new assistant turn
    pub messages: Vec<WireMessage>,

    /// True once the itinerary has been generated
    pub completed: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<SimulationResult>,
}

/// Request body for POST /api/feedback
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    pub property_id: String,

    /// 1-10 satisfaction rating
    pub rating: u8,

    /// Binary tag, absent when the guest skipped it
    #[serde(default)]
    pub feedback: Option<FeedbackTag>,

    /// Answers the guest gave during the simulation, keyed by step id
    #[serde(default)]
    pub answers: BTreeMap<String, String>,
}

/// Response body for POST /api/feedback
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackResponse {
    pub success: bool,
}

/// Response body for GET /api/health
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// Error body for all failed API calls
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversation_request_defaults() {
        let req: ConversationRequest = serde_json::from_str(r#"{"propertyId": "wildhouse-farm"}"#).unwrap();
        assert_eq!(req.property_id, "wildhouse-farm");
        assert!(req.messages.is_empty());
        assert!(req.user_message.is_none());
        assert!(req.system_prompt.is_none());
    }

    #[test]
    fn test_wire_role_round_trip() {
        let msg: WireMessage = serde_json::from_str(r#"{"role": "system", "content": "be brief"}"#).unwrap();
        assert_eq!(msg.role, WireRole::System);
        assert!(msg.to_llm_message().is_none());

        let msg: WireMessage = serde_json::from_str(r#"{"role": "user", "content": "hi"}"#).unwrap();
        assert_eq!(msg.to_llm_message().unwrap().role, Role::User);
    }

    #[test]
    fn test_feedback_request_tag_parsing() {
        let req: FeedbackRequest =
            serde_json::from_str(r#"{"propertyId": "coastal-retreat", "rating": 9, "feedback": "positive"}"#).unwrap();
        assert_eq!(req.rating, 9);
        assert_eq!(req.feedback, Some(FeedbackTag::Positive));

        let req: FeedbackRequest =
            serde_json::from_str(r#"{"propertyId": "coastal-retreat", "rating": 4, "feedback": null}"#).unwrap();
        assert!(req.feedback.is_none());
    }
}
