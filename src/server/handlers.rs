//! HTTP request handlers

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{debug, info, warn};

use crate::conversation::{ConversationError, parse_simulation_result};
use crate::llm::{CompletionRequest, LlmError, Message};

use super::AppState;
use super::feedback::FeedbackRecord;
use super::types::{
    ConversationRequest, ConversationResponse, ErrorBody, FeedbackRequest, FeedbackResponse, HealthResponse,
    WireMessage, WireRole,
};

/// A guest message count at which the itinerary is generated unconditionally
const FINALIZE_AT_MESSAGES: usize = 4;

/// Minimum guest messages before a termination phrase triggers generation
const FINALIZE_WITH_KEYWORD_AT: usize = 3;

/// Phrases that signal the guest is done answering
const TERMINATION_KEYWORDS: &[&str] = &["thank", "that's all", "sounds good"];

/// Errors returned to API clients as JSON bodies
#[derive(Debug)]
pub enum ApiError {
    /// Unknown property id - 404
    NotFound(&'static str),
    /// Upstream model call failed or produced unusable output - 502
    Upstream(String),
    /// Server-side failure unrelated to the model - 500
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.to_string()),
            ApiError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        warn!(%status, %message, "API error response");
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<LlmError> for ApiError {
    fn from(e: LlmError) -> Self {
        ApiError::Upstream(format!("Model call failed: {}", e))
    }
}

impl From<ConversationError> for ApiError {
    fn from(e: ConversationError) -> Self {
        match e {
            ConversationError::Upstream(inner) => inner.into(),
            ConversationError::MalformedOutput(msg) => ApiError::Upstream(format!("Malformed model output: {}", msg)),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<eyre::Report> for ApiError {
    fn from(e: eyre::Report) -> Self {
        ApiError::Internal(e.to_string())
    }
}

/// GET /api/health
pub async fn health() -> Json<HealthResponse> {
    debug!("health: called");
    Json(HealthResponse {
        status: "ok",
        message: "StayVision API is running",
    })
}

/// POST /api/feedback
///
/// Always succeeds from the client's point of view; the sink decides what
/// to do with the record. Out-of-range ratings are clamped to 1-10.
pub async fn feedback(State(state): State<AppState>, Json(req): Json<FeedbackRequest>) -> Json<FeedbackResponse> {
    debug!(property_id = %req.property_id, rating = req.rating, "feedback: called");

    let rating = req.rating.clamp(1, 10);
    if rating != req.rating {
        warn!(submitted = req.rating, clamped = rating, "feedback: rating out of range");
    }

    state
        .feedback
        .record(FeedbackRecord {
            property_id: req.property_id,
            rating,
            tag: req.feedback,
            answers: req.answers.into_iter().collect(),
        })
        .await;

    Json(FeedbackResponse { success: true })
}

/// POST /api/getResponseFromLLM
///
/// Stateless conversation driver. The client replays the full history on
/// every call; the server decides whether to open the conversation, ask the
/// model for the next turn, or generate the final itinerary.
pub async fn conversation(
    State(state): State<AppState>,
    Json(req): Json<ConversationRequest>,
) -> Result<Json<ConversationResponse>, ApiError> {
    debug!(
        property_id = %req.property_id,
        history_len = req.messages.len(),
        has_user_message = req.user_message.is_some(),
        "conversation: called"
    );

    let property = state
        .catalog
        .lookup(&req.property_id)
        .ok_or(ApiError::NotFound("Property not found"))?
        .clone();

    let is_new = req.messages.is_empty();
    let mut history = req.messages;
    if let Some(text) = &req.user_message {
        history.push(WireMessage::user(text));
    }

    // System content for conversation turns: the explicit override wins,
    // then whatever system message the client replayed (a persona seeded on
    // the first call persists across turns), then the default.
    let system_prompt = match &req.system_prompt {
        Some(custom) => custom.clone(),
        None => match history.iter().find(|m| m.role == WireRole::System) {
            Some(seeded) => seeded.content.clone(),
            None => state.prompts.conversation_system(&property)?,
        },
    };

    if is_new {
        history.insert(0, WireMessage::system(system_prompt.clone()));

        // Opening a conversation with no guest message yet: answer with a
        // welcome instead of consulting the history-driven policy below.
        if req.user_message.is_none() {
            let welcome = if req.system_prompt.is_some() {
                // A custom persona gets a model-generated opener
                let request = CompletionRequest::new(system_prompt, state.max_tokens);
                state.llm.complete(request).await?.require_content()?
            } else {
                state.prompts.welcome(&property)?
            };
            history.push(WireMessage::assistant(welcome));
            info!(property_id = %property.id, "conversation: opened");
            return Ok(Json(ConversationResponse {
                success: true,
                property,
                messages: history,
                completed: false,
                results: None,
            }));
        }
    }

    if should_generate_itinerary(&history) {
        let itinerary_system = match &req.system_prompt {
            Some(custom) => custom.clone(),
            None => state.prompts.itinerary_system(&property)?,
        };

        let mut messages = llm_history(&history);
        messages.push(Message::user(
            "Based on our conversation, please generate my personalized 3-day itinerary \
             in the JSON format specified.",
        ));

        let request = CompletionRequest {
            system_prompt: itinerary_system,
            messages,
            max_tokens: state.max_tokens,
            response_format: None,
        }
        .json_object();

        let text = state.llm.complete(request).await?.require_content()?;
        let results = parse_simulation_result(&text).map_err(ApiError::from)?;

        info!(property_id = %property.id, days = results.itinerary.len(), "conversation: itinerary generated");
        return Ok(Json(ConversationResponse {
            success: true,
            property,
            messages: history,
            completed: true,
            results: Some(results),
        }));
    }

    // Ordinary turn: ask the model for its next question
    let request = CompletionRequest {
        system_prompt,
        messages: llm_history(&history),
        max_tokens: state.max_tokens,
        response_format: None,
    };
    let reply = state.llm.complete(request).await?.require_content()?;
    history.push(WireMessage::assistant(reply));

    Ok(Json(ConversationResponse {
        success: true,
        property,
        messages: history,
        completed: false,
        results: None,
    }))
}

/// History as LLM messages, with system turns dropped
fn llm_history(history: &[WireMessage]) -> Vec<Message> {
    history.iter().filter_map(WireMessage::to_llm_message).collect()
}

/// Whether the conversation has gathered enough to generate the itinerary
///
/// Unconditional after four guest messages; after three if any message
/// contains a termination phrase.
fn should_generate_itinerary(history: &[WireMessage]) -> bool {
    let user_count = history.iter().filter(|m| m.role == WireRole::User).count();
    if user_count >= FINALIZE_AT_MESSAGES {
        debug!(user_count, "should_generate_itinerary: message cap reached");
        return true;
    }
    if user_count >= FINALIZE_WITH_KEYWORD_AT {
        let terminated = history.iter().any(|m| {
            let lowered = m.content.to_lowercase();
            TERMINATION_KEYWORDS.iter().any(|k| lowered.contains(k))
        });
        if terminated {
            debug!(user_count, "should_generate_itinerary: termination phrase found");
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turns(user_texts: &[&str]) -> Vec<WireMessage> {
        let mut history = vec![WireMessage::system("sys")];
        for text in user_texts {
            history.push(WireMessage::user(*text));
            history.push(WireMessage::assistant("and what else?"));
        }
        history
    }

    #[test]
    fn test_generation_waits_for_enough_answers() {
        assert!(!should_generate_itinerary(&turns(&["a couple"])));
        assert!(!should_generate_itinerary(&turns(&["a couple", "hiking"])));
        assert!(!should_generate_itinerary(&turns(&["a couple", "hiking", "no pets"])));
        assert!(should_generate_itinerary(&turns(&[
            "a couple", "hiking", "no pets", "seafood"
        ])));
    }

    #[test]
    fn test_termination_phrase_shortens_conversation() {
        assert!(should_generate_itinerary(&turns(&[
            "a couple",
            "hiking",
            "that's all, thanks!"
        ])));
        // Below the keyword threshold even with the phrase
        assert!(!should_generate_itinerary(&turns(&["a couple", "sounds good"])));
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        assert!(should_generate_itinerary(&turns(&["a couple", "hiking", "THANK you"])));
    }
}
