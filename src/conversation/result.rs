//! Simulation result types and final-output parsing
//!
//! The model is instructed to return a bare JSON object, but replies wrapped
//! in a fenced code block are tolerated. Validation is strict: a result
//! missing any of the three required sequences is rejected outright, never
//! backfilled from a template.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ConversationError;

/// The generated 3-day itinerary plus tips and highlights
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub itinerary: Vec<DayItinerary>,
    pub personalized_tips: Vec<String>,
    pub highlights: Vec<String>,
}

/// One day of the itinerary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayItinerary {
    pub day: u32,
    pub title: String,
    pub activities: Vec<Activity>,
}

/// A single timed activity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub time: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
}

/// Fixed activity category vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Arrival,
    Meal,
    Activity,
    Rest,
    Departure,
}

/// Strip a Markdown code fence from a model reply, if present
///
/// Handles an optional info string ("```json") and surrounding whitespace.
/// Text without a fence passes through trimmed.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string up to the first newline
    let Some(newline) = rest.find('\n') else {
        return trimmed;
    };
    let body = rest[newline + 1..].trim_end();
    let body = body.strip_suffix("```").unwrap_or(body);
    body.trim()
}

/// Parse and validate the final model output into a SimulationResult
///
/// The three top-level fields must all be present and be sequences before
/// the typed deserialization runs, so that the error names the field that
/// was missing rather than whatever serde trips over first.
pub fn parse_simulation_result(text: &str) -> Result<SimulationResult, ConversationError> {
    debug!(text_len = text.len(), "parse_simulation_result: called");
    let body = strip_code_fence(text);

    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| ConversationError::MalformedOutput(format!("not valid JSON: {}", e)))?;

    let object = value
        .as_object()
        .ok_or_else(|| ConversationError::MalformedOutput("top level is not a JSON object".to_string()))?;

    for field in ["itinerary", "personalizedTips", "highlights"] {
        match object.get(field) {
            Some(v) if v.is_array() => {
                debug!(%field, "parse_simulation_result: field present");
            }
            Some(_) => {
                debug!(%field, "parse_simulation_result: field is not a sequence");
                return Err(ConversationError::MalformedOutput(format!(
                    "field '{}' is not a sequence",
                    field
                )));
            }
            None => {
                debug!(%field, "parse_simulation_result: field missing");
                return Err(ConversationError::MalformedOutput(format!(
                    "missing required field '{}'",
                    field
                )));
            }
        }
    }

    serde_json::from_value(value).map_err(|e| ConversationError::MalformedOutput(format!("invalid shape: {}", e)))
}
