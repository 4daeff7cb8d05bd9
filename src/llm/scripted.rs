//! Scripted offline client
//!
//! A deterministic fallback behind the LlmClient trait for demos and local
//! development without an API key. Keyword heuristics on the guest's answers
//! ("dog", "hiking", "dining") shape the canned questions and itinerary. The
//! orchestrator never sees the difference between this and a real provider.

use async_trait::async_trait;
use tracing::debug;

use super::{CompletionRequest, CompletionResponse, LlmClient, LlmError, ResponseFormat, Role};
use crate::prompts::READY_SENTINEL;

/// Canned follow-up questions, asked in order
const FOLLOW_UP_QUESTIONS: [&str; 2] = [
    "What kind of activities do you enjoy on holiday? (e.g. hiking, local dining, relaxing by the fire)",
    "Any special requests or must-haves for your stay? (e.g. pet-friendly spots, secure bike storage)",
];

/// Offline keyword-heuristic client
pub struct ScriptedClient;

impl ScriptedClient {
    pub fn new() -> Self {
        debug!("ScriptedClient::new: called");
        Self
    }

    /// All guest text so far, lowercased for keyword checks
    fn guest_text(request: &CompletionRequest) -> String {
        request
            .messages
            .iter()
            .filter(|m| m.role == Role::User)
            .map(|m| m.content.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn next_turn(request: &CompletionRequest) -> String {
        let user_turns = request.messages.iter().filter(|m| m.role == Role::User).count();
        debug!(user_turns, "ScriptedClient::next_turn: called");

        if request.messages.is_empty() {
            debug!("ScriptedClient::next_turn: greeting");
            return "Welcome! I'm StayVision, your stay-preview concierge. This property is a lovely base \
                    with standout features the owners are proud of. Could you tell me a bit about your \
                    vacation preferences?"
                .to_string();
        }

        match user_turns {
            0 | 1 => FOLLOW_UP_QUESTIONS[0].to_string(),
            2 => FOLLOW_UP_QUESTIONS[1].to_string(),
            _ => {
                debug!("ScriptedClient::next_turn: enough answers, emitting ready sentinel");
                format!("Thanks! {READY_SENTINEL}!")
            }
        }
    }

    fn canned_itinerary(request: &CompletionRequest) -> String {
        let text = Self::guest_text(request);
        let dogs = text.contains("dog");
        let hiking = text.contains("hik") || text.contains("walk");
        let dining = text.contains("dining") || text.contains("food") || text.contains("bbq");
        debug!(dogs, hiking, dining, "ScriptedClient::canned_itinerary: keyword flags");

        let day2_morning = if hiking {
            "Lace up for a morning hike on the nearest waymarked trail"
        } else {
            "Take a gentle stroll around the grounds and nearby lanes"
        };
        let day2_walk_companion = if dogs {
            "Bring the dog along - the route is lead-friendly the whole way"
        } else {
            "Pick up picnic supplies from the village shop on the way"
        };
        let day1_dinner = if dining {
            "Dinner out - let the local chefs take care of the first night"
        } else {
            "Settle in with a home-cooked supper in the farmhouse kitchen"
        };

        let mut tips = vec![
            "Book popular local restaurants a day or two ahead in high season".to_string(),
            "Pack layers - evenings can turn cool even in summer".to_string(),
            "Arrive before dusk so you can find the property entrance easily".to_string(),
            "Keep a torch handy for the garden after dark".to_string(),
        ];
        if dogs {
            tips.push("Local cafes are largely dog-friendly - water bowls are common".to_string());
        }
        if hiking {
            tips.push("Waterproof boots earn their keep on the fells year-round".to_string());
        }
        tips.truncate(6);

        let mut highlights = vec![
            "Waking up to the view on your first morning".to_string(),
            "An unhurried evening with no schedule at all".to_string(),
            "The last-night meal that already feels like a tradition".to_string(),
        ];
        if hiking {
            highlights.push("Reaching the viewpoint and having it all to yourselves".to_string());
        }
        highlights.truncate(5);

        serde_json::json!({
            "itinerary": [
                {
                    "day": 1,
                    "title": "Arrival and Settling In",
                    "activities": [
                        { "time": "15:00", "description": "Check in and explore the property", "type": "arrival" },
                        { "time": "16:00", "description": "Unpack and unwind with a welcome cup of tea", "type": "rest" },
                        { "time": "17:30", "description": "Short walk to get your bearings", "type": "activity" },
                        { "time": "19:00", "description": day1_dinner, "type": "meal" },
                        { "time": "21:00", "description": "Quiet evening in the lounge", "type": "rest" }
                    ]
                },
                {
                    "day": 2,
                    "title": "Out and About",
                    "activities": [
                        { "time": "08:30", "description": "Leisurely breakfast", "type": "meal" },
                        { "time": "10:00", "description": day2_morning, "type": "activity" },
                        { "time": "12:30", "description": day2_walk_companion, "type": "activity" },
                        { "time": "13:30", "description": "Lunch at a nearby pub", "type": "meal" },
                        { "time": "15:30", "description": "Afternoon visit to a local attraction", "type": "activity" },
                        { "time": "19:00", "description": "BBQ or supper back at the property", "type": "meal" }
                    ]
                },
                {
                    "day": 3,
                    "title": "One Last Morning",
                    "activities": [
                        { "time": "08:30", "description": "Breakfast with the best view in the house", "type": "meal" },
                        { "time": "09:30", "description": "Final stroll or a lazy hour with a book", "type": "activity" },
                        { "time": "10:30", "description": "Pack up and tidy the last bits away", "type": "rest" },
                        { "time": "11:00", "description": "Check out and hit the road", "type": "departure" },
                        { "time": "12:00", "description": "Stop for lunch on the journey home", "type": "meal" }
                    ]
                }
            ],
            "personalizedTips": tips,
            "highlights": highlights,
        })
        .to_string()
    }
}

impl Default for ScriptedClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LlmClient for ScriptedClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        debug!(
            message_count = request.messages.len(),
            json = matches!(request.response_format, Some(ResponseFormat::JsonObject)),
            "ScriptedClient::complete: called"
        );
        let content = match request.response_format {
            Some(ResponseFormat::JsonObject) => Self::canned_itinerary(&request),
            None => Self::next_turn(&request),
        };
        Ok(CompletionResponse::text(content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Message;

    #[tokio::test]
    async fn test_scripted_greeting_on_empty_conversation() {
        let client = ScriptedClient::new();
        let resp = client.complete(CompletionRequest::new("intro", 500)).await.unwrap();
        let text = resp.content.unwrap();
        assert!(text.contains("vacation preferences"));
    }

    #[tokio::test]
    async fn test_scripted_emits_sentinel_after_three_answers() {
        let client = ScriptedClient::new();
        let mut req = CompletionRequest::new("follow-up", 500);
        req.messages = vec![
            Message::user("family of four"),
            Message::assistant(FOLLOW_UP_QUESTIONS[0]),
            Message::user("hiking and BBQs"),
            Message::assistant(FOLLOW_UP_QUESTIONS[1]),
            Message::user("no pets"),
        ];
        let resp = client.complete(req).await.unwrap();
        assert!(resp.content.unwrap().contains(READY_SENTINEL));
    }

    #[tokio::test]
    async fn test_scripted_itinerary_is_valid_json_with_keyword_branching() {
        let client = ScriptedClient::new();
        let mut req = CompletionRequest::new("final", 4000).json_object();
        req.messages = vec![Message::user("two of us and our dog, we love hiking")];

        let resp = client.complete(req).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&resp.content.unwrap()).unwrap();

        assert_eq!(value["itinerary"].as_array().unwrap().len(), 3);
        assert!(value["personalizedTips"].as_array().unwrap().len() >= 4);
        assert!(value["highlights"].as_array().unwrap().len() >= 3);

        let tips = value["personalizedTips"].to_string();
        assert!(tips.contains("dog-friendly"));
    }
}
