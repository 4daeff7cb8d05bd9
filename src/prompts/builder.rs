//! Prompt builder
//!
//! Renders the embedded templates with typed contexts. Pure and
//! deterministic: the same property and answers always produce the same
//! prompt text.

use eyre::{Result, eyre};
use handlebars::Handlebars;
use serde::Serialize;
use tracing::debug;

use super::embedded;
use crate::catalog::Property;

/// Context for the introduction prompt
#[derive(Debug, Serialize)]
struct IntroContext {
    property_json: String,
}

/// Context for the follow-up prompt
#[derive(Debug, Serialize)]
struct FollowUpContext {
    property_json: String,
    initial_answer: String,
    questions_json: String,
    answers_json: String,
    follow_ups_asked: u32,
    max_follow_ups: u32,
}

/// Context for the final-itinerary prompt
#[derive(Debug, Serialize)]
struct FinalContext {
    property_json: String,
    answers_json: String,
}

/// Context for the endpoint system prompts and welcome text
#[derive(Debug, Serialize)]
struct PropertyContext {
    name: String,
    location: String,
    sleeps: u32,
    bedrooms: u32,
    bathrooms: u32,
    dogs_allowed: u32,
    features: String,
    nearby_attractions: String,
}

impl PropertyContext {
    fn from_property(property: &Property) -> Self {
        Self {
            name: property.name.clone(),
            location: property.location.clone(),
            sleeps: property.sleeps,
            bedrooms: property.bedrooms,
            bathrooms: property.bathrooms,
            dogs_allowed: property.dogs_allowed,
            features: property.features.join(", "),
            nearby_attractions: property.nearby_attractions.join(", "),
        }
    }
}

/// Renders conversation prompts from the embedded templates
pub struct PromptBuilder {
    hbs: Handlebars<'static>,
}

impl PromptBuilder {
    pub fn new() -> Self {
        debug!("PromptBuilder::new: called");
        Self { hbs: Handlebars::new() }
    }

    fn render<C: Serialize>(&self, name: &str, context: &C) -> Result<String> {
        debug!(%name, "PromptBuilder::render: called");
        let template = embedded::get_embedded(name).ok_or_else(|| eyre!("Prompt template not found: {}", name))?;
        self.hbs
            .render_template(template, context)
            .map_err(|e| eyre!("Failed to render template {}: {}", name, e))
    }

    fn property_json(property: &Property) -> Result<String> {
        serde_json::to_string_pretty(property).map_err(|e| eyre!("Failed to serialize property: {}", e))
    }

    /// Introduction prompt - greets by property, consults no answers
    pub fn introduction(&self, property: &Property) -> Result<String> {
        debug!(property_id = %property.id, "PromptBuilder::introduction: called");
        let context = IntroContext {
            property_json: Self::property_json(property)?,
        };
        self.render("introduction", &context)
    }

    /// Follow-up prompt - ask one more question or emit the ready sentinel
    ///
    /// `questions` are the follow-up questions asked so far, `later_answers`
    /// the answers after the initial broad one.
    pub fn follow_up(
        &self,
        property: &Property,
        initial_answer: &str,
        questions: &[String],
        later_answers: &[String],
        follow_ups_asked: u32,
        max_follow_ups: u32,
    ) -> Result<String> {
        debug!(
            property_id = %property.id,
            follow_ups_asked,
            max_follow_ups,
            "PromptBuilder::follow_up: called"
        );
        let context = FollowUpContext {
            property_json: Self::property_json(property)?,
            initial_answer: initial_answer.to_string(),
            questions_json: serde_json::to_string_pretty(questions)?,
            answers_json: serde_json::to_string_pretty(later_answers)?,
            follow_ups_asked,
            max_follow_ups,
        };
        self.render("follow-up", &context)
    }

    /// Final-itinerary prompt over the full ordered answer set
    pub fn final_itinerary(&self, property: &Property, answers: &[(String, String)]) -> Result<String> {
        debug!(property_id = %property.id, answer_count = answers.len(), "PromptBuilder::final_itinerary: called");
        let mut map = serde_json::Map::new();
        for (step_id, answer) in answers {
            map.insert(step_id.clone(), serde_json::Value::String(answer.clone()));
        }
        let context = FinalContext {
            property_json: Self::property_json(property)?,
            answers_json: serde_json::to_string_pretty(&serde_json::Value::Object(map))?,
        };
        self.render("final-itinerary", &context)
    }

    /// Default system prompt for the stateless conversation endpoint
    pub fn conversation_system(&self, property: &Property) -> Result<String> {
        debug!(property_id = %property.id, "PromptBuilder::conversation_system: called");
        self.render("conversation-system", &PropertyContext::from_property(property))
    }

    /// Default system prompt for endpoint itinerary generation
    pub fn itinerary_system(&self, property: &Property) -> Result<String> {
        debug!(property_id = %property.id, "PromptBuilder::itinerary_system: called");
        self.render("itinerary-system", &PropertyContext::from_property(property))
    }

    /// Default welcome message when no custom system prompt is supplied
    pub fn welcome(&self, property: &Property) -> Result<String> {
        debug!(property_id = %property.id, "PromptBuilder::welcome: called");
        self.render("welcome", &PropertyContext::from_property(property))
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}
