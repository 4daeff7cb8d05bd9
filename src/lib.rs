//! StayVision - conversational "try before you book" stay simulation
//!
//! StayVision lets a prospective guest preview a rental property through a
//! short guided dialogue: an LLM asks a handful of questions about the trip,
//! then generates a personalized 3-day itinerary for that property. The same
//! engine backs an interactive terminal simulator and a small HTTP API that
//! a web frontend drives statelessly.
//!
//! # Core Concepts
//!
//! - **Guided dialogue**: one broad opening question, at most three follow-ups
//! - **The cap is authoritative**: the model signals readiness, but the
//!   follow-up cap forces finalization regardless
//! - **Strict output**: the final itinerary must parse and validate, it is
//!   never backfilled from a template
//!
//! # Modules
//!
//! - [`catalog`] - Static property catalog
//! - [`prompts`] - Embedded Handlebars prompt templates
//! - [`conversation`] - Session state machine and result parsing
//! - [`llm`] - LLM client trait, OpenAI and scripted implementations
//! - [`server`] - HTTP API (health, feedback, conversation)
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod catalog;
pub mod cli;
pub mod config;
pub mod conversation;
pub mod llm;
pub mod prompts;
pub mod render;
pub mod server;

// Re-export commonly used types
pub use catalog::{Catalog, Property, Review};
pub use config::{Config, LlmConfig, ServerConfig};
pub use conversation::{
    ConversationError, ConversationStep, MAX_FOLLOW_UPS, Phase, SimulationResult, SimulationSession, Turn,
    parse_simulation_result,
};
pub use llm::{CompletionRequest, CompletionResponse, LlmClient, LlmError, OpenAiClient, ScriptedClient, create_client};
pub use prompts::{PromptBuilder, READY_SENTINEL, contains_ready_sentinel};
pub use server::{AppState, FeedbackSink, LogSink, router, serve};
