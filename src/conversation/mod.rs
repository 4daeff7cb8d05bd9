//! Conversation orchestration
//!
//! The state machine that owns an in-progress dialogue, plus the result
//! types and strict parsing of the model's final JSON output.

mod error;
mod result;
mod session;

pub use error::ConversationError;
pub use result::{Activity, ActivityKind, DayItinerary, SimulationResult, parse_simulation_result, strip_code_fence};
pub use session::{AnswerSet, ConversationStep, MAX_FOLLOW_UPS, Phase, SimulationSession, Turn};
