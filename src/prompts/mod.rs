//! Prompt construction for the three conversation phases

mod builder;
pub mod embedded;

pub use builder::PromptBuilder;

/// Core of the fixed phrase the model emits when it has enough information
///
/// The full instructed line is "Thanks! I am ready to generate your staying
/// experience!"; matching on the core phrase tolerates the model paraphrasing
/// the punctuation around it.
pub const READY_SENTINEL: &str = "I am ready to generate your staying experience";

/// Check whether a model reply signals readiness to generate the itinerary
pub fn contains_ready_sentinel(text: &str) -> bool {
    text.to_lowercase().contains(&READY_SENTINEL.to_lowercase())
}
