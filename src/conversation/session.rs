//! Conversation orchestrator
//!
//! Owns one in-progress "Simulate Your Stay" dialogue: the steps asked, the
//! answers given, and the decision to keep questioning or finalize. At most
//! one model call is in flight at a time; a failed call parks the session in
//! the Errored phase with the pending call kept for a user-initiated retry.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use super::{ConversationError, SimulationResult, parse_simulation_result};
use crate::catalog::Property;
use crate::llm::{CompletionRequest, LlmClient, Message};
use crate::prompts::{PromptBuilder, contains_ready_sentinel};

/// Maximum number of follow-up questions before forced finalization
///
/// Authoritative over the model's own judgment: once the cap is reached the
/// session finalizes without asking the model for another question. The very
/// first question is never counted as a follow-up.
pub const MAX_FOLLOW_UPS: u32 = 3;

/// Session lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    AwaitingAnswer,
    Finalizing,
    Completed,
    Errored,
}

/// One question-answer exchange in the guided dialogue
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationStep {
    /// Phase tag: "initial" or "follow-up-N"
    pub id: String,
    pub question: String,
    pub answer: String,
    pub completed: bool,
}

/// Ordered step-id to answer mapping; insertion order is question order
#[derive(Debug, Clone, Default)]
pub struct AnswerSet {
    entries: Vec<(String, String)>,
}

impl AnswerSet {
    /// Record an answer for a step (steps answer at most once)
    pub fn insert(&mut self, step_id: impl Into<String>, answer: impl Into<String>) {
        let step_id = step_id.into();
        debug!(%step_id, "AnswerSet::insert: called");
        self.entries.push((step_id, answer.into()));
    }

    pub fn get(&self, step_id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(id, _)| id == step_id)
            .map(|(_, a)| a.as_str())
    }

    /// The initial broad answer, if given
    pub fn first(&self) -> Option<&str> {
        self.entries.first().map(|(_, a)| a.as_str())
    }

    /// Answers after the initial broad one, in question order
    pub fn later(&self) -> Vec<String> {
        self.entries.iter().skip(1).map(|(_, a)| a.clone()).collect()
    }

    pub fn as_pairs(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// The model call a session is about to make (or re-make after an error)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingCall {
    Intro,
    FollowUp,
    Finalize,
}

/// Outcome of a successful session operation
#[derive(Debug, Clone)]
pub enum Turn {
    /// The next question to put to the guest
    Question(ConversationStep),
    /// The dialogue is over; here is the simulation
    Completed(SimulationResult),
}

/// One guest's in-progress stay simulation
pub struct SimulationSession {
    property: Property,
    llm: Arc<dyn LlmClient>,
    prompts: PromptBuilder,
    max_tokens: u32,
    phase: Phase,
    steps: Vec<ConversationStep>,
    answers: AnswerSet,
    follow_ups_asked: u32,
    result: Option<SimulationResult>,
    pending: Option<PendingCall>,
}

impl SimulationSession {
    pub fn new(property: Property, llm: Arc<dyn LlmClient>, max_tokens: u32) -> Self {
        debug!(property_id = %property.id, max_tokens, "SimulationSession::new: called");
        Self {
            property,
            llm,
            prompts: PromptBuilder::new(),
            max_tokens,
            phase: Phase::NotStarted,
            steps: Vec::new(),
            answers: AnswerSet::default(),
            follow_ups_asked: 0,
            result: None,
            pending: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn property(&self) -> &Property {
        &self.property
    }

    pub fn steps(&self) -> &[ConversationStep] {
        &self.steps
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn follow_ups_asked(&self) -> u32 {
        self.follow_ups_asked
    }

    pub fn result(&self) -> Option<&SimulationResult> {
        self.result.as_ref()
    }

    /// The unanswered question the guest is looking at, if any
    pub fn current_question(&self) -> Option<&ConversationStep> {
        self.steps.last().filter(|s| !s.completed)
    }

    /// NotStarted -> AwaitingAnswer: fetch the opening question
    pub async fn start(&mut self) -> Result<Turn, ConversationError> {
        debug!(property_id = %self.property.id, "SimulationSession::start: called");
        if self.phase != Phase::NotStarted {
            return Err(ConversationError::InvalidState(format!(
                "start called in phase {:?}",
                self.phase
            )));
        }
        self.pending = Some(PendingCall::Intro);
        self.run_pending().await
    }

    /// Record the guest's answer and advance the dialogue
    ///
    /// Either produces the next follow-up question or, once the model emits
    /// the ready sentinel or the follow-up cap is reached, the finished
    /// simulation.
    pub async fn submit_answer(&mut self, answer: &str) -> Result<Turn, ConversationError> {
        debug!(
            phase = ?self.phase,
            follow_ups_asked = self.follow_ups_asked,
            "SimulationSession::submit_answer: called"
        );
        if self.phase != Phase::AwaitingAnswer {
            return Err(ConversationError::InvalidState(format!(
                "submit_answer called in phase {:?}",
                self.phase
            )));
        }

        let step = self
            .steps
            .last_mut()
            .ok_or_else(|| ConversationError::InvalidState("awaiting answer with no step".to_string()))?;
        step.answer = answer.to_string();
        step.completed = true;
        let step_id = step.id.clone();
        self.answers.insert(step_id, answer);

        // The cap is authoritative: no follow-up round-trip once it is hit
        if self.follow_ups_asked >= MAX_FOLLOW_UPS {
            debug!("SimulationSession::submit_answer: follow-up cap reached, finalizing");
            self.pending = Some(PendingCall::Finalize);
        } else {
            self.pending = Some(PendingCall::FollowUp);
        }
        self.run_pending().await
    }

    /// Re-issue the model call that failed, from the Errored phase
    pub async fn retry(&mut self) -> Result<Turn, ConversationError> {
        debug!(phase = ?self.phase, pending = ?self.pending, "SimulationSession::retry: called");
        if self.phase != Phase::Errored {
            return Err(ConversationError::InvalidState(format!(
                "retry called in phase {:?}",
                self.phase
            )));
        }
        if self.pending.is_none() {
            return Err(ConversationError::InvalidState("nothing to retry".to_string()));
        }
        self.run_pending().await
    }

    /// Back to NotStarted, discarding all steps, answers, and results
    pub fn restart(&mut self) {
        info!(property_id = %self.property.id, "SimulationSession::restart: discarding session state");
        self.phase = Phase::NotStarted;
        self.steps.clear();
        self.answers.clear();
        self.follow_ups_asked = 0;
        self.result = None;
        self.pending = None;
    }

    /// Drive the pending call to a Turn, parking in Errored on failure
    async fn run_pending(&mut self) -> Result<Turn, ConversationError> {
        match self.drive().await {
            Ok(turn) => Ok(turn),
            Err(e) => {
                debug!(error = %e, "SimulationSession::run_pending: call failed, entering Errored");
                self.phase = Phase::Errored;
                Err(e)
            }
        }
    }

    async fn drive(&mut self) -> Result<Turn, ConversationError> {
        loop {
            let call = self
                .pending
                .ok_or_else(|| ConversationError::InvalidState("no pending call".to_string()))?;
            debug!(?call, "SimulationSession::drive: issuing call");

            match call {
                PendingCall::Intro => {
                    let prompt = self
                        .prompts
                        .introduction(&self.property)
                        .map_err(|e| ConversationError::Prompt(e.to_string()))?;
                    let request = CompletionRequest::new(prompt, self.max_tokens);
                    let question = self.llm.complete(request).await?.require_content()?;

                    let step = ConversationStep {
                        id: "initial".to_string(),
                        question,
                        answer: String::new(),
                        completed: false,
                    };
                    self.steps.push(step.clone());
                    self.phase = Phase::AwaitingAnswer;
                    self.pending = None;
                    info!(property_id = %self.property.id, "SimulationSession: dialogue started");
                    return Ok(Turn::Question(step));
                }

                PendingCall::FollowUp => {
                    let initial_answer = self.answers.first().unwrap_or_default().to_string();
                    let questions: Vec<String> = self.steps.iter().skip(1).map(|s| s.question.clone()).collect();
                    let later_answers = self.answers.later();

                    let prompt = self
                        .prompts
                        .follow_up(
                            &self.property,
                            &initial_answer,
                            &questions,
                            &later_answers,
                            self.follow_ups_asked,
                            MAX_FOLLOW_UPS,
                        )
                        .map_err(|e| ConversationError::Prompt(e.to_string()))?;

                    let mut request = CompletionRequest::new(prompt, self.max_tokens);
                    request.messages = self.history();
                    let reply = self.llm.complete(request).await?.require_content()?;

                    if contains_ready_sentinel(&reply) {
                        debug!("SimulationSession::drive: ready sentinel received, finalizing");
                        self.pending = Some(PendingCall::Finalize);
                        continue;
                    }

                    self.follow_ups_asked += 1;
                    let step = ConversationStep {
                        id: format!("follow-up-{}", self.follow_ups_asked),
                        question: reply,
                        answer: String::new(),
                        completed: false,
                    };
                    self.steps.push(step.clone());
                    self.phase = Phase::AwaitingAnswer;
                    self.pending = None;
                    return Ok(Turn::Question(step));
                }

                PendingCall::Finalize => {
                    self.phase = Phase::Finalizing;
                    let prompt = self
                        .prompts
                        .final_itinerary(&self.property, self.answers.as_pairs())
                        .map_err(|e| ConversationError::Prompt(e.to_string()))?;

                    let mut request = CompletionRequest::new(prompt, self.max_tokens).json_object();
                    request.messages = self.history();
                    let text = self.llm.complete(request).await?.require_content()?;

                    let result = parse_simulation_result(&text)?;
                    self.result = Some(result.clone());
                    self.phase = Phase::Completed;
                    self.pending = None;
                    info!(
                        property_id = %self.property.id,
                        days = result.itinerary.len(),
                        "SimulationSession: simulation completed"
                    );
                    return Ok(Turn::Completed(result));
                }
            }
        }
    }

    /// The dialogue so far as assistant/user turns
    fn history(&self) -> Vec<Message> {
        let mut messages = Vec::new();
        for step in &self.steps {
            messages.push(Message::assistant(&step.question));
            if step.completed {
                messages.push(Message::user(&step.answer));
            }
        }
        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::llm::client::mock::MockLlmClient;
    use crate::llm::{CompletionResponse, LlmError};

    fn farm() -> Property {
        Catalog::new().lookup("wildhouse-farm").unwrap().clone()
    }

    fn result_json() -> String {
        serde_json::json!({
            "itinerary": [
                { "day": 1, "title": "Arrival", "activities": [
                    { "time": "14:00", "description": "Check in", "type": "arrival" },
                    { "time": "15:00", "description": "Unpack", "type": "rest" },
                    { "time": "17:00", "description": "Garden walk", "type": "activity" },
                    { "time": "19:00", "description": "Dinner", "type": "meal" },
                    { "time": "21:00", "description": "Wind down", "type": "rest" }
                ]},
                { "day": 2, "title": "Exploring", "activities": [
                    { "time": "08:30", "description": "Breakfast", "type": "meal" },
                    { "time": "10:00", "description": "Lake walk", "type": "activity" },
                    { "time": "13:00", "description": "Pub lunch", "type": "meal" },
                    { "time": "15:00", "description": "Country park", "type": "activity" },
                    { "time": "19:00", "description": "BBQ", "type": "meal" }
                ]},
                { "day": 3, "title": "Departure", "activities": [
                    { "time": "08:30", "description": "Breakfast", "type": "meal" },
                    { "time": "09:30", "description": "Last stroll", "type": "activity" },
                    { "time": "10:30", "description": "Pack", "type": "rest" },
                    { "time": "11:00", "description": "Check out", "type": "departure" },
                    { "time": "12:00", "description": "Lunch en route", "type": "meal" }
                ]}
            ],
            "personalizedTips": ["Tip 1", "Tip 2", "Tip 3", "Tip 4"],
            "highlights": ["Highlight 1", "Highlight 2", "Highlight 3"]
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_start_produces_initial_step() {
        let llm = Arc::new(MockLlmClient::with_replies(&["Welcome to Wildhouse Farm!"]));
        let mut session = SimulationSession::new(farm(), llm, 1024);

        let turn = session.start().await.unwrap();
        match turn {
            Turn::Question(step) => {
                assert_eq!(step.id, "initial");
                assert!(!step.completed);
            }
            Turn::Completed(_) => panic!("expected a question"),
        }
        assert_eq!(session.phase(), Phase::AwaitingAnswer);
        assert_eq!(session.follow_ups_asked(), 0);
    }

    #[tokio::test]
    async fn test_start_twice_is_invalid() {
        let llm = Arc::new(MockLlmClient::with_replies(&["Welcome!", "unused"]));
        let mut session = SimulationSession::new(farm(), llm, 1024);

        session.start().await.unwrap();
        let err = session.start().await.unwrap_err();
        assert!(matches!(err, ConversationError::InvalidState(_)));
    }

    #[tokio::test]
    async fn test_sentinel_triggers_finalization() {
        let llm = Arc::new(MockLlmClient::with_replies(&[
            "Welcome! Tell me about your trip.",
            "Thanks! I am ready to generate your staying experience!",
            &result_json(),
        ]));
        let mut session = SimulationSession::new(farm(), llm.clone(), 1024);

        session.start().await.unwrap();
        let turn = session.submit_answer("family of four, we love hiking").await.unwrap();

        match turn {
            Turn::Completed(result) => assert_eq!(result.itinerary.len(), 3),
            Turn::Question(q) => panic!("expected completion, got question: {}", q.question),
        }
        assert_eq!(session.phase(), Phase::Completed);
        // Intro + follow-up decision + finalize
        assert_eq!(llm.call_count(), 3);
    }

    #[tokio::test]
    async fn test_follow_up_cap_is_authoritative() {
        // Model never emits the sentinel; the cap must force finalization
        let llm = Arc::new(MockLlmClient::with_replies(&[
            "Welcome!",
            "Question 1?",
            "Question 2?",
            "Question 3?",
            &result_json(),
        ]));
        let mut session = SimulationSession::new(farm(), llm.clone(), 1024);

        session.start().await.unwrap();
        let mut answers = 0;
        loop {
            let turn = session.submit_answer(&format!("answer {}", answers)).await.unwrap();
            answers += 1;
            assert!(session.follow_ups_asked() <= MAX_FOLLOW_UPS);
            if let Turn::Completed(result) = turn {
                assert_eq!(result.itinerary.len(), 3);
                break;
            }
        }

        assert_eq!(session.follow_ups_asked(), MAX_FOLLOW_UPS);
        // 1 initial answer + 3 follow-up answers
        assert_eq!(answers, 4);
        // Intro + 3 follow-up calls + finalize; no 4th follow-up round-trip
        assert_eq!(llm.call_count(), 5);
        assert_eq!(session.answers().len(), 4);
    }

    #[tokio::test]
    async fn test_malformed_final_output_errors_without_result() {
        let llm = Arc::new(MockLlmClient::with_replies(&[
            "Welcome!",
            "Thanks! I am ready to generate your staying experience!",
            "{\"itinerary\": [], \"highlights\": []}",
        ]));
        let mut session = SimulationSession::new(farm(), llm, 1024);

        session.start().await.unwrap();
        let err = session.submit_answer("just me").await.unwrap_err();

        assert!(matches!(err, ConversationError::MalformedOutput(_)));
        assert_eq!(session.phase(), Phase::Errored);
        assert!(session.result().is_none());
    }

    #[tokio::test]
    async fn test_retry_reissues_failed_call() {
        // First finalize reply is unparseable, the second is good
        let llm = Arc::new(MockLlmClient::new(vec![
            CompletionResponse::text("Welcome!"),
            CompletionResponse::text("Thanks! I am ready to generate your staying experience!"),
            CompletionResponse::text("not json at all"),
            CompletionResponse::text(result_json()),
        ]));
        let mut session = SimulationSession::new(farm(), llm, 1024);

        session.start().await.unwrap();
        let err = session.submit_answer("family of four").await.unwrap_err();
        assert!(matches!(err, ConversationError::MalformedOutput(_)));
        assert_eq!(session.phase(), Phase::Errored);

        // Retry re-issues only the finalize call and succeeds
        let turn = session.retry().await.unwrap();
        assert!(matches!(turn, Turn::Completed(_)));
        assert_eq!(session.phase(), Phase::Completed);
    }

    #[tokio::test]
    async fn test_restart_clears_all_state() {
        let llm = Arc::new(MockLlmClient::with_replies(&[
            "Welcome!",
            "Thanks! I am ready to generate your staying experience!",
            &result_json(),
        ]));
        let mut session = SimulationSession::new(farm(), llm, 1024);

        session.start().await.unwrap();
        session.submit_answer("couple and a dog").await.unwrap();
        assert_eq!(session.phase(), Phase::Completed);

        session.restart();
        assert_eq!(session.phase(), Phase::NotStarted);
        assert!(session.steps().is_empty());
        assert!(session.answers().is_empty());
        assert!(session.result().is_none());
        assert_eq!(session.follow_ups_asked(), 0);
    }

    #[tokio::test]
    async fn test_network_failure_parks_in_errored() {
        let llm = Arc::new(MockLlmClient::new(vec![]));
        let mut session = SimulationSession::new(farm(), llm, 1024);

        let err = session.start().await.unwrap_err();
        assert!(matches!(err, ConversationError::Upstream(LlmError::InvalidResponse(_))));
        assert_eq!(session.phase(), Phase::Errored);
    }
}
