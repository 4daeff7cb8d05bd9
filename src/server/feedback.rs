//! Feedback sink
//!
//! Satisfaction feedback is forwarded to a sink behind a trait so the demo's
//! console-only sink can later be swapped for something durable. No storage
//! guarantee is made here.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Binary satisfaction tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackTag {
    Positive,
    Negative,
}

/// One submitted piece of feedback
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackRecord {
    pub property_id: String,
    /// 1-10 satisfaction rating
    pub rating: u8,
    pub tag: Option<FeedbackTag>,
    /// The answers the guest gave during the simulation, in question order
    pub answers: Vec<(String, String)>,
}

/// Destination for guest feedback
#[async_trait]
pub trait FeedbackSink: Send + Sync {
    /// Record a piece of feedback; sinks must not fail the request
    async fn record(&self, record: FeedbackRecord);
}

/// Console-only sink: logs the feedback and drops it
pub struct LogSink;

#[async_trait]
impl FeedbackSink for LogSink {
    async fn record(&self, record: FeedbackRecord) {
        info!(
            property_id = %record.property_id,
            rating = record.rating,
            tag = ?record.tag,
            answer_count = record.answers.len(),
            "Feedback received"
        );
    }
}

#[cfg(test)]
pub mod capture {
    use std::sync::Mutex;

    use super::*;

    /// Test sink that captures records for assertions
    #[derive(Default)]
    pub struct CaptureSink {
        pub records: Mutex<Vec<FeedbackRecord>>,
    }

    #[async_trait]
    impl FeedbackSink for CaptureSink {
        async fn record(&self, record: FeedbackRecord) {
            self.records.lock().unwrap().push(record);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::capture::CaptureSink;
    use super::*;

    #[tokio::test]
    async fn test_record_keeps_answers_in_question_order() {
        let sink = CaptureSink::default();
        sink.record(FeedbackRecord {
            property_id: "wildhouse-farm".to_string(),
            rating: 8,
            tag: None,
            answers: vec![
                ("initial".to_string(), "family of four".to_string()),
                ("follow-up-1".to_string(), "two spaniels".to_string()),
                ("follow-up-2".to_string(), "pub food".to_string()),
            ],
        })
        .await;

        let records = sink.records.lock().unwrap();
        let ids: Vec<&str> = records[0].answers.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, ["initial", "follow-up-1", "follow-up-2"]);
    }
}
