//! HTTP API server
//!
//! Serves the three-endpoint API the StayVision frontend talks to:
//! health check, feedback submission, and the stateless conversation
//! endpoint that drives the simulation over the wire.

mod feedback;
mod handlers;
mod types;

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::routing::{get, post};
use eyre::{Result, WrapErr};
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::config::ServerConfig;
use crate::llm::LlmClient;
use crate::prompts::PromptBuilder;

pub use feedback::{FeedbackRecord, FeedbackSink, FeedbackTag, LogSink};
pub use handlers::ApiError;
pub use types::{
    ConversationRequest, ConversationResponse, FeedbackRequest, FeedbackResponse, HealthResponse, WireMessage,
    WireRole,
};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub llm: Arc<dyn LlmClient>,
    pub prompts: Arc<PromptBuilder>,
    pub feedback: Arc<dyn FeedbackSink>,
    pub max_tokens: u32,
}

/// Build the API router over the given state
pub fn router(state: AppState) -> Router {
    debug!("router: called");
    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/feedback", post(handlers::feedback))
        .route("/api/getResponseFromLLM", post(handlers::conversation))
        .with_state(state)
}

/// CORS policy from config
///
/// "*" opens the API to any origin (the demo default); anything else is
/// treated as the single allowed frontend origin.
fn cors_layer(frontend_origin: &str) -> Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);
    if frontend_origin == "*" {
        Ok(layer.allow_origin(Any))
    } else {
        let origin: HeaderValue = frontend_origin
            .parse()
            .wrap_err_with(|| format!("Invalid frontend origin: {}", frontend_origin))?;
        Ok(layer.allow_origin(origin))
    }
}

/// Bind and serve the API until the process exits
pub async fn serve(config: &ServerConfig, state: AppState) -> Result<()> {
    debug!("serve: called");
    let app = router(state).layer(cors_layer(&config.frontend_origin)?);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("Failed to bind {}", addr))?;

    info!(%addr, "API server listening");
    axum::serve(listener, app).await.wrap_err("API server exited")?;
    Ok(())
}

#[cfg(test)]
pub use feedback::capture::CaptureSink;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Json;
    use axum::extract::State;

    use crate::llm::client::mock::MockLlmClient;

    #[test]
    fn test_cors_layer_accepts_wildcard_and_origin() {
        assert!(cors_layer("*").is_ok());
        assert!(cors_layer("http://localhost:5173").is_ok());
        assert!(cors_layer("not a header\nvalue").is_err());
    }

    #[tokio::test]
    async fn test_feedback_handler_clamps_rating_and_records() {
        let sink = Arc::new(CaptureSink::default());
        let state = AppState {
            catalog: Arc::new(Catalog::new()),
            llm: Arc::new(MockLlmClient::new(vec![])),
            prompts: Arc::new(PromptBuilder::new()),
            feedback: sink.clone(),
            max_tokens: 512,
        };

        let request: FeedbackRequest = serde_json::from_value(serde_json::json!({
            "propertyId": "wildhouse-farm",
            "rating": 15,
            "feedback": "negative",
            "answers": { "initial": "family of four" }
        }))
        .unwrap();

        let Json(response) = handlers::feedback(State(state), Json(request)).await;
        assert!(response.success);

        let records = sink.records.lock().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].rating, 10);
        assert_eq!(records[0].tag, Some(FeedbackTag::Negative));
        assert_eq!(
            records[0].answers,
            vec![("initial".to_string(), "family of four".to_string())]
        );
    }
}
