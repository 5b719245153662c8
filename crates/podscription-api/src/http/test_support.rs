//! Router fixtures backed by a queued fake model backend.

use std::collections::VecDeque;
use std::sync::Mutex;

use axum::response::Response;

use podscription_core::llm::box_provider::BoxLlmProvider;
use podscription_core::llm::provider::LlmProvider;
use podscription_core::store::memory::InMemorySessionStore;
use podscription_core::store::snapshot::NoSnapshot;
use podscription_types::config::PodscriptionConfig;
use podscription_types::llm::{CompletionRequest, CompletionResponse, LlmError, StopReason, Usage};

use crate::state::{AppState, StoreSink};

/// Provider answering each call with the next queued outcome.
pub struct QueuedProvider {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
}

impl LlmProvider for QueuedProvider {
    fn name(&self) -> &str {
        "queued"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let next = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyResponse));
        next.map(|content| CompletionResponse {
            id: "resp-test".to_string(),
            content,
            model: request.model.clone(),
            stop_reason: StopReason::EndTurn,
            usage: Usage::default(),
        })
    }
}

/// App state with an in-memory store and the given backend outcomes.
pub fn test_state(replies: Vec<Result<String, LlmError>>) -> AppState {
    let provider = QueuedProvider {
        replies: Mutex::new(replies.into()),
    };
    AppState::from_parts(
        InMemorySessionStore::open(StoreSink::Disabled(NoSnapshot)),
        BoxLlmProvider::new(provider),
        &PodscriptionConfig::default(),
    )
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
