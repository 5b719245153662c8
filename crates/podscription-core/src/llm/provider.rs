//! LlmProvider trait definition.
//!
//! This is the core abstraction every model backend implements. Uses RPITIT
//! for `complete`; dynamic dispatch goes through [`super::box_provider::BoxLlmProvider`].

use podscription_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for model backends (OpenAI-compatible endpoints, test doubles).
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
/// Implementations live in podscription-infra (e.g., `OpenAiCompatibleProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openai").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    ///
    /// Returns `LlmError::EmptyResponse` when the backend produced no choices.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
