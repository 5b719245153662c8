//! Per-turn deadline shared by the sequential backend calls of one turn.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use podscription_types::llm::LlmError;

/// A fixed point in time by which every backend call of a turn must finish.
///
/// Computed once when the turn starts; each call runs under
/// `tokio::time::timeout_at` against the same instant.
#[derive(Debug, Clone, Copy)]
pub struct TurnDeadline {
    at: Instant,
}

impl TurnDeadline {
    /// A deadline `budget` from now.
    pub fn after(budget: Duration) -> Self {
        Self {
            at: Instant::now() + budget,
        }
    }

    /// Whether the deadline has already passed.
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.at
    }

    /// Run a backend call under this deadline.
    ///
    /// A call that would start after the deadline is not started at all.
    pub async fn run<T, F>(&self, call: F) -> Result<T, LlmError>
    where
        F: Future<Output = Result<T, LlmError>>,
    {
        if self.is_expired() {
            return Err(LlmError::Timeout);
        }
        tokio::time::timeout_at(self.at, call)
            .await
            .map_err(|_| LlmError::Timeout)?
    }
}
