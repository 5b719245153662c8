//! Scripted model backend shared by the pipeline tests.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use podscription_types::llm::{CompletionRequest, CompletionResponse, LlmError, StopReason, Usage};

use crate::llm::provider::LlmProvider;

/// One scripted backend outcome.
pub enum Reply {
    Text(String),
    Fail(LlmError),
    /// Reply with `text` after sleeping `delay`.
    Slow(Duration, String),
}

/// Provider that answers each call with the next scripted reply and
/// records every request it receives.
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedProvider {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far, in call order.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

pub fn text(s: &str) -> Reply {
    Reply::Text(s.to_string())
}

fn response(content: String) -> CompletionResponse {
    CompletionResponse {
        id: "resp-test".to_string(),
        content,
        model: "test-model".to_string(),
        stop_reason: StopReason::EndTurn,
        usage: Usage {
            input_tokens: 12,
            output_tokens: 34,
        },
    }
}

impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl Future<Output = Result<CompletionResponse, LlmError>> + Send {
        self.requests.lock().unwrap().push(request.clone());
        let reply = self.replies.lock().unwrap().pop_front();
        async move {
            match reply {
                Some(Reply::Text(content)) => Ok(response(content)),
                Some(Reply::Fail(err)) => Err(err),
                Some(Reply::Slow(delay, content)) => {
                    tokio::time::sleep(delay).await;
                    Ok(response(content))
                }
                None => Err(LlmError::Provider {
                    message: "no scripted reply left".to_string(),
                }),
            }
        }
    }
}
