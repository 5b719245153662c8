//! Intent classifier.
//!
//! Sends the classification prompt at a low temperature and parses the
//! three-line reply:
//!
//! ```text
//! CATEGORY: networking
//! CONFIDENCE: 0.85
//! SYMPTOMS: dns failure, timeout
//! ```

use tracing::{Instrument, debug, info_span};

use podscription_types::config::ClassifierConfig;
use podscription_types::llm::{CompletionRequest, LlmError};
use podscription_types::session::{Category, Intent};

use crate::llm::deadline::TurnDeadline;
use crate::llm::provider::LlmProvider;
use crate::prompt::classification::classification_prompt;

/// Confidence when the reply has no usable CONFIDENCE line.
pub const DEFAULT_CONFIDENCE: f64 = 0.7;

/// Classifies a user message into an [`Intent`] via the model backend.
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    model: String,
    temperature: f64,
    max_tokens: u32,
}

impl IntentClassifier {
    pub fn new(model: impl Into<String>, config: &ClassifierConfig) -> Self {
        Self {
            model: model.into(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }

    /// Build the backend request for `message`.
    pub fn build_request(&self, message: &str) -> CompletionRequest {
        let prompt = classification_prompt(message);
        CompletionRequest::single_turn(
            &self.model,
            prompt.system,
            prompt.user,
            self.temperature,
            self.max_tokens,
        )
    }

    /// Classify `message`. Any backend failure, including an expired
    /// deadline, is returned to the caller unchanged.
    pub async fn classify<P: LlmProvider>(
        &self,
        provider: &P,
        message: &str,
        deadline: &TurnDeadline,
    ) -> Result<Intent, LlmError> {
        let request = self.build_request(message);

        let span = info_span!(
            "gen_ai.classify",
            gen_ai.operation.name = "classify_intent",
            gen_ai.system = provider.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.max_tokens = request.max_tokens,
            gen_ai.request.temperature = ?request.temperature,
        );

        let response = deadline
            .run(async { provider.complete(&request).await }.instrument(span))
            .await?;

        debug!(
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "Classification completed"
        );

        Ok(parse_intent_response(&response.content))
    }
}

/// Parse a classification reply.
///
/// Lines are trimmed and matched by prefix; unknown lines are ignored.
/// Defaults are `general`, 0.7 and no symptoms. Confidence is bucketed by
/// substring: a value mentioning `0.9`/`0.8` becomes 0.9, `0.7`/`0.6`
/// becomes 0.8, any other decimal 0.7.
pub fn parse_intent_response(text: &str) -> Intent {
    let mut intent = Intent {
        category: Category::General,
        confidence: DEFAULT_CONFIDENCE,
        symptoms: Vec::new(),
    };

    for line in text.trim().lines() {
        let line = line.trim();

        if let Some(value) = line.strip_prefix("CATEGORY:") {
            intent.category = Category::from(value.trim());
        } else if let Some(value) = line.strip_prefix("CONFIDENCE:") {
            if let Some(confidence) = bucket_confidence(value.trim()) {
                intent.confidence = confidence;
            }
        } else if let Some(value) = line.strip_prefix("SYMPTOMS:") {
            let value = value.trim();
            if !value.is_empty() {
                intent
                    .symptoms
                    .extend(value.split(',').map(|s| s.trim().to_string()));
            }
        }
    }

    intent
}

fn bucket_confidence(value: &str) -> Option<f64> {
    if !(value.contains("0.") || value.contains("1.")) {
        return None;
    }
    let confidence = if value.contains("0.9") || value.contains("0.8") {
        0.9
    } else if value.contains("0.7") || value.contains("0.6") {
        0.8
    } else {
        0.7
    };
    Some(confidence)
}
