//! Diagnosis generator.

use tracing::{Instrument, debug, info_span};

use podscription_types::config::LlmConfig;
use podscription_types::llm::{CompletionRequest, LlmError};
use podscription_types::session::{Intent, Message, Prescription, TREATMENT_BOILERPLATE};

use crate::llm::deadline::TurnDeadline;
use crate::llm::provider::LlmProvider;
use crate::prompt::diagnosis_prompt;

/// Title used when the reply has no `Diagnosis:` marker.
pub const DEFAULT_DIAGNOSIS_TITLE: &str = "Kubernetes Issue Diagnosis";

const DIAGNOSIS_MARKER: &str = "Diagnosis:";
const FOLLOW_UP_MARKER: &str = "Follow-up Care:";

/// A generated diagnosis: the structured prescription plus the full reply.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnosis {
    pub prescription: Prescription,
    pub raw_text: String,
}

/// Generates a diagnosis for a classified message.
#[derive(Debug, Clone)]
pub struct DiagnosisGenerator {
    model: String,
    temperature: f64,
    max_tokens: u32,
}

impl DiagnosisGenerator {
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }

    /// Build the backend request, choosing the prompt by intent category.
    pub fn build_request(
        &self,
        message: &str,
        intent: &Intent,
        history: &[Message],
    ) -> CompletionRequest {
        let prompt = diagnosis_prompt(message, &intent.category, history);
        CompletionRequest::single_turn(
            &self.model,
            prompt.system,
            prompt.user,
            self.temperature,
            self.max_tokens,
        )
    }

    /// Generate and parse a diagnosis. Backend failures are never downgraded.
    pub async fn diagnose<P: LlmProvider>(
        &self,
        provider: &P,
        message: &str,
        intent: &Intent,
        history: &[Message],
        deadline: &TurnDeadline,
    ) -> Result<Diagnosis, LlmError> {
        let request = self.build_request(message, intent, history);

        let span = info_span!(
            "gen_ai.diagnose",
            gen_ai.operation.name = "generate_diagnosis",
            gen_ai.system = provider.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.max_tokens = request.max_tokens,
            gen_ai.request.temperature = ?request.temperature,
            intent_category = %intent.category,
        );

        let response = deadline
            .run(async { provider.complete(&request).await }.instrument(span))
            .await?;

        debug!(
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            stop_reason = %response.stop_reason,
            "Diagnosis completed"
        );

        Ok(Diagnosis {
            prescription: parse_diagnosis_response(&response.content),
            raw_text: response.content,
        })
    }
}

/// Extract a prescription from a diagnosis reply.
pub fn parse_diagnosis_response(text: &str) -> Prescription {
    Prescription {
        diagnosis: extract_title(text),
        treatment: TREATMENT_BOILERPLATE.to_string(),
        commands: extract_commands(text),
        follow_up: extract_follow_up(text),
    }
}

/// Text after the first `Diagnosis:` up to the next marker or end of line.
fn extract_title(text: &str) -> String {
    match section_after(text, DIAGNOSIS_MARKER) {
        Some(section) => section
            .split('\n')
            .next()
            .unwrap_or_default()
            .trim()
            .to_string(),
        None => DEFAULT_DIAGNOSIS_TITLE.to_string(),
    }
}

/// The slice between the first and second occurrence of `marker`, or to
/// the end of `text` when it occurs once.
fn section_after<'a>(text: &'a str, marker: &str) -> Option<&'a str> {
    let mut sections = text.split(marker);
    sections.next();
    sections.next()
}

/// Back-ticked `kubectl` commands, one per line at most.
///
/// The command spans from the first to the last back-tick on the line.
fn extract_commands(text: &str) -> Vec<String> {
    text.split('\n')
        .filter_map(|line| {
            let start = line.find('`')?;
            let end = line.rfind('`')?;
            if start == end {
                return None;
            }
            let command = line[start + 1..end].trim();
            command.starts_with("kubectl").then(|| command.to_string())
        })
        .collect()
}

/// Text after the first `Follow-up Care:` up to the next marker or `*`.
fn extract_follow_up(text: &str) -> String {
    section_after(text, FOLLOW_UP_MARKER)
        .map(|section| section.split('*').next().unwrap_or_default().trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::test_support::{Reply, ScriptedProvider, text};
    use podscription_types::session::Category;

    const SAMPLE: &str = "## Diagnosis: 🩺 Acute CrashLoop Fever\n\
\n\
Your pod is running a high temperature.\n\
\n\
### Prescribed Treatment:\n\
1. **Check Vitals**: `kubectl get pods`\n\
2. **Read the Chart**: `kubectl logs my-pod --previous`\n\
3. **Rest**: `sleep 10`\n\
\n\
### Follow-up Care:\n\
Monitor restarts for the next hour.\n\
\n\
*An apple a day keeps the OOMKiller away!*";

    fn intent(category: Category) -> Intent {
        Intent {
            category,
            confidence: 0.9,
            symptoms: vec![],
        }
    }

    #[test]
    fn test_parse_sample_reply() {
        let prescription = parse_diagnosis_response(SAMPLE);
        assert_eq!(prescription.diagnosis, "🩺 Acute CrashLoop Fever");
        assert_eq!(prescription.treatment, TREATMENT_BOILERPLATE);
        assert_eq!(
            prescription.commands,
            vec!["kubectl get pods", "kubectl logs my-pod --previous"]
        );
        assert_eq!(prescription.follow_up, "Monitor restarts for the next hour.");
    }

    #[test]
    fn test_single_command_line() {
        let prescription = parse_diagnosis_response("1. **Check**: `kubectl get pods`");
        assert_eq!(prescription.commands, vec!["kubectl get pods"]);
    }

    #[test]
    fn test_non_kubectl_backticks_excluded() {
        let prescription =
            parse_diagnosis_response("Run `helm list`\nand `` then\na lone ` tick");
        assert!(prescription.commands.is_empty());
    }

    #[test]
    fn test_command_spans_first_to_last_backtick() {
        let prescription =
            parse_diagnosis_response("`kubectl get svc` and `kubectl get endpoints`");
        assert_eq!(
            prescription.commands,
            vec!["kubectl get svc` and `kubectl get endpoints"]
        );
    }

    #[test]
    fn test_missing_markers_use_defaults() {
        let prescription = parse_diagnosis_response("Everything looks healthy.");
        assert_eq!(prescription.diagnosis, DEFAULT_DIAGNOSIS_TITLE);
        assert!(prescription.commands.is_empty());
        assert!(prescription.follow_up.is_empty());
    }

    #[test]
    fn test_specialist_heading_title() {
        let prescription =
            parse_diagnosis_response("## 🌐 Network Diagnosis: CoreDNS Congestion\nbody");
        assert_eq!(prescription.diagnosis, "CoreDNS Congestion");
    }

    #[test]
    fn test_title_stops_at_repeated_marker() {
        let prescription =
            parse_diagnosis_response("## Diagnosis: Pod Fever Diagnosis: confirmed\nmore");
        assert_eq!(prescription.diagnosis, "Pod Fever");
    }

    #[test]
    fn test_title_keeps_leading_emoji() {
        let prescription = parse_diagnosis_response("## Diagnosis: 🩺 Acute Fever");
        assert_eq!(prescription.diagnosis, "🩺 Acute Fever");
    }

    #[test]
    fn test_follow_up_stops_at_repeated_marker() {
        let prescription =
            parse_diagnosis_response("Follow-up Care: watch it\nFollow-up Care: again");
        assert_eq!(prescription.follow_up, "watch it");
    }

    #[test]
    fn test_follow_up_without_joke_runs_to_end() {
        let prescription = parse_diagnosis_response("Follow-up Care:\n  Check again tomorrow.  ");
        assert_eq!(prescription.follow_up, "Check again tomorrow.");
    }

    #[test]
    fn test_build_request_dispatches_by_category() {
        let generator = DiagnosisGenerator::new(&LlmConfig::default());

        let request = generator.build_request("dns down", &intent(Category::Networking), &[]);
        assert!(request.system.as_deref().unwrap().starts_with("You are Dr. Network"));
        assert_eq!(request.messages[0].content, "Network issue reported: dns down");
        assert_eq!(request.temperature, Some(0.7));
        assert_eq!(request.max_tokens, 1000);

        let request = generator.build_request("oom", &intent(Category::Performance), &[]);
        assert!(request
            .system
            .as_deref()
            .unwrap()
            .contains("Your specialty: performance"));
    }

    #[tokio::test]
    async fn test_diagnose_returns_raw_text_and_prescription() {
        let provider = ScriptedProvider::new(vec![text(SAMPLE)]);
        let generator = DiagnosisGenerator::new(&LlmConfig::default());
        let deadline = TurnDeadline::after(Duration::from_secs(30));

        let diagnosis = generator
            .diagnose(&provider, "pod crashing", &intent(Category::PodIssues), &[], &deadline)
            .await
            .unwrap();
        assert_eq!(diagnosis.raw_text, SAMPLE);
        assert_eq!(diagnosis.prescription.commands.len(), 2);
    }

    #[tokio::test]
    async fn test_diagnose_propagates_failure() {
        let provider = ScriptedProvider::new(vec![Reply::Fail(LlmError::AuthenticationFailed)]);
        let generator = DiagnosisGenerator::new(&LlmConfig::default());
        let deadline = TurnDeadline::after(Duration::from_secs(30));

        let err = generator
            .diagnose(&provider, "x", &intent(Category::General), &[], &deadline)
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::AuthenticationFailed));
    }
}
