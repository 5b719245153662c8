//! Consultation service orchestrating one troubleshooting turn.
//!
//! ConsultationService coordinates the SessionRepository, the intent
//! classifier and the diagnosis generator: it persists the user turn,
//! classifies it, generates a diagnosis against recent history, persists
//! the assistant turn and returns the refreshed session.

use std::time::Duration;

use tracing::{error, info, warn};
use uuid::Uuid;

use podscription_types::config::PodscriptionConfig;
use podscription_types::error::ConsultationError;
use podscription_types::session::{Intent, Message, NewMessage, Session};

use crate::diagnosis::generator::DiagnosisGenerator;
use crate::intent::classifier::IntentClassifier;
use crate::llm::deadline::TurnDeadline;
use crate::llm::provider::LlmProvider;
use crate::store::repository::SessionRepository;

/// Orchestrates consultation turns and session lookups.
///
/// Generic over `SessionRepository` and `LlmProvider` so podscription-core
/// never depends on podscription-infra.
pub struct ConsultationService<R: SessionRepository, P: LlmProvider> {
    repo: R,
    provider: P,
    classifier: IntentClassifier,
    generator: DiagnosisGenerator,
    history_window: usize,
    turn_timeout: Duration,
}

impl<R: SessionRepository, P: LlmProvider> ConsultationService<R, P> {
    /// Create a service using the model, sampling and turn settings in `config`.
    pub fn new(repo: R, provider: P, config: &PodscriptionConfig) -> Self {
        Self {
            repo,
            provider,
            classifier: IntentClassifier::new(config.llm.model.clone(), &config.classifier),
            generator: DiagnosisGenerator::new(&config.llm),
            history_window: config.consultation.history_window,
            turn_timeout: Duration::from_secs(config.consultation.turn_timeout_secs),
        }
    }

    /// Access the session repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Access the model backend.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    // --- Session operations ---

    /// Create an empty session. An empty name gets the default `"Session N"`.
    pub async fn create_session(&self, name: &str) -> Result<Session, ConsultationError> {
        let session = self.repo.create(name).await.map_err(|e| {
            error!(error = %e, "Failed to create session");
            ConsultationError::SessionCreationFailed(e.to_string())
        })?;
        info!(session_id = %session.id, name = %session.name, "Created new session");
        Ok(session)
    }

    /// Get a session by ID.
    pub async fn get_session(&self, id: &Uuid) -> Result<Session, ConsultationError> {
        Ok(self.repo.get(id).await?)
    }

    /// List every session.
    pub async fn list_sessions(&self) -> Result<Vec<Session>, ConsultationError> {
        self.repo
            .list()
            .await
            .map_err(|e| ConsultationError::Internal(e.to_string()))
    }

    // --- Consultation turn ---

    /// Run one consultation turn.
    ///
    /// Without a session id a new session is created first. A failed
    /// classification falls back to [`Intent::fallback`]; a failed diagnosis
    /// aborts the turn with `ProcessingFailed`, leaving the user message
    /// stored without a reply.
    ///
    /// Returns the refreshed session and the appended assistant message.
    pub async fn send_message(
        &self,
        session_id: Option<Uuid>,
        content: &str,
    ) -> Result<(Session, Message), ConsultationError> {
        if content.is_empty() {
            return Err(ConsultationError::InvalidRequest(
                "Message content cannot be empty".to_string(),
            ));
        }

        let session = match session_id {
            Some(id) => self.repo.get(&id).await?,
            None => {
                let session = self.create_session("").await?;
                info!(session_id = %session.id, "Created new session for chat");
                session
            }
        };
        let session_id = session.id;

        let deadline = TurnDeadline::after(self.turn_timeout);

        self.repo
            .add_message(&session_id, NewMessage::user(content))
            .await?;

        info!(
            session_id = %session_id,
            content_length = content.len(),
            "Processing user message"
        );

        let intent = match self
            .classifier
            .classify(&self.provider, content, &deadline)
            .await
        {
            Ok(intent) => intent,
            Err(e) => {
                warn!(session_id = %session_id, error = %e, "Failed to classify intent, using fallback");
                Intent::fallback()
            }
        };

        info!(
            session_id = %session_id,
            intent_category = %intent.category,
            confidence = intent.confidence,
            "Classified user intent"
        );

        // History is the session as read before this turn's user message.
        let history = session.recent_messages(self.history_window);

        let diagnosis = match self
            .generator
            .diagnose(&self.provider, content, &intent, history, &deadline)
            .await
        {
            Ok(diagnosis) => diagnosis,
            Err(e) => {
                error!(session_id = %session_id, error = %e, "Failed to generate diagnosis");
                return Err(ConsultationError::ProcessingFailed(e));
            }
        };

        let commands_count = diagnosis.prescription.commands.len();
        let title = diagnosis.prescription.diagnosis.clone();

        let message = self
            .repo
            .add_message(
                &session_id,
                NewMessage::assistant(diagnosis.raw_text, intent, diagnosis.prescription),
            )
            .await?;

        info!(
            session_id = %session_id,
            diagnosis = %title,
            commands_count,
            "Generated diagnosis and response"
        );

        let session = self.repo.get(&session_id).await?;

        info!(
            session_id = %session_id,
            message_count = session.messages.len(),
            "Consultation turn completed"
        );

        Ok((session, message))
    }
}
