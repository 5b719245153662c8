//! Application state wiring the consultation service together.
//!
//! The service is generic over repository and provider traits; AppState pins
//! it to the in-memory store and the boxed OpenAI-compatible provider.

use std::collections::HashMap;
use std::sync::Arc;

use secrecy::SecretString;
use uuid::Uuid;

use podscription_core::consultation::service::ConsultationService;
use podscription_core::llm::box_provider::BoxLlmProvider;
use podscription_core::store::memory::InMemorySessionStore;
use podscription_core::store::snapshot::{NoSnapshot, SnapshotSink};
use podscription_infra::llm::create_provider;
use podscription_infra::snapshot::file::JsonFileSnapshot;
use podscription_types::config::PodscriptionConfig;
use podscription_types::error::SnapshotError;
use podscription_types::session::Session;

/// Snapshot target chosen from `store.path`.
pub enum StoreSink {
    /// Empty path: sessions live only in memory.
    Disabled(NoSnapshot),
    File(JsonFileSnapshot),
}

impl StoreSink {
    pub fn from_config(config: &PodscriptionConfig) -> Self {
        if config.store.path.trim().is_empty() {
            Self::Disabled(NoSnapshot)
        } else {
            Self::File(JsonFileSnapshot::new(config.store.path.trim()))
        }
    }
}

impl SnapshotSink for StoreSink {
    fn load(&self) -> Result<HashMap<Uuid, Session>, SnapshotError> {
        match self {
            Self::Disabled(sink) => sink.load(),
            Self::File(sink) => sink.load(),
        }
    }

    fn save(&self, sessions: &HashMap<Uuid, Session>) -> Result<(), SnapshotError> {
        match self {
            Self::Disabled(sink) => sink.save(sessions),
            Self::File(sink) => sink.save(sessions),
        }
    }
}

pub type ConcreteSessionStore = InMemorySessionStore<StoreSink>;

pub type ConcreteConsultationService = ConsultationService<ConcreteSessionStore, BoxLlmProvider>;

/// Shared application state.
///
/// Used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub consultation: Arc<ConcreteConsultationService>,
}

impl AppState {
    /// Open the session store and connect the model backend.
    pub fn init(config: &PodscriptionConfig, api_key: Option<SecretString>) -> anyhow::Result<Self> {
        let provider = create_provider(&config.llm, api_key)
            .map_err(|e| anyhow::anyhow!("{e}: set OPENAI_API_KEY or pass --api-key"))?;

        tracing::info!(
            model = %config.llm.model,
            base_url = %config.llm.base_url,
            store_path = %config.store.path,
            "Consultation service configured"
        );

        Ok(Self::from_parts(open_store(config), provider, config))
    }

    /// Wire state from an already-built store and provider.
    pub fn from_parts(
        store: ConcreteSessionStore,
        provider: BoxLlmProvider,
        config: &PodscriptionConfig,
    ) -> Self {
        Self {
            consultation: Arc::new(ConsultationService::new(store, provider, config)),
        }
    }
}

/// Open the session store described by `store.path`.
///
/// Does not need an API key, so read-only commands can inspect sessions.
pub fn open_store(config: &PodscriptionConfig) -> ConcreteSessionStore {
    InMemorySessionStore::open(StoreSink::from_config(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_path_disables_snapshots() {
        let config = PodscriptionConfig::default();
        assert!(matches!(StoreSink::from_config(&config), StoreSink::Disabled(_)));
    }

    #[test]
    fn test_store_path_selects_file_sink() {
        let mut config = PodscriptionConfig::default();
        config.store.path = " data/sessions.json ".to_string();
        match StoreSink::from_config(&config) {
            StoreSink::File(sink) => {
                assert_eq!(sink.path(), std::path::Path::new("data/sessions.json"))
            }
            StoreSink::Disabled(_) => panic!("expected file sink"),
        }
    }

    #[test]
    fn test_init_without_api_key_fails() {
        let err = AppState::init(&PodscriptionConfig::default(), None)
            .err()
            .unwrap();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[tokio::test]
    async fn test_open_store_reads_snapshot_file() {
        use podscription_core::store::repository::SessionRepository;

        let tmp = tempfile::TempDir::new().unwrap();
        let mut config = PodscriptionConfig::default();
        config.store.path = tmp.path().join("sessions.json").display().to_string();

        let created = open_store(&config).create("Night shift").await.unwrap();
        let reopened = open_store(&config).get(&created.id).await.unwrap();
        assert_eq!(reopened.name, "Night shift");
    }
}
