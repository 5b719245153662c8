//! In-memory session store with full-snapshot persistence.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use podscription_types::error::StoreError;
use podscription_types::session::{Message, NewMessage, Session};

use super::repository::SessionRepository;
use super::snapshot::SnapshotSink;

/// Session store backed by a `HashMap` behind a single `tokio::sync::RwLock`.
///
/// Reads share the lock. Mutations take it exclusively and write a full
/// snapshot through the sink before releasing it, so snapshots land in
/// mutation order. A failed snapshot is logged and does not fail the
/// mutation; the in-memory map stays authoritative.
pub struct InMemorySessionStore<S: SnapshotSink> {
    sessions: RwLock<HashMap<Uuid, Session>>,
    sink: S,
}

impl<S: SnapshotSink> InMemorySessionStore<S> {
    /// Open a store, seeding it from the sink's last snapshot.
    ///
    /// An unreadable snapshot is treated as empty state.
    pub fn open(sink: S) -> Self {
        let sessions = match sink.load() {
            Ok(sessions) => {
                info!(session_count = sessions.len(), "Session store loaded");
                sessions
            }
            Err(e) => {
                warn!(error = %e, "Failed to load session snapshot, starting empty");
                HashMap::new()
            }
        };

        Self {
            sessions: RwLock::new(sessions),
            sink,
        }
    }

    /// Access the snapshot sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    fn persist(&self, sessions: &HashMap<Uuid, Session>) {
        if let Err(e) = self.sink.save(sessions) {
            warn!(error = %e, "Failed to write session snapshot");
        }
    }
}

/// Next timestamp for a session, never earlier than anything already recorded.
fn next_timestamp(session: &Session) -> DateTime<Utc> {
    let mut ts = Utc::now();
    if session.updated_at > ts {
        ts = session.updated_at;
    }
    if let Some(last) = session.last_message() {
        if last.timestamp > ts {
            ts = last.timestamp;
        }
    }
    ts
}

impl<S: SnapshotSink> SessionRepository for InMemorySessionStore<S> {
    async fn create(&self, name: &str) -> Result<Session, StoreError> {
        let mut sessions = self.sessions.write().await;

        let name = if name.is_empty() {
            format!("Session {}", sessions.len() + 1)
        } else {
            name.to_string()
        };
        let session = Session::new(Uuid::new_v4(), name, Utc::now());
        sessions.insert(session.id, session.clone());
        self.persist(&sessions);

        debug!(session_id = %session.id, name = %session.name, "Session created");
        Ok(session)
    }

    async fn get(&self, id: &Uuid) -> Result<Session, StoreError> {
        let sessions = self.sessions.read().await;
        sessions.get(id).cloned().ok_or(StoreError::NotFound(*id))
    }

    async fn list(&self) -> Result<Vec<Session>, StoreError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.values().cloned().collect())
    }

    async fn add_message(&self, id: &Uuid, message: NewMessage) -> Result<Message, StoreError> {
        let mut sessions = self.sessions.write().await;

        let session = sessions.get_mut(id).ok_or(StoreError::NotFound(*id))?;
        let ts = next_timestamp(session);
        let message = message.into_message(Uuid::new_v4(), ts);
        session.messages.push(message.clone());
        session.updated_at = ts;
        let message_count = session.messages.len();

        self.persist(&sessions);

        debug!(
            session_id = %id,
            role = %message.role,
            message_count,
            "Message appended"
        );
        Ok(message)
    }

    async fn update(&self, mut session: Session) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().await;

        let existing = sessions
            .get(&session.id)
            .ok_or(StoreError::NotFound(session.id))?;
        let mut ts = next_timestamp(existing);
        if session.created_at > ts {
            ts = session.created_at;
        }
        session.updated_at = ts;
        sessions.insert(session.id, session);

        self.persist(&sessions);
        Ok(())
    }
}
