//! Pluggable persistence target for full store snapshots.

use std::collections::HashMap;

use podscription_types::error::SnapshotError;
use podscription_types::session::Session;
use uuid::Uuid;

/// Destination for full-state snapshots of the session store.
///
/// `save` is called synchronously while the store's write lock is held, so
/// implementations must not call back into the store.
pub trait SnapshotSink: Send + Sync {
    /// Load the last saved state. Absent state is an empty map.
    fn load(&self) -> Result<HashMap<Uuid, Session>, SnapshotError>;

    /// Persist the complete current state.
    fn save(&self, sessions: &HashMap<Uuid, Session>) -> Result<(), SnapshotError>;
}

/// Sink that keeps nothing; used when no store path is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSnapshot;

impl SnapshotSink for NoSnapshot {
    fn load(&self) -> Result<HashMap<Uuid, Session>, SnapshotError> {
        Ok(HashMap::new())
    }

    fn save(&self, _sessions: &HashMap<Uuid, Session>) -> Result<(), SnapshotError> {
        Ok(())
    }
}
