//! JSON snapshot file with atomic replacement.
//!
//! The whole store is serialized as one pretty-printed JSON object mapping
//! session id to session. Writes go to a sibling temp file that is then
//! renamed over the target, so readers only ever see a complete snapshot.

use std::collections::HashMap;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

use tracing::debug;
use uuid::Uuid;

use podscription_core::store::snapshot::SnapshotSink;
use podscription_types::error::SnapshotError;
use podscription_types::session::Session;

/// Snapshot sink backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileSnapshot {
    path: PathBuf,
}

impl JsonFileSnapshot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Target file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut tmp = OsString::from(self.path.as_os_str());
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

impl SnapshotSink for JsonFileSnapshot {
    /// Missing or empty files load as an empty store.
    fn load(&self) -> Result<HashMap<Uuid, Session>, SnapshotError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No session snapshot found");
                return Ok(HashMap::new());
            }
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }

        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, sessions: &HashMap<Uuid, Session>) -> Result<(), SnapshotError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(sessions)?;

        let tmp_path = self.temp_path();
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(json.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;

        debug!(
            path = %self.path.display(),
            session_count = sessions.len(),
            "Session snapshot written"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use podscription_core::store::memory::InMemorySessionStore;
    use podscription_core::store::repository::SessionRepository;
    use podscription_types::session::NewMessage;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_empty() {
        let tmp = TempDir::new().unwrap();
        let sink = JsonFileSnapshot::new(tmp.path().join("sessions.json"));
        assert!(sink.load().unwrap().is_empty());
    }

    #[test]
    fn test_empty_file_loads_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("sessions.json");
        fs::write(&path, "  \n").unwrap();
        assert!(JsonFileSnapshot::new(path).load().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("sessions.json");
        fs::write(&path, "{ not json").unwrap();
        let err = JsonFileSnapshot::new(path).load().unwrap_err();
        assert!(matches!(err, SnapshotError::Serialization(_)));
    }

    #[test]
    fn test_save_creates_parent_dirs_and_leaves_no_temp_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested/dir/sessions.json");
        let sink = JsonFileSnapshot::new(&path);

        sink.save(&HashMap::new()).unwrap();

        assert!(path.exists());
        assert!(!sink.temp_path().exists());
        assert_eq!(fs::read_to_string(&path).unwrap().trim(), "{}");
    }

    #[tokio::test]
    async fn test_store_reopened_on_same_file_sees_same_sessions() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("sessions.json");

        let store = InMemorySessionStore::open(JsonFileSnapshot::new(&path));
        let session = store.create("Ingress triage").await.unwrap();
        store
            .add_message(&session.id, NewMessage::user("ingress returns 404"))
            .await
            .unwrap();
        let before = store.get(&session.id).await.unwrap();
        drop(store);

        let reopened = InMemorySessionStore::open(JsonFileSnapshot::new(&path));
        let after = reopened.get(&session.id).await.unwrap();
        assert_eq!(after, before);
        assert_eq!(reopened.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_snapshot_uses_camel_case_wire_format() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("sessions.json");

        let store = InMemorySessionStore::open(JsonFileSnapshot::new(&path));
        let session = store.create("").await.unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let stored = &raw[session.id.to_string()];
        assert_eq!(stored["name"], "Session 1");
        assert!(stored.get("createdAt").is_some());
        assert!(stored.get("updatedAt").is_some());
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_yields_empty_store() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("sessions.json");
        fs::write(&path, "[1, 2, 3").unwrap();

        let store = InMemorySessionStore::open(JsonFileSnapshot::new(&path));
        assert!(store.list().await.unwrap().is_empty());

        // The next mutation overwrites the corrupt file with a valid snapshot.
        store.create("").await.unwrap();
        let reloaded = JsonFileSnapshot::new(&path).load().unwrap();
        assert_eq!(reloaded.len(), 1);
    }
}
