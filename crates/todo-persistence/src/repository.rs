//! Loading and saving the application state.
//!
//! Reads never fail: a missing, unreadable or corrupt file yields an empty
//! (or partial) state so the application always starts, and the unreadable
//! file is copied aside first. Writes replace the whole state.

use crate::serialization::JsonSerializer;
use crate::traits::{PersistenceMetadata, PersistenceStore, Serializer, StoreSnapshot};
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use todo_core::{TodoError, TodoResult};
use todo_domain::Snapshot;
use uuid::Uuid;

pub const UNREADABLE_BACKUP_LABEL: &str = "corrupt";

pub struct StateRepository<S> {
    store: S,
    instance_id: Uuid,
    /// Set when an unreadable file could not be copied aside; saving would
    /// then destroy the only copy.
    unprotected: AtomicBool,
}

impl<S: PersistenceStore> StateRepository<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            instance_id: Uuid::new_v4(),
            unprotected: AtomicBool::new(false),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads the stored state. When the file exists but cannot be read in
    /// full, a copy is kept as `<name>.corrupt.backup` before anything is
    /// returned, so the next save cannot destroy the only copy.
    pub async fn load(&self) -> Snapshot {
        if !self.store.exists().await {
            return Snapshot::new();
        }

        let stored = match self.store.load().await {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!("Could not load stored state, starting empty: {}", e);
                self.preserve_unreadable().await;
                return Snapshot::new();
            }
        };

        match <JsonSerializer as Serializer<Value>>::deserialize(&JsonSerializer, &stored.data) {
            Ok(value) => {
                let (snapshot, unreadable) = Snapshot::decode(&value);
                if !unreadable.is_empty() {
                    tracing::warn!("Stored state has unreadable entries: {:?}", unreadable);
                    self.preserve_unreadable().await;
                }
                snapshot
            }
            Err(e) => {
                tracing::warn!("Stored state is unreadable, starting empty: {}", e);
                self.preserve_unreadable().await;
                Snapshot::new()
            }
        }
    }

    /// Persist the full state. Returns `Ok(None)` without writing when there
    /// is nothing to store and no file exists yet.
    pub async fn save(&self, snapshot: &Snapshot) -> TodoResult<Option<PersistenceMetadata>> {
        if snapshot.is_empty() && !self.store.exists().await {
            tracing::debug!("Nothing to save yet");
            return Ok(None);
        }
        if self.unprotected.load(Ordering::SeqCst) {
            return Err(TodoError::Internal(
                "Stored state is unreadable and could not be backed up; refusing to overwrite it"
                    .to_string(),
            ));
        }

        let data = JsonSerializer.serialize(snapshot)?;
        let metadata = self
            .store
            .save(StoreSnapshot {
                data,
                metadata: PersistenceMetadata::new(self.instance_id),
            })
            .await?;
        Ok(Some(metadata))
    }

    async fn preserve_unreadable(&self) {
        match self.store.backup(UNREADABLE_BACKUP_LABEL).await {
            Ok(path) => {
                tracing::warn!("Kept a copy of the unreadable state at {}", path.display());
            }
            Err(e) => {
                tracing::error!("Could not back up unreadable state: {}", e);
                self.unprotected.store(true, Ordering::SeqCst);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::JsonFileStore;
    use crate::traits::MockPersistenceStore;
    use std::path::PathBuf;
    use tempfile::tempdir;
    use todo_domain::{NewTodo, StatusFilter, ThemePreference, TodoStore};

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let repo = StateRepository::new(JsonFileStore::new(dir.path().join("todos.json")));
        let snapshot = repo.load().await;
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.filter, StatusFilter::All);
    }

    #[tokio::test]
    async fn test_roundtrip_through_file() {
        let dir = tempdir().unwrap();
        let repo = StateRepository::new(JsonFileStore::new(dir.path().join("todos.json")));

        let mut store = TodoStore::new();
        let id = store.add(NewTodo::titled("Call mum")).unwrap();
        store.set_filter(StatusFilter::Pending);
        let theme = ThemePreference::new(Some(true), false);

        let saved = repo.save(&Snapshot::capture(&store, &theme)).await.unwrap();
        assert!(saved.is_some());

        let loaded = repo.load().await;
        assert_eq!(loaded.dark_mode, Some(true));
        assert_eq!(loaded.filter, StatusFilter::Pending);
        assert_eq!(loaded.todos.len(), 1);
        assert_eq!(loaded.todos[0].id, id);
    }

    #[tokio::test]
    async fn test_empty_state_not_written_to_new_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("todos.json");
        let repo = StateRepository::new(JsonFileStore::new(&path));

        let saved = repo.save(&Snapshot::new()).await.unwrap();
        assert!(saved.is_none());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_empty_state_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("todos.json");
        let repo = StateRepository::new(JsonFileStore::new(&path));

        let mut store = TodoStore::new();
        let id = store.add(NewTodo::titled("Temporary")).unwrap();
        let theme = ThemePreference::new(None, false);
        repo.save(&Snapshot::capture(&store, &theme)).await.unwrap();

        store.remove(&id);
        let saved = repo.save(&Snapshot::capture(&store, &theme)).await.unwrap();
        assert!(saved.is_some());
        assert!(repo.load().await.todos.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_file_loads_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("todos.json");
        std::fs::write(&path, "{{{{").unwrap();

        let repo = StateRepository::new(JsonFileStore::new(&path));
        assert!(repo.load().await.is_empty());

        let backup = dir.path().join("todos.corrupt.backup");
        assert_eq!(std::fs::read_to_string(&backup).unwrap(), "{{{{");
    }

    #[tokio::test]
    async fn test_save_after_unreadable_record_keeps_backup() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("todos.json");
        let original = serde_json::json!({
            "version": 2,
            "metadata": PersistenceMetadata::new(Uuid::nil()),
            "data": {
                "todos": [
                    { "id": "1", "title": "Keep 1", "created_at": "2024-01-01T00:00:00Z" },
                    { "id": "2", "created_at": "2024-01-01T00:00:00Z" },
                    { "id": "3", "title": "Keep 3", "created_at": "2024-01-02T00:00:00Z" }
                ]
            }
        })
        .to_string();
        std::fs::write(&path, &original).unwrap();

        let repo = StateRepository::new(JsonFileStore::new(&path));
        let loaded = repo.load().await;
        assert_eq!(loaded.todos.len(), 2);

        let mut store = loaded.into_store();
        store.add(NewTodo::titled("new"));
        let theme = ThemePreference::new(None, false);
        repo.save(&Snapshot::capture(&store, &theme)).await.unwrap();

        let saved = std::fs::read_to_string(&path).unwrap();
        assert!(saved.contains("Keep 1") && saved.contains("new"));
        let backup = dir.path().join("todos.corrupt.backup");
        assert_eq!(std::fs::read_to_string(&backup).unwrap(), original);
    }

    #[tokio::test]
    async fn test_newer_format_is_backed_up_before_overwrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("todos.json");
        let original = serde_json::json!({
            "version": 3,
            "metadata": PersistenceMetadata::new(Uuid::nil()),
            "data": { "todos": [{ "id": "p", "title": "Precious" }] }
        })
        .to_string();
        std::fs::write(&path, &original).unwrap();

        let repo = StateRepository::new(JsonFileStore::new(&path));
        let mut store = repo.load().await.into_store();
        assert!(store.is_empty());
        store.add(NewTodo::titled("new"));
        repo.save(&Snapshot::capture(&store, &ThemePreference::new(None, false)))
            .await
            .unwrap();

        let backup = std::fs::read_to_string(dir.path().join("todos.corrupt.backup")).unwrap();
        assert!(backup.contains("Precious"));
    }

    #[tokio::test]
    async fn test_readable_file_makes_no_backup() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("todos.json");
        let repo = StateRepository::new(JsonFileStore::new(&path));

        let mut store = TodoStore::new();
        store.add(NewTodo::titled("Fine"));
        repo.save(&Snapshot::capture(&store, &ThemePreference::new(None, false)))
            .await
            .unwrap();
        assert_eq!(repo.load().await.todos.len(), 1);
        assert!(!dir.path().join("todos.corrupt.backup").exists());
    }

    #[tokio::test]
    async fn test_legacy_array_file_is_migrated_on_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("todos.json");
        std::fs::write(
            &path,
            r#"[{"id":"a","title":"Old","completed":false,"created_at":"2024-01-01T00:00:00Z"}]"#,
        )
        .unwrap();

        let repo = StateRepository::new(JsonFileStore::new(&path));
        let loaded = repo.load().await;
        assert_eq!(loaded.todos.len(), 1);
        assert_eq!(loaded.todos[0].title, "Old");

        let raw: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["version"], 2);
    }

    #[tokio::test]
    async fn test_store_failure_degrades_to_empty() {
        let mut store = MockPersistenceStore::new();
        store.expect_exists().returning(|| true);
        store
            .expect_load()
            .times(1)
            .returning(|| Err(TodoError::Internal("disk on fire".to_string())));
        store
            .expect_backup()
            .times(1)
            .returning(|label| Ok(PathBuf::from(format!("todos.{}.backup", label))));

        let repo = StateRepository::new(store);
        assert!(repo.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_undecodable_payload_degrades_to_empty() {
        let mut store = MockPersistenceStore::new();
        store.expect_exists().returning(|| true);
        store.expect_load().returning(|| {
            Ok(StoreSnapshot {
                data: b"\xff\xfe".to_vec(),
                metadata: PersistenceMetadata::new(Uuid::nil()),
            })
        });
        store
            .expect_backup()
            .times(1)
            .returning(|_| Ok(PathBuf::from("todos.corrupt.backup")));

        let repo = StateRepository::new(store);
        assert!(repo.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_failed_backup_blocks_overwrite() {
        let mut store = MockPersistenceStore::new();
        store.expect_exists().returning(|| true);
        store
            .expect_load()
            .returning(|| Err(TodoError::Serialization("garbage".to_string())));
        store
            .expect_backup()
            .returning(|_| Err(TodoError::Io(std::io::Error::other("disk full"))));
        store.expect_save().never();

        let repo = StateRepository::new(store);
        let mut todos = repo.load().await.into_store();
        todos.add(NewTodo::titled("new"));

        let result = repo
            .save(&Snapshot::capture(&todos, &ThemePreference::new(None, false)))
            .await;
        assert!(matches!(result, Err(TodoError::Internal(_))));
    }

    #[tokio::test]
    async fn test_save_errors_propagate() {
        let mut store = MockPersistenceStore::new();
        store.expect_exists().returning(|| true);
        store
            .expect_save()
            .returning(|_| Err(TodoError::Io(std::io::Error::other("read-only"))));

        let repo = StateRepository::new(store);
        let err = repo.save(&Snapshot::new()).await.unwrap_err();
        assert!(matches!(err, TodoError::Io(_)));
    }
}
