use crate::store::json_file_store::JsonEnvelope;
use crate::traits::FormatVersion;
use serde_json::{Map, Value};
use std::path::Path;
use todo_core::{TodoError, TodoResult};
use todo_domain::snapshot::TODOS_KEY;

/// Upgrades data files written in older layouts
pub struct Migrator;

impl Migrator {
    /// Detect the layout of a data file. Missing files count as current.
    pub async fn detect_version(path: &Path) -> TodoResult<FormatVersion> {
        if !path.exists() {
            return Ok(FormatVersion::V2);
        }

        let content = tokio::fs::read_to_string(path).await?;
        let value: Value =
            serde_json::from_str(&content).map_err(|e| TodoError::Serialization(e.to_string()))?;

        // A bare array is the todo list as it used to be stored on its own.
        if value.is_array() {
            return Ok(FormatVersion::V1);
        }

        if let Some(version) = value.get("version").and_then(|v| v.as_u64()) {
            return Ok(u32::try_from(version)
                .ok()
                .and_then(FormatVersion::from_u32)
                .unwrap_or(FormatVersion::V2));
        }

        Ok(FormatVersion::V2)
    }

    pub async fn migrate(from: FormatVersion, to: FormatVersion, path: &Path) -> TodoResult<()> {
        if from == to {
            return Ok(());
        }

        match (from, to) {
            (FormatVersion::V1, FormatVersion::V2) => Self::migrate_v1_to_v2(path).await,
            _ => Err(TodoError::Serialization(format!(
                "Unsupported migration: {:?} -> {:?}",
                from, to
            ))),
        }
    }

    async fn migrate_v1_to_v2(path: &Path) -> TodoResult<()> {
        let content = tokio::fs::read_to_string(path).await?;
        let todos: Value =
            serde_json::from_str(&content).map_err(|e| TodoError::Serialization(e.to_string()))?;

        let backup_path = path.with_extension("v1.backup");
        tokio::fs::copy(path, &backup_path).await?;
        tracing::info!("Created backup at {}", backup_path.display());

        let mut state = Map::new();
        state.insert(TODOS_KEY.to_string(), todos);
        let data = Value::Object(state);
        let envelope = JsonEnvelope::new(data.clone());
        tokio::fs::write(path, envelope.to_json_string()?).await?;
        tracing::info!("Migrated {} from V1 to V2 format", path.display());

        match Self::verify_migration(path, &data).await {
            Ok(()) => {
                if let Err(e) = tokio::fs::remove_file(&backup_path).await {
                    tracing::warn!(
                        "Migration succeeded but backup at {} could not be removed: {}",
                        backup_path.display(),
                        e
                    );
                }
                Ok(())
            }
            Err(e) => {
                tracing::error!(
                    "Migration verification failed: {}. Backup kept at {}",
                    e,
                    backup_path.display()
                );
                Err(e)
            }
        }
    }

    async fn verify_migration(path: &Path, expected_data: &Value) -> TodoResult<()> {
        let migrated = tokio::fs::read_to_string(path).await?;
        let envelope: JsonEnvelope = serde_json::from_str(&migrated).map_err(|e| {
            TodoError::Serialization(format!("Failed to parse migrated file: {}", e))
        })?;

        if envelope.version != FormatVersion::V2.as_u32() {
            return Err(TodoError::Serialization(format!(
                "Migrated file has version {}",
                envelope.version
            )));
        }
        if &envelope.data != expected_data {
            return Err(TodoError::Serialization(
                "Migrated data does not match original data".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn legacy_todos() -> Value {
        json!([
            {
                "id": "1718000000000-abc123def",
                "title": "Legacy item",
                "completed": true,
                "created_at": "2024-06-10T08:00:00Z"
            }
        ])
    }

    #[tokio::test]
    async fn test_detect_versions() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("todos.json");

        assert_eq!(Migrator::detect_version(&path).await.unwrap(), FormatVersion::V2);

        tokio::fs::write(&path, legacy_todos().to_string()).await.unwrap();
        assert_eq!(Migrator::detect_version(&path).await.unwrap(), FormatVersion::V1);

        let envelope = JsonEnvelope::new(json!({ "todos": [] }));
        tokio::fs::write(&path, envelope.to_json_string().unwrap())
            .await
            .unwrap();
        assert_eq!(Migrator::detect_version(&path).await.unwrap(), FormatVersion::V2);
    }

    #[tokio::test]
    async fn test_detect_version_of_garbage_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("todos.json");
        tokio::fs::write(&path, "not json").await.unwrap();
        assert!(Migrator::detect_version(&path).await.is_err());
    }

    #[tokio::test]
    async fn test_migrate_wraps_array_under_todos_key() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("todos.json");
        tokio::fs::write(&path, legacy_todos().to_string()).await.unwrap();

        Migrator::migrate(FormatVersion::V1, FormatVersion::V2, &path)
            .await
            .unwrap();

        let migrated: Value =
            serde_json::from_str(&tokio::fs::read_to_string(&path).await.unwrap()).unwrap();
        assert_eq!(migrated["version"], 2);
        assert_eq!(migrated["data"]["todos"], legacy_todos());
        assert!(!path.with_extension("v1.backup").exists());
    }

    #[tokio::test]
    async fn test_same_version_is_noop() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.json");
        Migrator::migrate(FormatVersion::V2, FormatVersion::V2, &path)
            .await
            .unwrap();
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_downgrade_is_unsupported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("todos.json");
        let result = Migrator::migrate(FormatVersion::V2, FormatVersion::V1, &path).await;
        assert!(matches!(result, Err(TodoError::Serialization(_))));
    }
}
