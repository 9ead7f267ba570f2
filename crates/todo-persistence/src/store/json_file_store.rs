use crate::migration::Migrator;
use crate::store::atomic_writer::AtomicWriter;
use crate::traits::{
    FormatVersion, PersistenceMetadata, PersistenceStore, StoreSnapshot, CURRENT_FORMAT_VERSION,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use todo_core::{TodoError, TodoResult};
use uuid::Uuid;

/// JSON file-backed store
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    instance_id: Uuid,
}

/// On-disk layout: `{ "version": 2, "metadata": {...}, "data": {...} }`
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonEnvelope {
    pub version: u32,
    pub metadata: PersistenceMetadata,
    pub data: Value,
}

impl JsonEnvelope {
    pub fn new(data: Value) -> Self {
        Self {
            version: CURRENT_FORMAT_VERSION,
            metadata: PersistenceMetadata::new(Uuid::new_v4()),
            data,
        }
    }

    pub fn to_json_string(&self) -> TodoResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| TodoError::Serialization(e.to_string()))
    }
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            instance_id: Uuid::new_v4(),
        }
    }

    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl PersistenceStore for JsonFileStore {
    async fn save(&self, mut snapshot: StoreSnapshot) -> TodoResult<PersistenceMetadata> {
        snapshot.metadata.instance_id = self.instance_id;
        snapshot.metadata.saved_at = chrono::Utc::now();

        let data: Value = serde_json::from_slice(&snapshot.data)
            .map_err(|e| TodoError::Serialization(e.to_string()))?;
        let envelope = JsonEnvelope {
            version: CURRENT_FORMAT_VERSION,
            metadata: snapshot.metadata.clone(),
            data,
        };

        let json_bytes = serde_json::to_vec_pretty(&envelope)
            .map_err(|e| TodoError::Serialization(e.to_string()))?;
        AtomicWriter::write_atomic(&self.path, &json_bytes).await?;

        tracing::info!(
            "Saved {} bytes to {}",
            json_bytes.len(),
            self.path.display()
        );
        Ok(snapshot.metadata)
    }

    async fn load(&self) -> TodoResult<StoreSnapshot> {
        if Migrator::detect_version(&self.path).await? == FormatVersion::V1 {
            tracing::info!(
                "Detected legacy todo array at {}. Migrating...",
                self.path.display()
            );
            Migrator::migrate(FormatVersion::V1, FormatVersion::V2, &self.path).await?;
        }

        let file_bytes = AtomicWriter::read_all(&self.path).await?;
        let envelope: JsonEnvelope = serde_json::from_slice(&file_bytes)
            .map_err(|e| TodoError::Serialization(e.to_string()))?;

        if envelope.version != CURRENT_FORMAT_VERSION {
            return Err(TodoError::Serialization(format!(
                "Unsupported format version: {}",
                envelope.version
            )));
        }

        let data = serde_json::to_vec(&envelope.data)
            .map_err(|e| TodoError::Serialization(e.to_string()))?;

        tracing::info!(
            "Loaded {} bytes from {}",
            file_bytes.len(),
            self.path.display()
        );
        Ok(StoreSnapshot {
            data,
            metadata: envelope.metadata,
        })
    }

    async fn exists(&self) -> bool {
        tokio::fs::try_exists(&self.path).await.unwrap_or(false)
    }

    async fn backup(&self, label: &str) -> TodoResult<PathBuf> {
        let backup_path = self.path.with_extension(format!("{}.backup", label));
        tokio::fs::copy(&self.path, &backup_path).await?;
        tracing::info!("Copied {} to {}", self.path.display(), backup_path.display());
        Ok(backup_path)
    }
}
