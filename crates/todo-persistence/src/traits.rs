use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use todo_core::TodoResult;
use uuid::Uuid;

/// Current on-disk envelope version.
pub const CURRENT_FORMAT_VERSION: u32 = 2;

/// Metadata written alongside the stored state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistenceMetadata {
    pub format_version: u32,
    /// Process that performed the save
    pub instance_id: Uuid,
    pub saved_at: DateTime<Utc>,
}

impl PersistenceMetadata {
    pub fn new(instance_id: Uuid) -> Self {
        Self {
            format_version: CURRENT_FORMAT_VERSION,
            instance_id,
            saved_at: Utc::now(),
        }
    }
}

/// Serialized state plus its metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSnapshot {
    /// JSON bytes of the persisted key/value object
    pub data: Vec<u8>,
    pub metadata: PersistenceMetadata,
}

/// Backend-agnostic storage of a whole-state snapshot.
/// Every save replaces the previous one; last write wins.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PersistenceStore: Send + Sync {
    async fn save(&self, snapshot: StoreSnapshot) -> TodoResult<PersistenceMetadata>;

    async fn load(&self) -> TodoResult<StoreSnapshot>;

    async fn exists(&self) -> bool;

    /// Copy the stored state aside under `label`, returning where it went.
    async fn backup(&self, label: &str) -> TodoResult<PathBuf>;
}

/// Serialization strategy for stored data
pub trait Serializer<T: Send + Sync>: Send + Sync {
    fn serialize(&self, data: &T) -> TodoResult<Vec<u8>>;

    fn deserialize(&self, bytes: &[u8]) -> TodoResult<T>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FormatVersion {
    /// Bare JSON array of todos
    V1,
    /// Versioned envelope holding the key/value state object
    V2,
}

impl FormatVersion {
    pub fn as_u32(self) -> u32 {
        match self {
            Self::V1 => 1,
            Self::V2 => 2,
        }
    }

    pub fn from_u32(v: u32) -> Option<Self> {
        match v {
            1 => Some(Self::V1),
            2 => Some(Self::V2),
            _ => None,
        }
    }
}
