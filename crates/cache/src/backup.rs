// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The cold-path fallback: preserves the last-known-good artifact and
//! version for a `TypeId` across the window where the cache has no
//! usable `previous` entry (initial loads, explicit removal, or, for the
//! in-memory variant, nothing at all after a process restart).

use async_trait::async_trait;
use dashmap::DashMap;
use hotscript_core::TypeId;
use hotscript_runtime::Artifact;
use std::sync::Arc;
use std::time::SystemTime;

/// `{ type_id, artifact?, version, created_at, source_snapshot? }`. Created
/// before each compile attempt and cleared on success; `artifact` is
/// `None` for the "initial load" path, where there was nothing current to
/// back up.
#[derive(Clone)]
pub struct Backup {
    pub type_id: TypeId,
    pub artifact: Option<Arc<dyn Artifact>>,
    pub version: u64,
    pub created_at: SystemTime,
    pub source_snapshot: Option<Vec<u8>>,
}

/// Invoked only when [`crate::VersionedCache::rollback`] returns `false` —
/// this bounds disk I/O, where it exists, to the cold path.
#[async_trait]
pub trait BackupStore: Send + Sync {
    async fn create(&self, type_id: &TypeId, artifact: Option<Arc<dyn Artifact>>, version: u64);
    async fn restore(&self, type_id: &TypeId) -> Option<(Arc<dyn Artifact>, u64)>;
    async fn clear(&self, type_id: &TypeId);
}

/// In-process backup store. Sufficient on its own for the in-process
/// rollback path; does not survive a restart.
#[derive(Default)]
pub struct InMemoryBackupStore {
    backups: DashMap<TypeId, Backup>,
}

impl InMemoryBackupStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn get(&self, type_id: &TypeId) -> Option<Backup> {
        self.backups.get(type_id).map(|b| b.clone())
    }

    pub(crate) fn put(&self, backup: Backup) {
        self.backups.insert(backup.type_id.clone(), backup);
    }

    pub(crate) fn forget(&self, type_id: &TypeId) {
        self.backups.remove(type_id);
    }
}

#[async_trait]
impl BackupStore for InMemoryBackupStore {
    async fn create(&self, type_id: &TypeId, artifact: Option<Arc<dyn Artifact>>, version: u64) {
        self.put(Backup {
            type_id: type_id.clone(),
            artifact,
            version,
            created_at: SystemTime::now(),
            source_snapshot: None,
        });
    }

    async fn restore(&self, type_id: &TypeId) -> Option<(Arc<dyn Artifact>, u64)> {
        let backup = self.get(type_id)?;
        let artifact = backup.artifact?;
        Some((artifact, backup.version))
    }

    async fn clear(&self, type_id: &TypeId) {
        self.forget(type_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotscript_runtime::{ArtifactError, ScriptBase};

    struct StubScript;
    impl ScriptBase for StubScript {}
    struct StubArtifact;
    impl Artifact for StubArtifact {
        fn instantiate(&self) -> Result<Box<dyn ScriptBase>, ArtifactError> {
            Ok(Box::new(StubScript))
        }
    }

    #[tokio::test]
    async fn create_then_restore_round_trips_artifact_and_version() {
        let store = InMemoryBackupStore::new();
        let type_id = TypeId::new("pikachu");
        store.create(&type_id, Some(Arc::new(StubArtifact)), 3).await;

        let (_artifact, version) = store.restore(&type_id).await.unwrap();
        assert_eq!(version, 3);
    }

    #[tokio::test]
    async fn restore_with_no_artifact_on_record_returns_none() {
        let store = InMemoryBackupStore::new();
        let type_id = TypeId::new("bulbasaur");
        store.create(&type_id, None, 0).await;
        assert!(store.restore(&type_id).await.is_none());
    }

    #[tokio::test]
    async fn restore_on_unknown_type_id_returns_none() {
        let store = InMemoryBackupStore::new();
        assert!(store.restore(&TypeId::new("missingno")).await.is_none());
    }

    #[tokio::test]
    async fn clear_removes_the_backup() {
        let store = InMemoryBackupStore::new();
        let type_id = TypeId::new("pikachu");
        store.create(&type_id, Some(Arc::new(StubArtifact)), 1).await;
        store.clear(&type_id).await;
        assert!(store.restore(&type_id).await.is_none());
    }

    #[tokio::test]
    async fn create_is_idempotent_overwrite() {
        let store = InMemoryBackupStore::new();
        let type_id = TypeId::new("pikachu");
        store.create(&type_id, Some(Arc::new(StubArtifact)), 1).await;
        store.create(&type_id, Some(Arc::new(StubArtifact)), 2).await;
        let (_artifact, version) = store.restore(&type_id).await.unwrap();
        assert_eq!(version, 2);
    }
}
