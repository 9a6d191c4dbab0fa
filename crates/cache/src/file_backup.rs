// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Disk-backed backup store.
//!
//! An `Artifact` is an opaque compiled object and cannot be serialized, so
//! what reaches disk is metadata only: type id, version, creation time, and
//! the optional source snapshot bytes. This is enough for post-crash
//! auditing, not for rehydrating a working script after a process
//! restart: within a process, restores are served from the in-memory
//! side, which is the only place a live `Arc<dyn Artifact>` can come
//! from.

use crate::{Backup, BackupStore, InMemoryBackupStore};
use async_trait::async_trait;
use hotscript_core::TypeId;
use hotscript_runtime::Artifact;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use tracing::warn;

#[derive(Serialize, Deserialize)]
struct BackupMetadata {
    type_id: String,
    version: u64,
    created_at: SystemTime,
    source_snapshot: Option<Vec<u8>>,
}

/// Best-effort disk persistence layered over an [`InMemoryBackupStore`]. A
/// write failure is logged at `warn` and never fails the reload pipeline —
/// backups are a secondary path.
pub struct FileBackupStore {
    dir: PathBuf,
    memory: InMemoryBackupStore,
}

impl FileBackupStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            memory: InMemoryBackupStore::new(),
        }
    }

    fn metadata_path(&self, type_id: &TypeId) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize(type_id.as_str())))
    }

    async fn write_metadata(&self, backup: &Backup) {
        if let Err(e) = self.try_write_metadata(backup).await {
            warn!(type_id = %backup.type_id, error = %e, "failed to persist backup metadata");
        }
    }

    async fn try_write_metadata(&self, backup: &Backup) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let metadata = BackupMetadata {
            type_id: backup.type_id.as_str().to_string(),
            version: backup.version,
            created_at: backup.created_at,
            source_snapshot: backup.source_snapshot.clone(),
        };
        let json = serde_json::to_vec_pretty(&metadata)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        let path = self.metadata_path(&backup.type_id);
        let tmp_path = path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, json).await?;
        tokio::fs::rename(&tmp_path, &path).await
    }

    async fn remove_metadata(&self, type_id: &TypeId) {
        let path = self.metadata_path(type_id);
        if let Err(e) = tokio::fs::remove_file(&path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(type_id = %type_id, error = %e, "failed to remove backup metadata file");
            }
        }
    }
}

fn sanitize(type_id: &str) -> String {
    type_id.replace(['/', '\\'], "_")
}

#[async_trait]
impl BackupStore for FileBackupStore {
    async fn create(&self, type_id: &TypeId, artifact: Option<Arc<dyn Artifact>>, version: u64) {
        self.memory.put(Backup {
            type_id: type_id.clone(),
            artifact,
            version,
            created_at: SystemTime::now(),
            source_snapshot: None,
        });
        if let Some(backup) = self.memory.get(type_id) {
            self.write_metadata(&backup).await;
        }
    }

    async fn restore(&self, type_id: &TypeId) -> Option<(Arc<dyn Artifact>, u64)> {
        self.memory.restore(type_id).await
    }

    async fn clear(&self, type_id: &TypeId) {
        self.memory.forget(type_id);
        self.remove_metadata(type_id).await;
    }
}

impl FileBackupStore {
    /// Reads back the on-disk metadata for diagnostics (e.g. to show an
    /// operator what the last-known-good version was across a restart,
    /// even though the artifact itself can't be restored from it).
    pub async fn read_metadata_for_diagnostics(
        &self,
        type_id: &TypeId,
    ) -> Option<(u64, SystemTime)> {
        let path = self.metadata_path(type_id);
        let bytes = tokio::fs::read(&path).await.ok()?;
        let metadata: BackupMetadata = serde_json::from_slice(&bytes).ok()?;
        Some((metadata.version, metadata.created_at))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotscript_runtime::{ArtifactError, ScriptBase};
    use tempfile::tempdir;

    struct StubScript;
    impl ScriptBase for StubScript {}
    struct StubArtifact;
    impl Artifact for StubArtifact {
        fn instantiate(&self) -> Result<Box<dyn ScriptBase>, ArtifactError> {
            Ok(Box::new(StubScript))
        }
    }

    #[tokio::test]
    async fn create_persists_metadata_and_restore_serves_from_memory() {
        let dir = tempdir().unwrap();
        let store = FileBackupStore::new(dir.path());
        let type_id = TypeId::new("pikachu");
        store.create(&type_id, Some(Arc::new(StubArtifact)), 2).await;

        let (_artifact, version) = store.restore(&type_id).await.unwrap();
        assert_eq!(version, 2);

        let (disk_version, _) = store
            .read_metadata_for_diagnostics(&type_id)
            .await
            .unwrap();
        assert_eq!(disk_version, 2);
    }

    #[tokio::test]
    async fn clear_removes_both_memory_entry_and_metadata_file() {
        let dir = tempdir().unwrap();
        let store = FileBackupStore::new(dir.path());
        let type_id = TypeId::new("pikachu");
        store.create(&type_id, Some(Arc::new(StubArtifact)), 1).await;
        store.clear(&type_id).await;

        assert!(store.restore(&type_id).await.is_none());
        assert!(store
            .read_metadata_for_diagnostics(&type_id)
            .await
            .is_none());
    }

    #[tokio::test]
    async fn type_ids_with_path_separators_sanitize_to_a_flat_filename() {
        let dir = tempdir().unwrap();
        let store = FileBackupStore::new(dir.path());
        let type_id = TypeId::new("enemies/pikachu");
        store.create(&type_id, Some(Arc::new(StubArtifact)), 1).await;

        let expected = dir.path().join("enemies_pikachu.json");
        assert!(expected.exists());
    }
}
