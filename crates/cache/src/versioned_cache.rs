// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The versioned cache: an `update`/`rollback` pair with O(1) cost, a
//! lazily-constructed instance per entry, and lock-free reads.

use crate::{CacheEntry, CacheError};
use arc_swap::ArcSwap;
use dashmap::DashMap;
use hotscript_core::TypeId;
use hotscript_runtime::{Artifact, ScriptDriver};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Top-level lock-free map plus the global version counter. Cloning is
/// cheap (`Arc`-backed internals would be the natural extension if this
/// needs to be shared by value; for now it's shared by reference, matching
/// how the orchestrator owns a single instance for the process lifetime).
pub struct VersionedCache {
    entries: DashMap<TypeId, ArcSwap<CacheEntry>>,
    version_counter: AtomicU64,
}

impl VersionedCache {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            version_counter: AtomicU64::new(0),
        }
    }

    /// Installs `artifact` as the current entry for `type_id`, linking the
    /// outgoing entry (if any) as `previous`. Always succeeds; returns the
    /// new version.
    ///
    /// The outgoing entry is relinked with its own `previous` dropped, so
    /// the chain never grows past two entries no matter how many updates
    /// land — only one rollback step is ever needed or possible.
    pub fn update(&self, type_id: &TypeId, artifact: Arc<dyn Artifact>) -> u64 {
        let new_version = self.version_counter.fetch_add(1, Ordering::SeqCst) + 1;
        let previous = self.entries.get(type_id).map(|slot| {
            let outgoing = slot.load_full();
            Arc::new(CacheEntry::new(
                outgoing.version,
                outgoing.artifact.clone(),
                None,
            ))
        });
        let new_entry = Arc::new(CacheEntry::new(new_version, artifact, previous));
        self.entries
            .entry(type_id.clone())
            .and_modify(|slot| slot.store(new_entry.clone()))
            .or_insert_with(|| ArcSwap::from(new_entry));
        new_version
    }

    /// Lock-free lookup of the current entry's constructed instance.
    /// Construction happens at most once per entry, guarded by the entry's
    /// own mutex; subsequent callers (including ones that raced the first
    /// construction) observe the published instance without locking.
    pub fn instance(&self, type_id: &TypeId) -> Result<Arc<ScriptDriver>, CacheError> {
        let entry = self
            .entries
            .get(type_id)
            .map(|slot| slot.load_full())
            .ok_or(CacheError::NotFound)?;

        if let Some(driver) = entry.instance.get() {
            return Ok(driver.clone());
        }

        let _guard = entry.construct_lock.lock();
        if let Some(driver) = entry.instance.get() {
            return Ok(driver.clone());
        }
        let script = entry.artifact.instantiate()?;
        let driver = Arc::new(ScriptDriver::new(script));
        // Another thread cannot have won this race: `_guard` excludes them.
        let _ = entry.instance.set(driver.clone());
        Ok(driver)
    }

    pub fn version(&self, type_id: &TypeId) -> Option<u64> {
        self.entries.get(type_id).map(|slot| slot.load().version)
    }

    /// Atomically replaces the current entry with its `previous`, if any.
    /// O(1), performs zero compiler invocations.
    pub fn rollback(&self, type_id: &TypeId) -> bool {
        let Some(slot) = self.entries.get(type_id) else {
            return false;
        };
        let current = slot.load_full();
        let Some(previous) = current.previous.clone() else {
            return false;
        };
        slot.store(previous);
        true
    }

    /// Resets the current entry's instance slot to empty by installing a
    /// fresh entry with the same version/artifact/previous chain. Forces
    /// re-construction on the next [`Self::instance`] call.
    ///
    /// Diagnostic tool only — not part of the normal reload path.
    pub fn clear_instance(&self, type_id: &TypeId) -> bool {
        let Some(slot) = self.entries.get(type_id) else {
            return false;
        };
        let current = slot.load_full();
        let refreshed = Arc::new(CacheEntry::new(
            current.version,
            current.artifact.clone(),
            current.previous.clone(),
        ));
        slot.store(refreshed);
        true
    }

    /// Removes the entry and its entire chain.
    pub fn remove(&self, type_id: &TypeId) -> bool {
        self.entries.remove(type_id).is_some()
    }

    /// Diagnostic: walks the `previous` chain. Must stabilise at ≤ 2 after
    /// any quiescent interval.
    pub fn history_depth(&self, type_id: &TypeId) -> usize {
        let Some(slot) = self.entries.get(type_id) else {
            return 0;
        };
        let mut depth = 0;
        let mut cursor = Some(slot.load_full());
        while let Some(entry) = cursor {
            depth += 1;
            cursor = entry.previous.clone();
        }
        depth
    }

    /// Snapshot of the current entry, for callers (the orchestrator's
    /// backup path) that need the artifact and version together.
    pub fn current(&self, type_id: &TypeId) -> Option<Arc<CacheEntry>> {
        self.entries.get(type_id).map(|slot| slot.load_full())
    }
}

impl Default for VersionedCache {
    fn default() -> Self {
        Self::new()
    }
}
