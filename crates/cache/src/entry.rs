// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `CacheEntry`: one versioned artifact and its lazily-constructed
//! instance, plus a link to the entry it replaced.

use hotscript_runtime::{Artifact, ScriptDriver};
use parking_lot::Mutex;
use std::sync::{Arc, OnceLock};
use std::time::Instant;

/// Invariants (enforced by [`crate::VersionedCache`], not by this type
/// alone): `version` is strictly greater than `previous.version`; `instance`
/// transitions at most once from empty to occupied outside of
/// [`crate::VersionedCache::clear_instance`], which installs a fresh entry
/// rather than mutating this one in place.
pub struct CacheEntry {
    pub(crate) version: u64,
    pub(crate) artifact: Arc<dyn Artifact>,
    pub(crate) instance: OnceLock<Arc<ScriptDriver>>,
    pub(crate) construct_lock: Mutex<()>,
    pub(crate) last_updated: Instant,
    pub(crate) previous: Option<Arc<CacheEntry>>,
}

impl CacheEntry {
    pub(crate) fn new(
        version: u64,
        artifact: Arc<dyn Artifact>,
        previous: Option<Arc<CacheEntry>>,
    ) -> Self {
        Self {
            version,
            artifact,
            instance: OnceLock::new(),
            construct_lock: Mutex::new(()),
            last_updated: Instant::now(),
            previous,
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn artifact(&self) -> &Arc<dyn Artifact> {
        &self.artifact
    }

    pub fn last_updated(&self) -> Instant {
        self.last_updated
    }

    pub fn has_instance(&self) -> bool {
        self.instance.get().is_some()
    }

    pub fn previous(&self) -> Option<&Arc<CacheEntry>> {
        self.previous.as_ref()
    }
}
