// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! hotscript-cache: the versioned script cache and its backup store.
//!
//! [`VersionedCache`] is the structure the tick thread and the reload
//! orchestrator share: reads are lock-free (an `ArcSwap` load per
//! `TypeId`), writes are a single atomic pointer publish. [`BackupStore`]
//! is the secondary, cold-path fallback used when a `TypeId` has no
//! `previous` entry to roll back to.

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod backup;
mod entry;
mod error;
mod file_backup;
mod versioned_cache;

pub use backup::{Backup, BackupStore, InMemoryBackupStore};
pub use entry::CacheEntry;
pub use error::CacheError;
pub use file_backup::FileBackupStore;
pub use versioned_cache::VersionedCache;
