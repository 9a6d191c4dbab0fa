// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use hotscript_runtime::ArtifactError;
use thiserror::Error;

/// Errors surfaced by [`crate::VersionedCache::instance`].
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("no cache entry for this type id")]
    NotFound,
    #[error("failed to construct script instance: {0}")]
    Construction(#[from] ArtifactError),
}
