// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The compiler's opaque output: something that can be turned into a
//! running script instance.

use crate::{ArtifactError, ScriptBase};

/// Owned by a cache entry; disposable when no longer referenced. Produced
/// by the external compiler, resolved to a concrete `ScriptBase` lazily by
/// the cache the first time a tick thread asks for an instance.
pub trait Artifact: Send + Sync {
    fn instantiate(&self) -> Result<Box<dyn ScriptBase>, ArtifactError>;
}
