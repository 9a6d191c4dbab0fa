// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `World` trait: an opaque, authoritative store of per-entity
//! component state. Scripts never own entity state directly — they read
//! and write it through here, via `ScriptContext`.

use crate::EntityHandle;
use std::any::Any;

/// Type-erased component storage. Implemented by the embedding game's
/// entity/component store; this crate only defines the seam.
///
/// Kept object-safe (no generics) so it can be held as `&mut dyn World`
/// inside `ScriptContext`; the typed `get`/`try_get`/... accessors scripts
/// actually call live on `ScriptContext` and downcast through here.
pub trait World: Send + Sync {
    fn component(
        &self,
        entity: EntityHandle,
        component: std::any::TypeId,
    ) -> Option<&(dyn Any + Send + Sync)>;

    fn component_mut(
        &mut self,
        entity: EntityHandle,
        component: std::any::TypeId,
    ) -> Option<&mut (dyn Any + Send + Sync)>;

    fn insert_component(
        &mut self,
        entity: EntityHandle,
        component: std::any::TypeId,
        value: Box<dyn Any + Send + Sync>,
    );

    fn remove_component(&mut self, entity: EntityHandle, component: std::any::TypeId) -> bool;

    /// Every live entity, for global scripts that need to enumerate the
    /// world rather than act on a single entity.
    fn entities(&self) -> Vec<EntityHandle>;
}
