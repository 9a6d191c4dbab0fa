// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ScriptContext`: the value passed to a script per lifecycle call.
//!
//! Lifetime: the duration of one lifecycle call. Callees must not retain
//! it — enforced structurally by the borrow, since it is always passed as
//! `&mut ScriptContext<'_>`.

use crate::world::World;
use crate::{EntityHandle, ServiceFacade, WorldError};
use hotscript_core::TypeId;
use std::any::Any;
use std::sync::Arc;

/// Thin logging facade bound to the owning script's identity, so every log
/// line a script emits carries its `type_id` and (if entity-scoped) its
/// entity without the script having to thread that through itself.
#[derive(Clone)]
pub struct ContextLogger {
    type_id: TypeId,
    entity: Option<EntityHandle>,
}

impl ContextLogger {
    fn new(type_id: TypeId, entity: Option<EntityHandle>) -> Self {
        Self { type_id, entity }
    }

    pub fn info(&self, message: &str) {
        tracing::info!(type_id = %self.type_id, entity = ?self.entity.map(EntityHandle::raw), "{message}");
    }

    pub fn warn(&self, message: &str) {
        tracing::warn!(type_id = %self.type_id, entity = ?self.entity.map(EntityHandle::raw), "{message}");
    }

    pub fn error(&self, message: &str) {
        tracing::error!(type_id = %self.type_id, entity = ?self.entity.map(EntityHandle::raw), "{message}");
    }
}

/// Per-call view of the world given to a script's lifecycle hooks.
pub struct ScriptContext<'a> {
    world: &'a mut dyn World,
    entity: Option<EntityHandle>,
    services: Arc<dyn ServiceFacade>,
    logger: ContextLogger,
}

impl<'a> ScriptContext<'a> {
    pub fn new(
        type_id: TypeId,
        world: &'a mut dyn World,
        entity: Option<EntityHandle>,
        services: Arc<dyn ServiceFacade>,
    ) -> Self {
        let logger = ContextLogger::new(type_id, entity);
        Self {
            world,
            entity,
            services,
            logger,
        }
    }

    pub fn is_entity(&self) -> bool {
        self.entity.is_some()
    }

    pub fn is_global(&self) -> bool {
        self.entity.is_none()
    }

    pub fn entity(&self) -> Option<EntityHandle> {
        self.entity
    }

    pub fn logger(&self) -> &ContextLogger {
        &self.logger
    }

    pub fn services(&self) -> &Arc<dyn ServiceFacade> {
        &self.services
    }

    /// All live entities, for global scripts.
    pub fn entities(&self) -> Vec<EntityHandle> {
        self.world.entities()
    }

    fn entity_or_err(&self) -> Result<EntityHandle, WorldError> {
        self.entity.ok_or(WorldError::NoEntityInScope)
    }

    /// Get a component, failing if it is absent.
    pub fn get<T: Any + Send + Sync>(&mut self) -> Result<&mut T, WorldError> {
        let entity = self.entity_or_err()?;
        self.world
            .component_mut(entity, std::any::TypeId::of::<T>())
            .ok_or(WorldError::ComponentMissing)?
            .downcast_mut::<T>()
            .ok_or(WorldError::TypeMismatch)
    }

    /// Get a component if present.
    pub fn try_get<T: Any + Send + Sync>(&mut self) -> Option<&mut T> {
        let entity = self.entity?;
        self.world
            .component_mut(entity, std::any::TypeId::of::<T>())
            .and_then(|c| c.downcast_mut::<T>())
    }

    /// Get a component, inserting `T::default()` if absent.
    pub fn get_or_add<T: Any + Send + Sync + Default>(&mut self) -> Result<&mut T, WorldError> {
        let entity = self.entity_or_err()?;
        if self
            .world
            .component(entity, std::any::TypeId::of::<T>())
            .is_none()
        {
            self.world
                .insert_component(entity, std::any::TypeId::of::<T>(), Box::new(T::default()));
        }
        self.world
            .component_mut(entity, std::any::TypeId::of::<T>())
            .ok_or(WorldError::ComponentMissing)?
            .downcast_mut::<T>()
            .ok_or(WorldError::TypeMismatch)
    }

    pub fn has<T: Any + Send + Sync>(&self) -> bool {
        match self.entity {
            Some(entity) => self
                .world
                .component(entity, std::any::TypeId::of::<T>())
                .is_some(),
            None => false,
        }
    }

    pub fn remove<T: Any + Send + Sync>(&mut self) -> bool {
        match self.entity {
            Some(entity) => self
                .world
                .remove_component(entity, std::any::TypeId::of::<T>()),
            None => false,
        }
    }
}
