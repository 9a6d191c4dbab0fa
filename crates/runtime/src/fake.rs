// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A minimal in-memory `World` for tests that don't need a real entity
//! store — just somewhere for component accessors to read and write.

use crate::{EntityHandle, World};
use std::any::Any;
use std::collections::HashMap;

#[derive(Default)]
pub struct FakeWorld {
    components: HashMap<(EntityHandle, std::any::TypeId), Box<dyn Any + Send + Sync>>,
}

impl FakeWorld {
    pub fn new() -> Self {
        Self::default()
    }
}

impl World for FakeWorld {
    fn component(
        &self,
        entity: EntityHandle,
        component: std::any::TypeId,
    ) -> Option<&(dyn Any + Send + Sync)> {
        self.components.get(&(entity, component)).map(|b| b.as_ref())
    }

    fn component_mut(
        &mut self,
        entity: EntityHandle,
        component: std::any::TypeId,
    ) -> Option<&mut (dyn Any + Send + Sync)> {
        self.components
            .get_mut(&(entity, component))
            .map(|b| b.as_mut())
    }

    fn insert_component(
        &mut self,
        entity: EntityHandle,
        component: std::any::TypeId,
        value: Box<dyn Any + Send + Sync>,
    ) {
        self.components.insert((entity, component), value);
    }

    fn remove_component(&mut self, entity: EntityHandle, component: std::any::TypeId) -> bool {
        self.components.remove(&(entity, component)).is_some()
    }

    fn entities(&self) -> Vec<EntityHandle> {
        let mut seen = std::collections::HashSet::new();
        for (entity, _) in self.components.keys() {
            seen.insert(*entity);
        }
        seen.into_iter().collect()
    }
}
