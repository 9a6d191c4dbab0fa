// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The lifecycle contract a compiled script type implements.

use crate::{ScriptContext, ScriptError};
use std::time::Duration;

/// Four optional hooks. Stateless w.r.t. per-entity data: implementors must
/// hold no mutable fields derived from entity state, since a single
/// instance is shared across every entity that references the same
/// `TypeId`. This is a review-time contract, not something this trait can
/// enforce mechanically.
///
/// Hooks take `&self`, not `&mut self`: per-entity mutation belongs in
/// `ScriptContext`'s component accessors, never in script fields.
pub trait ScriptBase: Send + Sync {
    fn on_initialize(&self, _ctx: &mut ScriptContext<'_>) -> Result<(), ScriptError> {
        Ok(())
    }

    fn on_activated(&self, _ctx: &mut ScriptContext<'_>) -> Result<(), ScriptError> {
        Ok(())
    }

    fn on_tick(&self, _ctx: &mut ScriptContext<'_>, _dt: Duration) -> Result<(), ScriptError> {
        Ok(())
    }

    fn on_deactivated(&self, _ctx: &mut ScriptContext<'_>) -> Result<(), ScriptError> {
        Ok(())
    }
}
