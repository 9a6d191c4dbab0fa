// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-`TypeId` debounce entries.
//!
//! Each entry tracks two monotonic counters: `scheduled`, bumped every time
//! a fresh event arrives for this `TypeId`, and `consumed`, set to the
//! `scheduled` value the winning timer observed when it fired. A timer only
//! proceeds to a reload if no later event arrived while it slept — i.e. if
//! `scheduled` still equals the generation it captured when it was armed.

use dashmap::DashMap;
use hotscript_core::TypeId;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Default)]
pub(crate) struct DebounceEntry {
    scheduled: AtomicU64,
    consumed: AtomicU64,
}

impl DebounceEntry {
    /// Arms a new timer generation for this entry. Returns the generation
    /// the caller's timer should check back in with, and whether a
    /// previously-armed, not-yet-fired timer was cancelled by this call.
    fn schedule(&self) -> (u64, bool) {
        let consumed = self.consumed.load(Ordering::SeqCst);
        let scheduled = self.scheduled.fetch_add(1, Ordering::SeqCst) + 1;
        let was_pending = scheduled - 1 > consumed;
        (scheduled, was_pending)
    }

    /// Called when a timer wakes up. Returns `true` if `generation` is
    /// still the latest one armed (this timer wins and should proceed to a
    /// reload); `false` if a later event superseded it.
    fn try_consume(&self, generation: u64) -> bool {
        if self.scheduled.load(Ordering::SeqCst) == generation {
            self.consumed.store(generation, Ordering::SeqCst);
            true
        } else {
            false
        }
    }
}

/// `TypeId -> DebounceEntry`. A plain concurrent map; entries are created
/// lazily on first event and never removed (a `TypeId` that stops changing
/// just accumulates one idle entry, which is cheap — two atomics).
#[derive(Default)]
pub(crate) struct DebounceTable {
    entries: DashMap<TypeId, Arc<DebounceEntry>>,
}

impl DebounceTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Arms a new timer for `type_id`, returning the entry (so the caller
    /// can later call [`DebounceEntry::try_consume`] via
    /// [`DebounceTable::try_consume`]), the generation to check back in
    /// with, and whether this call cancelled a still-pending timer.
    pub(crate) fn schedule(&self, type_id: &TypeId) -> (Arc<DebounceEntry>, u64, bool) {
        let entry = self
            .entries
            .entry(type_id.clone())
            .or_default()
            .clone();
        let (generation, was_pending) = entry.schedule();
        (entry, generation, was_pending)
    }

    pub(crate) fn try_consume(entry: &DebounceEntry, generation: u64) -> bool {
        entry.try_consume(generation)
    }
}
