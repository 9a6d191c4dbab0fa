// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ScriptDriver`: the non-virtual wrapper that gives the lifecycle
//! contract its two hard guarantees — `on_initialize` runs exactly once
//! before the first `on_tick`, and no hook failure (error or panic) ever
//! escapes to the caller.

use crate::{ScriptBase, ScriptContext};
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

pub struct ScriptDriver {
    script: Box<dyn ScriptBase>,
    initialized: AtomicBool,
    failures: AtomicU64,
}

impl ScriptDriver {
    pub fn new(script: Box<dyn ScriptBase>) -> Self {
        Self {
            script,
            initialized: AtomicBool::new(false),
            failures: AtomicU64::new(0),
        }
    }

    /// Total hook failures (errors or panics) observed so far.
    pub fn failure_count(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    /// Runs `on_initialize` once (the first call only), then `on_tick`.
    /// Never panics and never returns an error to the caller: failures are
    /// logged and counted, and the tick loop proceeds regardless.
    pub fn tick(&self, ctx: &mut ScriptContext<'_>, dt: Duration) {
        if !self.initialized.swap(true, Ordering::SeqCst) {
            self.guarded(ctx, |s, c| s.on_initialize(c));
        }
        self.guarded(ctx, |s, c| s.on_tick(c, dt));
    }

    pub fn activate(&self, ctx: &mut ScriptContext<'_>) {
        self.guarded(ctx, |s, c| s.on_activated(c));
    }

    pub fn deactivate(&self, ctx: &mut ScriptContext<'_>) {
        self.guarded(ctx, |s, c| s.on_deactivated(c));
    }

    fn guarded(
        &self,
        ctx: &mut ScriptContext<'_>,
        hook: impl FnOnce(&dyn ScriptBase, &mut ScriptContext<'_>) -> Result<(), crate::ScriptError>,
    ) {
        let script = self.script.as_ref();
        let outcome = std::panic::catch_unwind(AssertUnwindSafe(|| hook(script, ctx)));
        match outcome {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                self.failures.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(error = %e, "script hook returned an error");
            }
            Err(_) => {
                self.failures.fetch_add(1, Ordering::Relaxed);
                tracing::error!("script hook panicked");
            }
        }
    }
}
