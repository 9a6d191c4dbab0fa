// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ReloadStats`: counters and rolling averages readable without blocking
//! the tick loop.
//!
//! Integer counters are plain atomics. The two EWMA averages are floats
//! packed into an `AtomicU64` via `to_bits`/`from_bits`; a CAS loop would be
//! the textbook way to update a float atomically, but every writer here
//! already holds the reload permit (at most one reload in flight at a
//! time), so a relaxed load-then-store is race-free in practice and
//! cheaper.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Weight given to the newest sample. 0.2 favours stability over
/// responsiveness; a handful of slow compiles should not swing the average
/// to look like a steady-state regression.
const EWMA_ALPHA: f64 = 0.2;

#[derive(Debug, Default)]
pub struct ReloadStats {
    total: AtomicU64,
    succeeded: AtomicU64,
    failed: AtomicU64,
    rollbacks: AtomicU64,
    debounced_events: AtomicU64,
    /// Denominator for debounce efficiency; reset at `start()` per the
    /// resolved ambiguity over what it means across restarts.
    total_events: AtomicU64,
    avg_compile_ms: AtomicU64,
    avg_reload_ms: AtomicU64,
}

/// Point-in-time snapshot; individually-monotonic fields may come from
/// slightly different moments relative to one another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatsSnapshot {
    pub total: u64,
    pub succeeded: u64,
    pub failed: u64,
    pub rollbacks: u64,
    pub debounced_events: u64,
    pub total_events: u64,
    pub avg_compile_ms: f64,
    pub avg_reload_ms: f64,
}

impl StatsSnapshot {
    /// `debounced_events / total_events`, or `0.0` before any event arrives.
    pub fn debounce_efficiency(&self) -> f64 {
        if self.total_events == 0 {
            0.0
        } else {
            self.debounced_events as f64 / self.total_events as f64
        }
    }
}

impl ReloadStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zeroes every counter and average. Called once by `start()`.
    pub fn reset(&self) {
        self.total.store(0, Ordering::Relaxed);
        self.succeeded.store(0, Ordering::Relaxed);
        self.failed.store(0, Ordering::Relaxed);
        self.rollbacks.store(0, Ordering::Relaxed);
        self.debounced_events.store(0, Ordering::Relaxed);
        self.total_events.store(0, Ordering::Relaxed);
        self.avg_compile_ms.store(0, Ordering::Relaxed);
        self.avg_reload_ms.store(0, Ordering::Relaxed);
    }

    pub fn record_event(&self) {
        self.total_events.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_debounced(&self) {
        self.debounced_events.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_success(&self, compile_time: Duration, reload_time: Duration) {
        self.total.fetch_add(1, Ordering::Relaxed);
        self.succeeded.fetch_add(1, Ordering::Relaxed);
        update_ewma(&self.avg_compile_ms, compile_time.as_secs_f64() * 1000.0);
        update_ewma(&self.avg_reload_ms, reload_time.as_secs_f64() * 1000.0);
    }

    pub fn record_failure(&self, compile_time: Duration, reload_time: Duration, rolled_back: bool) {
        self.total.fetch_add(1, Ordering::Relaxed);
        self.failed.fetch_add(1, Ordering::Relaxed);
        if rolled_back {
            self.rollbacks.fetch_add(1, Ordering::Relaxed);
        }
        update_ewma(&self.avg_compile_ms, compile_time.as_secs_f64() * 1000.0);
        update_ewma(&self.avg_reload_ms, reload_time.as_secs_f64() * 1000.0);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            total: self.total.load(Ordering::Relaxed),
            succeeded: self.succeeded.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            rollbacks: self.rollbacks.load(Ordering::Relaxed),
            debounced_events: self.debounced_events.load(Ordering::Relaxed),
            total_events: self.total_events.load(Ordering::Relaxed),
            avg_compile_ms: f64::from_bits(self.avg_compile_ms.load(Ordering::Relaxed)),
            avg_reload_ms: f64::from_bits(self.avg_reload_ms.load(Ordering::Relaxed)),
        }
    }
}

fn update_ewma(cell: &AtomicU64, sample_ms: f64) {
    let previous = f64::from_bits(cell.load(Ordering::Relaxed));
    let updated = if previous == 0.0 {
        sample_ms
    } else {
        EWMA_ALPHA * sample_ms + (1.0 - EWMA_ALPHA) * previous
    };
    cell.store(updated.to_bits(), Ordering::Relaxed);
}
