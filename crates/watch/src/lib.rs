// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! hotscript-watch: the change detector.
//!
//! Surfaces a coalesced stream of [`FileEvent`]s restricted to a base
//! directory and a [`GlobFilter`], hiding platform differences behind the
//! [`Watcher`] trait. A [`WatcherFactory`] picks the right implementation
//! for a given path.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod event;
mod factory;
mod filter;
mod native;
mod polling;

pub use event::{EventKind, FileEvent};
pub use factory::{WatcherFactory, WatcherStrategy};
pub use filter::GlobFilter;
pub use native::NativeWatcher;
pub use polling::PollingWatcher;

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors surfaced by a [`Watcher`].
#[derive(Debug, Error)]
pub enum WatchError {
    /// Surfaced on the error channel; the watcher continues running.
    #[error("transient watch error: {0}")]
    Transient(String),
    /// Terminates the event stream; the orchestrator logs and stops.
    #[error("fatal watch error: {0}")]
    Fatal(String),
}

/// Reliability/cost characteristics of a watcher implementation, used by the
/// factory to describe its choice and by callers for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WatcherDescriptor {
    /// 0-100: how reliably this implementation delivers real change events.
    pub reliability: u8,
    pub cpu_overhead_percent: f32,
}

/// A running watch session: an event stream, an error stream, and a way to
/// stop both. Safe to stop concurrently with delivery.
pub struct WatchHandle {
    pub events: mpsc::Receiver<FileEvent>,
    pub errors: mpsc::Receiver<WatchError>,
    stop_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl WatchHandle {
    pub(crate) fn new(
        events: mpsc::Receiver<FileEvent>,
        errors: mpsc::Receiver<WatchError>,
        stop_tx: tokio::sync::oneshot::Sender<()>,
    ) -> Self {
        Self {
            events,
            errors,
            stop_tx: Some(stop_tx),
        }
    }

    /// Stop the watcher. Safe to call more than once; subsequent calls are a
    /// no-op.
    pub fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Hides platform differences behind a single async contract.
#[async_trait]
pub trait Watcher: Send + Sync {
    fn descriptor(&self) -> WatcherDescriptor;

    /// Begin watching `dir` for files matching `filter`. Returns a handle
    /// with the coalesced event stream.
    async fn start(&self, dir: PathBuf, filter: GlobFilter) -> Result<WatchHandle, WatchError>;
}

#[cfg(any(test, feature = "test-support"))]
pub mod fake;
