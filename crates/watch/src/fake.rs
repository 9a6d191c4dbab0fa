// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake watcher for testing: lets a test manually push `FileEvent`s instead
//! of depending on real filesystem timing.

use crate::{FileEvent, GlobFilter, WatchError, WatchHandle, Watcher, WatcherDescriptor};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

#[derive(Clone, Default)]
pub struct FakeWatcher {
    senders: Arc<Mutex<Vec<mpsc::Sender<FileEvent>>>>,
}

impl FakeWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an event to every watch session currently started from this
    /// fake. Panics are not used; a full channel silently drops the event,
    /// mirroring the "notifications may be lossy" contract for errors, not
    /// events — tests should size channels generously or send one at a time.
    pub async fn push(&self, event: FileEvent) {
        let senders = self.senders.lock().clone();
        for sender in senders {
            let _ = sender.send(event.clone()).await;
        }
    }
}

#[async_trait]
impl Watcher for FakeWatcher {
    fn descriptor(&self) -> WatcherDescriptor {
        WatcherDescriptor {
            reliability: 100,
            cpu_overhead_percent: 0.0,
        }
    }

    async fn start(&self, _dir: PathBuf, _filter: GlobFilter) -> Result<WatchHandle, WatchError> {
        let (event_tx, event_rx) = mpsc::channel(256);
        let (_error_tx, error_rx) = mpsc::channel(1);
        let (stop_tx, _stop_rx) = oneshot::channel();
        self.senders.lock().push(event_tx);
        Ok(WatchHandle::new(event_rx, error_rx, stop_tx))
    }
}
