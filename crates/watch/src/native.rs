// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Native adapter: subscribes to the OS file notification facility.
//!
//! Fast and low CPU, but known to silently drop events on network shares,
//! containers, and mounted foreign filesystems — the [`WatcherFactory`]
//! routes those paths to [`PollingWatcher`] instead.
//!
//! [`WatcherFactory`]: crate::WatcherFactory
//! [`PollingWatcher`]: crate::PollingWatcher

use crate::{EventKind, FileEvent, GlobFilter, WatchError, WatchHandle, Watcher, WatcherDescriptor};
use async_trait::async_trait;
use notify::{Event as NotifyEvent, EventKind as NotifyEventKind, RecommendedWatcher, RecursiveMode, Watcher as _};
use std::path::PathBuf;
use tokio::sync::{mpsc, oneshot};

#[derive(Debug, Default)]
pub struct NativeWatcher;

impl NativeWatcher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Watcher for NativeWatcher {
    fn descriptor(&self) -> WatcherDescriptor {
        WatcherDescriptor {
            reliability: 70,
            cpu_overhead_percent: 0.5,
        }
    }

    async fn start(&self, dir: PathBuf, filter: GlobFilter) -> Result<WatchHandle, WatchError> {
        let (raw_tx, mut raw_rx) = mpsc::channel::<Result<NotifyEvent, notify::Error>>(256);

        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = raw_tx.blocking_send(res);
        })
        .map_err(|e| WatchError::Fatal(e.to_string()))?;

        watcher
            .watch(&dir, RecursiveMode::Recursive)
            .map_err(|e| WatchError::Fatal(e.to_string()))?;

        let (event_tx, event_rx) = mpsc::channel(256);
        let (error_tx, error_rx) = mpsc::channel(64);
        let (stop_tx, mut stop_rx) = oneshot::channel();

        tokio::spawn(async move {
            // Keep the watcher alive for as long as this task runs.
            let _watcher = watcher;
            loop {
                tokio::select! {
                    _ = &mut stop_rx => {
                        tracing::debug!(dir = %dir.display(), "native watcher stopping");
                        break;
                    }
                    msg = raw_rx.recv() => {
                        match msg {
                            Some(Ok(event)) => {
                                for path in &event.paths {
                                    if !filter.matches(path) {
                                        continue;
                                    }
                                    let Some(kind) = translate(&event.kind) else {
                                        continue;
                                    };
                                    tracing::debug!(path = %path.display(), ?kind, "native watcher event");
                                    if event_tx.send(FileEvent::new(path.clone(), kind)).await.is_err() {
                                        return;
                                    }
                                }
                            }
                            Some(Err(e)) => {
                                let _ = error_tx.send(WatchError::Transient(e.to_string())).await;
                            }
                            None => {
                                // Raw channel closed: the native facility died.
                                break;
                            }
                        }
                    }
                }
            }
        });

        Ok(WatchHandle::new(event_rx, error_rx, stop_tx))
    }
}

fn translate(kind: &NotifyEventKind) -> Option<EventKind> {
    match kind {
        NotifyEventKind::Create(_) => Some(EventKind::Created),
        NotifyEventKind::Modify(notify::event::ModifyKind::Name(_)) => Some(EventKind::Renamed),
        NotifyEventKind::Modify(_) => Some(EventKind::Modified),
        NotifyEventKind::Remove(_) => Some(EventKind::Deleted),
        _ => None,
    }
}
