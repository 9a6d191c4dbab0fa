// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Polling adapter: scans file modification timestamps at a fixed interval.
//!
//! 100% reliable — correctness cannot depend on native notifications
//! arriving, since they are known to silently drop on network shares,
//! containers, and mounted foreign filesystems. This is the fallback the
//! [`WatcherFactory`](crate::WatcherFactory) routes those paths to.

use crate::{EventKind, FileEvent, GlobFilter, WatchError, WatchHandle, Watcher, WatcherDescriptor};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tokio::sync::{mpsc, oneshot};
use tokio::time::interval;

/// Default polling interval: 250ms.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug)]
pub struct PollingWatcher {
    interval: Duration,
}

impl PollingWatcher {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Default for PollingWatcher {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL)
    }
}

#[async_trait]
impl Watcher for PollingWatcher {
    fn descriptor(&self) -> WatcherDescriptor {
        WatcherDescriptor {
            reliability: 100,
            cpu_overhead_percent: 4.0,
        }
    }

    async fn start(&self, dir: PathBuf, filter: GlobFilter) -> Result<WatchHandle, WatchError> {
        let (event_tx, event_rx) = mpsc::channel(256);
        let (error_tx, error_rx) = mpsc::channel(64);
        let (stop_tx, mut stop_rx) = oneshot::channel();
        let poll_interval = self.interval;

        tokio::spawn(async move {
            let mut known: HashMap<PathBuf, SystemTime> = scan(&dir, &filter).unwrap_or_default();
            let mut ticker = interval(poll_interval);
            loop {
                tokio::select! {
                    _ = &mut stop_rx => {
                        tracing::debug!(dir = %dir.display(), "polling watcher stopping");
                        break;
                    }
                    _ = ticker.tick() => {
                        let current = match scan(&dir, &filter) {
                            Ok(c) => c,
                            Err(e) => {
                                let _ = error_tx.send(WatchError::Transient(e.to_string())).await;
                                continue;
                            }
                        };

                        for (path, mtime) in &current {
                            match known.get(path) {
                                None => {
                                    if event_tx
                                        .send(FileEvent::new(path.clone(), EventKind::Created))
                                        .await
                                        .is_err()
                                    {
                                        return;
                                    }
                                }
                                Some(prev) if prev != mtime => {
                                    if event_tx
                                        .send(FileEvent::new(path.clone(), EventKind::Modified))
                                        .await
                                        .is_err()
                                    {
                                        return;
                                    }
                                }
                                _ => {}
                            }
                        }

                        for path in known.keys() {
                            if !current.contains_key(path)
                                && event_tx
                                    .send(FileEvent::new(path.clone(), EventKind::Deleted))
                                    .await
                                    .is_err()
                            {
                                return;
                            }
                        }

                        known = current;
                    }
                }
            }
        });

        Ok(WatchHandle::new(event_rx, error_rx, stop_tx))
    }
}

fn scan(dir: &Path, filter: &GlobFilter) -> std::io::Result<HashMap<PathBuf, SystemTime>> {
    let mut found = HashMap::new();
    walk(dir, filter, &mut found)?;
    Ok(found)
}

fn walk(dir: &Path, filter: &GlobFilter, found: &mut HashMap<PathBuf, SystemTime>) -> std::io::Result<()> {
    if !dir.is_dir() {
        return Ok(());
    }
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            walk(&path, filter, found)?;
        } else if filter.matches(&path) {
            let mtime = entry.metadata()?.modified()?;
            found.insert(path, mtime);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Watcher as _;
    use std::time::Duration as StdDuration;
    use tempfile::tempdir;
    use tokio::time::timeout;

    #[tokio::test]
    async fn detects_created_and_modified_files() {
        let dir = tempdir().unwrap();
        let watcher = PollingWatcher::new(StdDuration::from_millis(20));
        let mut handle = watcher
            .start(dir.path().to_path_buf(), GlobFilter::default_source())
            .await
            .unwrap();

        let file = dir.path().join("pikachu.src");
        std::fs::write(&file, "v1").unwrap();

        let event = timeout(StdDuration::from_secs(1), handle.events.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(event.kind, EventKind::Created);

        std::thread::sleep(StdDuration::from_millis(30));
        std::fs::write(&file, "v2 modified content").unwrap();

        let event = timeout(StdDuration::from_secs(1), handle.events.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(event.kind, EventKind::Modified);

        handle.stop();
    }

    #[tokio::test]
    async fn ignores_non_matching_extensions() {
        let dir = tempdir().unwrap();
        let watcher = PollingWatcher::new(StdDuration::from_millis(20));
        let mut handle = watcher
            .start(dir.path().to_path_buf(), GlobFilter::default_source())
            .await
            .unwrap();

        std::fs::write(dir.path().join("notes.txt"), "irrelevant").unwrap();

        let result = timeout(StdDuration::from_millis(100), handle.events.recv()).await;
        assert!(result.is_err(), "no event should be emitted for a non-matching extension");
        handle.stop();
    }
}
