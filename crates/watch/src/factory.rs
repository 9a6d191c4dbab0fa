// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Factory policy: the only component that encodes platform heuristics.

use crate::{NativeWatcher, PollingWatcher, Watcher};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Explicit override for the watcher strategy; `Auto` defers to the
/// factory's platform heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WatcherStrategy {
    #[default]
    Auto,
    Native,
    Polling,
}

pub struct WatcherFactory;

impl WatcherFactory {
    /// Choose a watcher for `dir` given a strategy override. `poll_interval`
    /// is only used when the chosen implementation is polling.
    pub fn create(strategy: WatcherStrategy, dir: &Path, poll_interval: Duration) -> Arc<dyn Watcher> {
        match strategy {
            WatcherStrategy::Native => Arc::new(NativeWatcher::new()),
            WatcherStrategy::Polling => Arc::new(PollingWatcher::new(poll_interval)),
            WatcherStrategy::Auto if requires_polling(dir) => {
                Arc::new(PollingWatcher::new(poll_interval))
            }
            WatcherStrategy::Auto => Arc::new(NativeWatcher::new()),
        }
    }
}

/// Inspect the path for indicators that native OS notifications are known
/// to be unreliable: a UNC/network-share path, a container-volume marker,
/// or a mounted-foreign-filesystem marker.
fn requires_polling(dir: &Path) -> bool {
    is_unc_or_network_share(dir) || is_container_volume(dir) || is_mounted_foreign_drive(dir)
}

fn is_unc_or_network_share(dir: &Path) -> bool {
    let s = dir.to_string_lossy();
    s.starts_with(r"\\") || s.starts_with("//") && !s.starts_with("///")
}

fn is_container_volume(dir: &Path) -> bool {
    dir.starts_with("/var/lib/docker") || dir.starts_with("/run/containerd")
}

fn is_mounted_foreign_drive(dir: &Path) -> bool {
    dir.starts_with("/mnt") || dir.starts_with("/media")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn create_with_auto_strategy_returns_polling_for_marked_path() {
        let watcher = WatcherFactory::create(
            WatcherStrategy::Auto,
            &PathBuf::from("/mnt/c/scripts"),
            Duration::from_millis(250),
        );
        assert_eq!(watcher.descriptor().reliability, 100);
    }

    #[test]
    fn create_with_auto_strategy_returns_native_for_ordinary_path() {
        let watcher = WatcherFactory::create(
            WatcherStrategy::Auto,
            &PathBuf::from("/home/user/project/scripts"),
            Duration::from_millis(250),
        );
        assert_eq!(watcher.descriptor().reliability, 70);
    }

    #[test]
    fn picks_polling_for_unc_path() {
        assert!(requires_polling(&PathBuf::from(r"\\server\share\scripts")));
    }

    #[test]
    fn picks_polling_for_container_volume() {
        assert!(requires_polling(&PathBuf::from(
            "/var/lib/docker/volumes/x/scripts"
        )));
    }

    #[test]
    fn picks_polling_for_mounted_foreign_drive() {
        assert!(requires_polling(&PathBuf::from("/mnt/c/scripts")));
        assert!(requires_polling(&PathBuf::from("/media/usb/scripts")));
    }

    #[test]
    fn picks_native_for_ordinary_local_path() {
        assert!(!requires_polling(&PathBuf::from("/home/user/project/scripts")));
    }
}
