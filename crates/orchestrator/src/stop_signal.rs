// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A broadcast-once cancellation signal used to cancel live debounce timers
//! and awaiting semaphore acquires on `stop()`, without forcibly aborting a
//! compile already in flight.

use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Notify;

#[derive(Default)]
pub(crate) struct StopSignal {
    stopped: AtomicBool,
    notify: Notify,
}

impl StopSignal {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    /// Marks the signal stopped and wakes every task currently awaiting
    /// [`Self::cancelled`].
    pub(crate) fn signal(&self) {
        self.stopped.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    /// Resets the signal for a fresh `start()`/`stop()` cycle.
    pub(crate) fn reset(&self) {
        self.stopped.store(false, Ordering::SeqCst);
    }

    /// Resolves immediately if already stopped; otherwise waits for the
    /// next [`Self::signal`] call. Checking the flag first avoids missing a
    /// signal that fired before this future was created.
    pub(crate) async fn cancelled(&self) {
        if self.is_stopped() {
            return;
        }
        self.notify.notified().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn cancelled_resolves_immediately_if_already_stopped() {
        let signal = StopSignal::new();
        signal.signal();
        tokio::time::timeout(Duration::from_millis(50), signal.cancelled())
            .await
            .expect("cancelled() should resolve without waiting");
    }

    #[tokio::test]
    async fn cancelled_wakes_on_subsequent_signal() {
        let signal = Arc::new(StopSignal::new());
        let waiter = {
            let signal = signal.clone();
            tokio::spawn(async move {
                signal.cancelled().await;
            })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        signal.signal();
        tokio::time::timeout(Duration::from_millis(200), waiter)
            .await
            .expect("waiter should complete after signal")
            .unwrap();
    }

    #[tokio::test]
    async fn reset_allows_stopping_again() {
        let signal = StopSignal::new();
        signal.signal();
        assert!(signal.is_stopped());
        signal.reset();
        assert!(!signal.is_stopped());
    }
}
