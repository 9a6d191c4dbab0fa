// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notification sink: the presentational collaborator the orchestrator
//! reports reload outcomes to. Delivery may be asynchronous and lossy; the
//! orchestrator never waits on acknowledgement beyond the `notify` call
//! itself returning.

use async_trait::async_trait;
use hotscript_core::{Notification, NotificationKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("send failed: {0}")]
    SendFailed(String),
}

#[async_trait]
pub trait NotifySink: Clone + Send + Sync + 'static {
    async fn notify(&self, notification: Notification) -> Result<(), NotifyError>;
}

/// Routes notifications through `tracing` at a level matching their kind.
/// The default sink; suitable for any embedder that doesn't have its own
/// presentational channel wired up yet.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifySink;

impl LogNotifySink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotifySink for LogNotifySink {
    async fn notify(&self, notification: Notification) -> Result<(), NotifyError> {
        match notification.kind {
            NotificationKind::Error => {
                tracing::error!(message = %notification.message, diagnostics = ?notification.diagnostics, "reload notification")
            }
            NotificationKind::Warning => {
                tracing::warn!(message = %notification.message, diagnostics = ?notification.diagnostics, "reload notification")
            }
            NotificationKind::Success => {
                tracing::info!(message = %notification.message, version = ?notification.version, "reload notification")
            }
            NotificationKind::Info => {
                tracing::info!(message = %notification.message, "reload notification")
            }
        }
        Ok(())
    }
}

/// Forwards notifications onto an `mpsc::Sender`, for embedders that want
/// to drive their own UI off a channel rather than `tracing`.
#[derive(Clone)]
pub struct ChannelNotifySink {
    sender: tokio::sync::mpsc::Sender<Notification>,
}

impl ChannelNotifySink {
    pub fn new(sender: tokio::sync::mpsc::Sender<Notification>) -> Self {
        Self { sender }
    }
}

#[async_trait]
impl NotifySink for ChannelNotifySink {
    async fn notify(&self, notification: Notification) -> Result<(), NotifyError> {
        self.sender
            .send(notification)
            .await
            .map_err(|e| NotifyError::SendFailed(e.to_string()))
    }
}

#[cfg(any(test, feature = "test-support"))]
pub mod fake {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    pub struct FakeNotifySink {
        calls: Arc<Mutex<Vec<Notification>>>,
    }

    impl FakeNotifySink {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn calls(&self) -> Vec<Notification> {
            self.calls.lock().clone()
        }
    }

    #[async_trait]
    impl NotifySink for FakeNotifySink {
        async fn notify(&self, notification: Notification) -> Result<(), NotifyError> {
            self.calls.lock().push(notification);
            Ok(())
        }
    }
}
