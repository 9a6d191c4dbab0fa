// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Structured notifications sent to the presentational notification sink.

use crate::{Diagnostic, TypeId};
use std::time::Duration;

/// `type` field of a notification: `info | success | warning | error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

/// A structured notification emitted by the reload orchestrator.
///
/// Carries a `{type, message, details?, duration?, affected_count}`-shaped
/// payload, with `type_id`/`version`/`diagnostics` as the concrete
/// "details" this subsystem ever attaches.
#[derive(Debug, Clone)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub type_id: Option<TypeId>,
    pub version: Option<u64>,
    pub diagnostics: Vec<Diagnostic>,
    pub duration: Option<Duration>,
    pub affected_count: usize,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Info, message)
    }

    pub fn success(type_id: TypeId, version: u64, compile_time: Duration) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: format!("reloaded {type_id} to version {version}"),
            type_id: Some(type_id),
            version: Some(version),
            diagnostics: Vec::new(),
            duration: Some(compile_time),
            affected_count: 1,
        }
    }

    pub fn warning(
        type_id: TypeId,
        restored_version: Option<u64>,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        let message = match restored_version {
            Some(v) => format!("reload of {type_id} failed, restored to version {v}"),
            None => format!("reload of {type_id} failed, no previous version to restore"),
        };
        Self {
            kind: NotificationKind::Warning,
            message,
            type_id: Some(type_id),
            version: restored_version,
            diagnostics,
            duration: None,
            affected_count: 1,
        }
    }

    pub fn error(type_id: TypeId, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: format!("{type_id} removed from cache after failed rollback"),
            type_id: Some(type_id),
            version: None,
            diagnostics,
            duration: None,
            affected_count: 1,
        }
    }

    fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            type_id: None,
            version: None,
            diagnostics: Vec::new(),
            duration: None,
            affected_count: 0,
        }
    }
}
