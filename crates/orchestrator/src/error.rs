// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use hotscript_watch::WatchError;
use thiserror::Error;

/// Errors surfaced by the orchestrator's public contract. Nothing in the
/// per-event reload pipeline propagates one of these — every failure there
/// has a local recovery (rollback, restore, or log-and-continue); this enum
/// only covers `start`/`stop` themselves.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("orchestrator is already running")]
    AlreadyRunning,
    #[error("orchestrator is not running")]
    NotRunning,
    #[error("watcher failed to start: {0}")]
    WatchStart(#[from] WatchError),
}
