// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `Stopped -> Starting -> Running -> Stopping -> Stopped`. Transitions are
//! rare and never sit on the tick path, so a plain mutex-guarded enum is
//! sufficient — no tick-thread code ever touches orchestrator state.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrchestratorState {
    #[default]
    Stopped,
    Starting,
    Running,
    Stopping,
}

impl OrchestratorState {
    pub fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }
}
