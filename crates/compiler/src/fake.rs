// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake compiler for testing: returns pre-programmed results instead of
//! invoking a real compiler backend.

use crate::{CompileResult, Compiler};
use async_trait::async_trait;
use hotscript_core::Diagnostic;
use hotscript_runtime::Artifact;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

struct FakeCompilerState {
    queued: HashMap<PathBuf, VecDeque<CompileOutcome>>,
    default: CompileOutcome,
    calls: Vec<PathBuf>,
    elapsed: Duration,
}

#[derive(Clone)]
enum CompileOutcome {
    Success(Arc<dyn Artifact>),
    Failure(Vec<Diagnostic>),
}

/// Queue-based fake: `queue_success`/`queue_failure` push outcomes that
/// `compile` pops in order for a given path; once the queue for a path is
/// empty, `default` is returned.
#[derive(Clone)]
pub struct FakeCompiler {
    state: Arc<Mutex<FakeCompilerState>>,
}

impl FakeCompiler {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeCompilerState {
                queued: HashMap::new(),
                default: CompileOutcome::Failure(vec![Diagnostic::error("no outcome queued")]),
                calls: Vec::new(),
                elapsed: Duration::from_millis(1),
            })),
        }
    }

    /// Sets the delay every subsequent `compile` call sleeps for, and the
    /// value reported as `CompileResult::elapsed`. Shared across clones, so
    /// it can be adjusted after the orchestrator already holds a handle to
    /// this compiler.
    pub fn with_elapsed(self, elapsed: Duration) -> Self {
        self.state.lock().elapsed = elapsed;
        self
    }

    /// Sets the delay without consuming self, for use after the compiler
    /// has already been wired into an orchestrator.
    pub fn set_elapsed(&self, elapsed: Duration) {
        self.state.lock().elapsed = elapsed;
    }

    pub fn queue_success(&self, path: impl Into<PathBuf>, artifact: Arc<dyn Artifact>) {
        self.state
            .lock()
            .queued
            .entry(path.into())
            .or_default()
            .push_back(CompileOutcome::Success(artifact));
    }

    pub fn queue_failure(&self, path: impl Into<PathBuf>, diagnostics: Vec<Diagnostic>) {
        self.state
            .lock()
            .queued
            .entry(path.into())
            .or_default()
            .push_back(CompileOutcome::Failure(diagnostics));
    }

    pub fn call_count(&self, path: &Path) -> usize {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|p| p.as_path() == path)
            .count()
    }
}

impl Default for FakeCompiler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Compiler for FakeCompiler {
    async fn compile(&self, path: &Path) -> CompileResult {
        let (outcome, elapsed) = {
            let mut state = self.state.lock();
            state.calls.push(path.to_path_buf());
            let outcome = state
                .queued
                .get_mut(path)
                .and_then(|q| q.pop_front())
                .unwrap_or_else(|| state.default.clone());
            (outcome, state.elapsed)
        };
        if !elapsed.is_zero() {
            tokio::time::sleep(elapsed).await;
        }
        match outcome {
            CompileOutcome::Success(artifact) => CompileResult::ok(artifact, elapsed),
            CompileOutcome::Failure(diagnostics) => CompileResult::failed(diagnostics, elapsed),
        }
    }
}
