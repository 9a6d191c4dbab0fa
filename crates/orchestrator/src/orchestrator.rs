// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The reload orchestrator: turns a raw `FileEvent` stream into
//! applied-or-rolled-back artifacts, one logical reload at a time per
//! `TypeId`.

use crate::debounce::DebounceTable;
use crate::notify_sink::NotifySink;
use crate::stats::ReloadStats;
use crate::stop_signal::StopSignal;
use crate::{OrchestratorConfig, OrchestratorError, OrchestratorState, StatsSnapshot, COMPILE_PERMITS};

use hotscript_cache::{BackupStore, VersionedCache};
use hotscript_compiler::{CompileResult, Compiler};
use hotscript_core::{Diagnostic, Notification, TypeId};
use hotscript_runtime::Artifact;
use hotscript_watch::{
    EventKind, FileEvent, GlobFilter, WatchError, WatchHandle, Watcher, WatcherFactory,
};

use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

/// Owns the cache and backup store for one watched directory, and drives
/// the watch -> debounce -> compile -> update/rollback pipeline: a changed
/// file is debounced per `TypeId`, compiled under a single process-wide
/// permit, and either installed as a new cache version or left in place
/// with a warning/error notification on failure.
pub struct ReloadOrchestrator<C, N> {
    config: OrchestratorConfig,
    compiler: Arc<C>,
    notify: N,
    cache: Arc<VersionedCache>,
    backup: Arc<dyn BackupStore>,
    filter: GlobFilter,
    stats: Arc<ReloadStats>,
    debounce: DebounceTable,
    semaphore: Arc<Semaphore>,
    stop_signal: Arc<StopSignal>,
    state: Mutex<OrchestratorState>,
    base_dir: Mutex<Option<PathBuf>>,
    loop_handle: Mutex<Option<JoinHandle<()>>>,
    /// Diagnostic: how many in-flight compiles are live right now. Always
    /// 0 or 1 given `COMPILE_PERMITS`; kept as a sanity check, not a lock.
    live_compiles: AtomicU64,
}

impl<C, N> ReloadOrchestrator<C, N>
where
    C: Compiler + 'static,
    N: NotifySink + 'static,
{
    pub fn new(
        config: OrchestratorConfig,
        compiler: Arc<C>,
        notify: N,
        backup: Arc<dyn BackupStore>,
    ) -> Arc<Self> {
        Self::with_filter(config, compiler, notify, backup, GlobFilter::default_source())
    }

    pub fn with_filter(
        config: OrchestratorConfig,
        compiler: Arc<C>,
        notify: N,
        backup: Arc<dyn BackupStore>,
        filter: GlobFilter,
    ) -> Arc<Self> {
        Arc::new(Self {
            config,
            compiler,
            notify,
            cache: Arc::new(VersionedCache::new()),
            backup,
            filter,
            stats: Arc::new(ReloadStats::new()),
            debounce: DebounceTable::new(),
            semaphore: Arc::new(Semaphore::new(COMPILE_PERMITS)),
            stop_signal: Arc::new(StopSignal::new()),
            state: Mutex::new(OrchestratorState::Stopped),
            base_dir: Mutex::new(None),
            loop_handle: Mutex::new(None),
            live_compiles: AtomicU64::new(0),
        })
    }

    /// The cache backing this orchestrator. The tick thread holds this
    /// (or a clone of the `Arc`) to call `instance`/`version` without ever
    /// going through the orchestrator itself.
    pub fn cache(&self) -> &Arc<VersionedCache> {
        &self.cache
    }

    pub fn statistics(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Diagnostic: how many compiles are live right now. Always 0 or 1,
    /// since `COMPILE_PERMITS` bounds concurrent compiles to one.
    pub fn live_compiles(&self) -> u64 {
        self.live_compiles.load(Ordering::SeqCst)
    }

    fn state(&self) -> OrchestratorState {
        *self.state.lock()
    }

    fn is_running(&self) -> bool {
        self.state().is_running()
    }

    /// Begin watching `dir`. Picks a watcher via `WatcherFactory` given the
    /// configured strategy, resets statistics (the debounce-efficiency
    /// denominator is defined to reset every time watching restarts, so a
    /// long-idle process doesn't carry stale counts into a fresh session),
    /// and spawns the background event loop.
    pub async fn start(self: &Arc<Self>, dir: impl Into<PathBuf>) -> Result<(), OrchestratorError> {
        let dir = dir.into();
        let watcher = WatcherFactory::create(
            self.config.watcher_strategy,
            &dir,
            Duration::from_millis(self.config.poll_interval_ms),
        );
        self.start_with_watcher(dir, watcher).await
    }

    /// Same as [`Self::start`], but takes an explicit watcher instead of
    /// deferring to `WatcherFactory`. Exposed so tests can drive the
    /// orchestrator with a `FakeWatcher` instead of real filesystem timing.
    #[cfg(any(test, feature = "test-support"))]
    pub async fn start_with_watcher(
        self: &Arc<Self>,
        dir: impl Into<PathBuf>,
        watcher: Arc<dyn Watcher>,
    ) -> Result<(), OrchestratorError> {
        self.start_inner(dir.into(), watcher).await
    }

    #[cfg(not(any(test, feature = "test-support")))]
    async fn start_with_watcher(
        self: &Arc<Self>,
        dir: impl Into<PathBuf>,
        watcher: Arc<dyn Watcher>,
    ) -> Result<(), OrchestratorError> {
        self.start_inner(dir.into(), watcher).await
    }

    async fn start_inner(
        self: &Arc<Self>,
        dir: PathBuf,
        watcher: Arc<dyn Watcher>,
    ) -> Result<(), OrchestratorError> {
        {
            let mut state = self.state.lock();
            if *state != OrchestratorState::Stopped {
                return Err(OrchestratorError::AlreadyRunning);
            }
            *state = OrchestratorState::Starting;
        }

        let handle = match watcher.start(dir.clone(), self.filter.clone()).await {
            Ok(handle) => handle,
            Err(e) => {
                *self.state.lock() = OrchestratorState::Stopped;
                return Err(e.into());
            }
        };

        self.stop_signal.reset();
        self.stats.reset();
        *self.base_dir.lock() = Some(dir);
        *self.state.lock() = OrchestratorState::Running;

        let this = self.clone();
        let loop_handle = tokio::spawn(this.run_event_loop(handle));
        *self.loop_handle.lock() = Some(loop_handle);
        Ok(())
    }

    /// Cancels every live debounce timer and every awaiting semaphore
    /// acquire, stops the watcher, and waits (briefly) for the event loop
    /// to finish tearing down. A compile already running is not
    /// interrupted; its result is discarded once it completes (checked in
    /// `reload` immediately after the semaphore permit is reacquired).
    pub async fn stop(self: &Arc<Self>) {
        {
            let mut state = self.state.lock();
            if *state != OrchestratorState::Running {
                return;
            }
            *state = OrchestratorState::Stopping;
        }
        self.stop_signal.signal();

        let handle = self.loop_handle.lock().take();
        if let Some(handle) = handle {
            let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
        }
        *self.state.lock() = OrchestratorState::Stopped;
    }

    async fn run_event_loop(self: Arc<Self>, mut handle: WatchHandle) {
        loop {
            tokio::select! {
                _ = self.stop_signal.cancelled() => {
                    handle.stop();
                    break;
                }
                event = handle.events.recv() => {
                    match event {
                        Some(event) => self.clone().dispatch(event),
                        None => {
                            tracing::warn!("watch event stream ended, stopping orchestrator");
                            break;
                        }
                    }
                }
                error = handle.errors.recv() => {
                    match error {
                        Some(WatchError::Transient(message)) => {
                            tracing::warn!(error = %message, "transient watch error");
                        }
                        Some(WatchError::Fatal(message)) => {
                            tracing::error!(error = %message, "fatal watch error, stopping orchestrator");
                            handle.stop();
                            break;
                        }
                        None => {}
                    }
                }
            }
        }
        *self.state.lock() = OrchestratorState::Stopped;
    }

    /// Algorithm step 1: derive a `TypeId`, drop non-matching or deletion
    /// events, then arm (or re-arm) this `TypeId`'s debounce timer.
    fn dispatch(self: Arc<Self>, event: FileEvent) {
        if !self.is_running() {
            return;
        }
        self.stats.record_event();

        if event.kind == EventKind::Deleted {
            // Reload-on-delete is a non-goal; no cache mutation happens.
            return;
        }
        if !self.filter.matches(&event.path) {
            return;
        }
        let Some(base_dir) = self.base_dir.lock().clone() else {
            return;
        };
        let Some(type_id) = TypeId::from_path(&base_dir, &event.path) else {
            return;
        };

        let (entry, generation, was_pending) = self.debounce.schedule(&type_id);
        if was_pending {
            self.stats.record_debounced();
        }

        let this = self.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(Duration::from_millis(this.config.debounce_ms)) => {}
                _ = this.stop_signal.cancelled() => return,
            }
            if !DebounceTable::try_consume(&entry, generation) {
                return; // superseded by a newer event
            }
            if !this.is_running() {
                return;
            }
            this.reload(type_id, event.path).await;
        });
    }

    /// Algorithm steps 3-7: acquire the single compile permit, back up the
    /// current entry, compile, then update or roll back the cache.
    async fn reload(self: Arc<Self>, type_id: TypeId, path: PathBuf) {
        let permit = tokio::select! {
            permit = self.semaphore.acquire() => permit,
            _ = self.stop_signal.cancelled() => return,
        };
        let Ok(_permit) = permit else { return };

        if !self.is_running() {
            return;
        }

        let reload_start = Instant::now();
        let current = self.cache.current(&type_id);
        let (backup_artifact, backup_version) = match &current {
            Some(entry) => (Some(entry.artifact().clone()), entry.version()),
            None => (None, 0),
        };
        self.backup.create(&type_id, backup_artifact, backup_version).await;

        self.live_compiles.fetch_add(1, Ordering::SeqCst);
        let compile_start = Instant::now();
        let result = self.compiler.compile(&path).await;
        // Wall-clock elapsed, not CPU time: scheduling delay on a busy
        // executor is part of what a caller watching reload latency cares
        // about.
        let compile_ms = compile_start.elapsed();
        self.live_compiles.fetch_sub(1, Ordering::SeqCst);

        // Compiles already running cannot be interrupted; discard the
        // result if the orchestrator has since transitioned out of Running.
        if !self.is_running() {
            return;
        }

        match self.validate(result) {
            Ok(artifact) => self.apply_success(type_id, artifact, compile_ms, reload_start).await,
            Err(diagnostics) => self.apply_failure(type_id, diagnostics, compile_ms, reload_start).await,
        }
    }

    /// A result carrying no artifact, or one whose artifact fails a smoke
    /// `instantiate()`, is demoted to a failure with a synthesized
    /// diagnostic.
    fn validate(&self, result: CompileResult) -> Result<Arc<dyn Artifact>, Vec<Diagnostic>> {
        if !result.success {
            return Err(self.cap_diagnostics(result.diagnostics));
        }
        let Some(artifact) = result.artifact else {
            return Err(self.cap_diagnostics(vec![Diagnostic::error(
                "compiler reported success but produced no artifact",
            )]));
        };
        if let Err(e) = artifact.instantiate() {
            return Err(self.cap_diagnostics(vec![Diagnostic::error(format!(
                "artifact does not implement the script contract: {e}"
            ))]));
        }
        Ok(artifact)
    }

    fn cap_diagnostics(&self, mut diagnostics: Vec<Diagnostic>) -> Vec<Diagnostic> {
        diagnostics.truncate(self.config.max_diagnostics);
        diagnostics
    }

    async fn apply_success(
        &self,
        type_id: TypeId,
        artifact: Arc<dyn Artifact>,
        compile_ms: Duration,
        reload_start: Instant,
    ) {
        let new_version = self.cache.update(&type_id, artifact);
        self.backup.clear(&type_id).await;
        self.stats.record_success(compile_ms, reload_start.elapsed());
        let _ = self
            .notify
            .notify(Notification::success(type_id, new_version, compile_ms))
            .await;
    }

    /// A failed compile is never installed (`apply_success` is the only
    /// caller of `cache.update`), so there is no candidate entry in the
    /// cache to undo — the current entry, if any, is already the last
    /// known good version and is left exactly as it is. `cache.rollback`
    /// has nothing to do here; it discards a just-applied version in favor
    /// of the one before it, and there is no just-applied version on a
    /// failure path. Only when no current entry exists at all (the
    /// initial-load case) is there anything to recover, via the cold
    /// backup path.
    async fn apply_failure(
        &self,
        type_id: TypeId,
        diagnostics: Vec<Diagnostic>,
        compile_ms: Duration,
        reload_start: Instant,
    ) {
        let restored_version = if let Some(version) = self.cache.version(&type_id) {
            Some(version)
        } else if let Some((artifact, version)) = self.backup.restore(&type_id).await {
            self.cache.update(&type_id, artifact);
            Some(version)
        } else {
            None
        };

        self.stats
            .record_failure(compile_ms, reload_start.elapsed(), restored_version.is_some());

        let notification = match restored_version {
            Some(_) => Notification::warning(type_id, restored_version, diagnostics),
            None => {
                self.cache.remove(&type_id);
                Notification::error(type_id, diagnostics)
            }
        };
        let _ = self.notify.notify(notification).await;
    }
}
