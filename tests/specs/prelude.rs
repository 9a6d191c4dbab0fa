//! Shared harness for hotscript's end-to-end specifications.
//!
//! Each test drives a real `ReloadOrchestrator` against a `FakeWatcher` and
//! a `FakeCompiler`, so timing is controlled by the debounce window alone,
//! not by real filesystem notification latency.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use hotscript_cache::InMemoryBackupStore;
use hotscript_compiler::fake::FakeCompiler;
use hotscript_core::{Diagnostic, Notification, TypeId};
use hotscript_orchestrator::{FakeNotifySink, OrchestratorConfig, ReloadOrchestrator};
use hotscript_runtime::{Artifact, ArtifactError, ScriptBase};
use hotscript_watch::fake::FakeWatcher;
use hotscript_watch::{EventKind, FileEvent};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tempfile::TempDir;

pub struct StubScript;
impl ScriptBase for StubScript {}

/// A script artifact whose smoke `instantiate()` can be made to fail, for
/// exercising the "compiler says success but the artifact is unusable"
/// edge case without a real compiler backend.
pub struct StubArtifact {
    instantiates: bool,
}

impl StubArtifact {
    pub fn ok() -> Arc<dyn Artifact> {
        Arc::new(Self { instantiates: true })
    }

    pub fn broken() -> Arc<dyn Artifact> {
        Arc::new(Self { instantiates: false })
    }
}

impl Artifact for StubArtifact {
    fn instantiate(&self) -> Result<Box<dyn ScriptBase>, ArtifactError> {
        if self.instantiates {
            Ok(Box::new(StubScript))
        } else {
            Err(ArtifactError::NotAScript("stub configured to fail".into()))
        }
    }
}

pub type TestOrchestrator = ReloadOrchestrator<FakeCompiler, FakeNotifySink>;

/// Installs a `tracing` subscriber the first time any spec calls
/// `Harness::start`, so failures can be re-run with `RUST_LOG` set without
/// editing the test. Library crates never do this themselves; only the
/// embedding application or its tests should install a subscriber.
fn init_tracing() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub struct Harness {
    pub orchestrator: Arc<TestOrchestrator>,
    pub compiler: FakeCompiler,
    pub notify: FakeNotifySink,
    pub watcher: FakeWatcher,
    dir: TempDir,
}

impl Harness {
    pub async fn start(config: OrchestratorConfig) -> Self {
        init_tracing();
        let compiler = FakeCompiler::new();
        let notify = FakeNotifySink::new();
        let backup = Arc::new(InMemoryBackupStore::new());
        let orchestrator = ReloadOrchestrator::new(
            config,
            Arc::new(compiler.clone()),
            notify.clone(),
            backup,
        );
        let watcher = FakeWatcher::new();
        let dir = tempfile::tempdir().expect("tempdir");

        orchestrator
            .start_with_watcher(dir.path().to_path_buf(), Arc::new(watcher.clone()))
            .await
            .expect("start");

        Self {
            orchestrator,
            compiler,
            notify,
            watcher,
            dir,
        }
    }

    /// A short debounce window so specs don't need to wait out the 300 ms
    /// default to observe a reload.
    pub fn fast_config() -> OrchestratorConfig {
        OrchestratorConfig {
            debounce_ms: 20,
            ..OrchestratorConfig::default()
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn type_id(&self, name: &str) -> TypeId {
        TypeId::from_path(self.dir.path(), &self.path(name)).expect("path inside base dir")
    }

    pub async fn modify(&self, name: &str) {
        self.push(name, EventKind::Modified).await;
    }

    pub async fn delete(&self, name: &str) {
        self.push(name, EventKind::Deleted).await;
    }

    async fn push(&self, name: &str, kind: EventKind) {
        self.watcher
            .push(FileEvent {
                path: self.path(name),
                kind,
                observed_at: Instant::now(),
            })
            .await;
    }

    pub async fn wait_for_notification_count(&self, count: usize) {
        for _ in 0..300 {
            if self.notify.calls().len() >= count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("timed out waiting for {count} notifications, saw {:?}", self.notify.calls());
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notify.calls()
    }

    pub fn diagnostic(message: &str) -> Diagnostic {
        Diagnostic::error(message)
    }
}
