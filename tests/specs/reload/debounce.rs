//! Debounce coalescing.

use crate::prelude::*;
use hotscript_core::NotificationKind;

#[tokio::test]
async fn five_rapid_edits_within_the_debounce_window_coalesce_to_one_compile() {
    let harness = Harness::start(OrchestratorConfig {
        debounce_ms: 100,
        ..OrchestratorConfig::default()
    })
    .await;
    let type_id = harness.type_id("pikachu.src");
    harness
        .compiler
        .queue_success(harness.path("pikachu.src"), StubArtifact::ok());

    for _ in 0..5 {
        harness.modify("pikachu.src").await;
    }
    harness.wait_for_notification_count(1).await;
    // No further reload arrives once the window has closed.
    tokio::time::sleep(std::time::Duration::from_millis(150)).await;

    let notifications = harness.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::Success);
    assert_eq!(harness.orchestrator.cache().version(&type_id), Some(1));
    assert_eq!(harness.compiler.call_count(&harness.path("pikachu.src")), 1);

    let stats = harness.orchestrator.statistics();
    assert_eq!(stats.debounced_events, 4);
}
