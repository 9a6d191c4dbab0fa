//! Good -> bad reload -> rollback via cache.

use crate::prelude::*;
use hotscript_core::NotificationKind;

#[tokio::test]
async fn a_failed_reload_after_two_good_versions_rolls_back_in_place() {
    let harness = Harness::start(Harness::fast_config()).await;
    let type_id = harness.type_id("pikachu.src");

    harness
        .compiler
        .queue_success(harness.path("pikachu.src"), StubArtifact::ok());
    harness.modify("pikachu.src").await;
    harness.wait_for_notification_count(1).await;

    harness
        .compiler
        .queue_success(harness.path("pikachu.src"), StubArtifact::ok());
    harness.modify("pikachu.src").await;
    harness.wait_for_notification_count(2).await;
    let v2_instance = harness.orchestrator.cache().instance(&type_id).unwrap();

    harness.compiler.queue_failure(
        harness.path("pikachu.src"),
        vec![Harness::diagnostic("syntax error at 12:4")],
    );
    harness.modify("pikachu.src").await;
    harness.wait_for_notification_count(3).await;

    let notifications = harness.notifications();
    assert_eq!(notifications[2].kind, NotificationKind::Warning);
    assert_eq!(notifications[2].version, Some(2));
    assert!(notifications[2]
        .diagnostics
        .iter()
        .any(|d| d.message.contains("syntax error")));

    // The in-cache `previous` link covers this case (two prior versions
    // exist), so rollback restores version 2 in place with no new version
    // minted and the same instance still current.
    assert_eq!(harness.orchestrator.cache().version(&type_id), Some(2));
    let restored_instance = harness.orchestrator.cache().instance(&type_id).unwrap();
    assert!(std::sync::Arc::ptr_eq(&v2_instance, &restored_instance));
}
