//! Good -> good reload.

use crate::prelude::*;
use hotscript_core::NotificationKind;

#[tokio::test]
async fn modifying_a_loaded_script_bumps_the_version_and_swaps_the_instance() {
    let harness = Harness::start(Harness::fast_config()).await;
    let type_id = harness.type_id("pikachu.src");

    harness
        .compiler
        .queue_success(harness.path("pikachu.src"), StubArtifact::ok());
    harness.modify("pikachu.src").await;
    harness.wait_for_notification_count(1).await;
    let original_instance = harness.orchestrator.cache().instance(&type_id).unwrap();

    harness
        .compiler
        .queue_success(harness.path("pikachu.src"), StubArtifact::ok());
    harness.modify("pikachu.src").await;
    harness.wait_for_notification_count(2).await;

    let notifications = harness.notifications();
    assert_eq!(notifications[1].kind, NotificationKind::Success);
    assert_eq!(notifications[1].version, Some(2));
    assert_eq!(harness.orchestrator.cache().version(&type_id), Some(2));

    let new_instance = harness.orchestrator.cache().instance(&type_id).unwrap();
    assert!(!std::sync::Arc::ptr_eq(&original_instance, &new_instance));
}
