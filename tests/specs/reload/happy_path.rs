//! Happy path: first compile installs version one and the cache reports it.

use crate::prelude::*;
use hotscript_core::NotificationKind;

#[tokio::test]
async fn first_compile_installs_version_one_and_notifies_success() {
    let harness = Harness::start(Harness::fast_config()).await;
    let type_id = harness.type_id("pikachu.src");
    harness
        .compiler
        .queue_success(harness.path("pikachu.src"), StubArtifact::ok());

    harness.modify("pikachu.src").await;
    harness.wait_for_notification_count(1).await;

    let notifications = harness.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::Success);
    assert_eq!(notifications[0].version, Some(1));
    assert_eq!(harness.orchestrator.cache().version(&type_id), Some(1));
}

#[tokio::test]
async fn instance_lookup_constructs_once_and_is_stable_across_calls() {
    let harness = Harness::start(Harness::fast_config()).await;
    let type_id = harness.type_id("pikachu.src");
    harness
        .compiler
        .queue_success(harness.path("pikachu.src"), StubArtifact::ok());

    harness.modify("pikachu.src").await;
    harness.wait_for_notification_count(1).await;

    let cache = harness.orchestrator.cache();
    let first = cache.instance(&type_id).unwrap();
    let second = cache.instance(&type_id).unwrap();
    assert!(std::sync::Arc::ptr_eq(&first, &second));
}
