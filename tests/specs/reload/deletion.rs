//! File deletion does not mutate the cache.

use crate::prelude::*;

#[tokio::test]
async fn deleting_a_loaded_script_leaves_the_cache_untouched() {
    let harness = Harness::start(Harness::fast_config()).await;
    let type_id = harness.type_id("pikachu.src");
    harness
        .compiler
        .queue_success(harness.path("pikachu.src"), StubArtifact::ok());
    harness.modify("pikachu.src").await;
    harness.wait_for_notification_count(1).await;

    harness.delete("pikachu.src").await;
    // Give the event loop a chance to misbehave if it were going to.
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    assert_eq!(harness.notifications().len(), 1);
    assert_eq!(harness.orchestrator.cache().version(&type_id), Some(1));
    assert_eq!(harness.compiler.call_count(&harness.path("pikachu.src")), 1);
}
