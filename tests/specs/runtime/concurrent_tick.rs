//! Concurrent reload + tick reads.
//!
//! While a compile is in flight, many tick threads repeatedly read
//! `instance(type_id)`; every read must land on either the pre- or
//! post-update entry, never a torn or null intermediate.

use crate::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn readers_never_observe_a_torn_or_missing_entry_during_a_reload() {
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
    // Stretch the next compile out so the readers below get a real window
    // of overlap with the in-flight reload, rather than racing a no-op.
    harness.compiler.set_elapsed(Duration::from_millis(80));

    let cache = harness.orchestrator.cache().clone();
    let bad_reads = Arc::new(AtomicUsize::new(0));
    let readers: Vec<_> = (0..64)
        .map(|_| {
            let cache = cache.clone();
            let type_id = type_id.clone();
            let bad_reads = bad_reads.clone();
            tokio::spawn(async move {
                for _ in 0..1000 {
                    match cache.instance(&type_id) {
                        Ok(_) => match cache.version(&type_id) {
                            Some(1) | Some(2) => {}
                            _ => {
                                bad_reads.fetch_add(1, Ordering::SeqCst);
                            }
                        },
                        Err(_) => {
                            bad_reads.fetch_add(1, Ordering::SeqCst);
                        }
                    }
                }
            })
        })
        .collect();

    harness.modify("pikachu.src").await;
    harness.wait_for_notification_count(2).await;

    for reader in readers {
        reader.await.expect("reader task");
    }

    assert_eq!(bad_reads.load(Ordering::SeqCst), 0);
    assert_eq!(harness.orchestrator.cache().version(&type_id), Some(2));
    assert_eq!(harness.orchestrator.live_compiles(), 0);
}
