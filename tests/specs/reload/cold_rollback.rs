//! A first compile failing with nothing to fall back to.

use crate::prelude::*;
use hotscript_core::NotificationKind;

#[tokio::test]
async fn a_first_failed_compile_with_no_backup_leaves_no_entry_and_errors() {
    let harness = Harness::start(Harness::fast_config()).await;
    let type_id = harness.type_id("bulbasaur.src");

    harness.compiler.queue_failure(
        harness.path("bulbasaur.src"),
        vec![Harness::diagnostic("unexpected token")],
    );
    harness.modify("bulbasaur.src").await;
    harness.wait_for_notification_count(1).await;

    let notifications = harness.notifications();
    assert_eq!(notifications[0].kind, NotificationKind::Error);
    assert!(notifications[0]
        .diagnostics
        .iter()
        .any(|d| d.message.contains("unexpected token")));
    assert_eq!(harness.orchestrator.cache().version(&type_id), None);
    assert!(harness.orchestrator.cache().instance(&type_id).is_err());
}
