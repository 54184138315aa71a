// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn push_only_when_realtime_fails() {
    let ctx = TestContext::new();
    ctx.realtime.fail_connect("refused");

    assert!(ctx.initialize().await);

    assert_eq!(ctx.manager.lifecycle(), Lifecycle::Ready);
    assert_eq!(ctx.manager.delivery_mode(), DeliveryMode::PushOnly);
    assert_eq!(ctx.manager.connection_state(), ConnectionState::Failed);
    assert!(ctx.observer.errors().is_empty());

    assert!(ctx.push.deliver(push_payload(1)));
    eventually(|| ctx.manager.len() == 1).await;
}

#[tokio::test]
async fn realtime_only_when_push_fails() {
    let ctx = TestContext::new();
    ctx.push.fail_initialize("no token");

    assert!(ctx.initialize().await);

    assert_eq!(ctx.manager.delivery_mode(), DeliveryMode::RealtimeOnly);
    assert_eq!(ctx.manager.connection_state(), ConnectionState::Connected);
    assert!(ctx.observer.errors().is_empty());

    assert!(ctx.realtime.emit_notification(realtime_payload(1)));
    eventually(|| ctx.manager.len() == 1).await;
}

#[tokio::test]
async fn both_failing_runs_from_cache() {
    let ctx = TestContext::new();
    seed_cache(&ctx, &[unread_record(1)], 1, Duration::from_secs(60));
    ctx.push.fail_initialize("no token");
    ctx.realtime.fail_connect("refused");

    assert!(!ctx.initialize().await);

    assert_eq!(ctx.manager.lifecycle(), Lifecycle::Ready);
    assert_eq!(ctx.manager.delivery_mode(), DeliveryMode::CacheOnly);
    assert_eq!(ctx.manager.len(), 1);
    let errors = ctx.observer.errors();
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        &errors[0],
        ManagerError::InitializationFailure { push, realtime }
            if push.contains("no token") && realtime.contains("refused")
    ));

    // Local operations keep working
    assert!(ctx.manager.mark_as_read(id(1)));
    assert_eq!(ctx.manager.unread_count(), 0);
}

#[tokio::test]
async fn resync_upgrades_cache_only_session() {
    let ctx = TestContext::new();
    ctx.push.fail_initialize("no token");
    ctx.realtime.fail_connect("refused");
    assert!(!ctx.initialize().await);

    ctx.realtime.allow_connect();
    ctx.app.transition(AppState::Background);
    ctx.app.transition(AppState::Active);

    eventually(|| ctx.manager.delivery_mode() == DeliveryMode::RealtimeOnly).await;
    assert_eq!(ctx.manager.connection_state(), ConnectionState::Connected);
}
