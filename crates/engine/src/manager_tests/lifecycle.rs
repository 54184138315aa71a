// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use inbox_adapters::{PushCall, RealtimeCall};

#[tokio::test]
async fn starts_uninitialized() {
    let ctx = TestContext::new();

    assert_eq!(ctx.manager.lifecycle(), Lifecycle::Uninitialized);
    assert_eq!(ctx.manager.recipient(), None);
    assert!(ctx.manager.is_empty());
    assert_eq!(ctx.manager.unread_count(), 0);
    assert!(!ctx.manager.mark_as_read(id(1)));
    assert!(!ctx.manager.mark_all_as_read());
}

#[tokio::test]
async fn initialize_brings_up_every_collaborator() {
    let ctx = ready().await;

    assert_eq!(ctx.manager.lifecycle(), Lifecycle::Ready);
    assert_eq!(ctx.manager.delivery_mode(), DeliveryMode::Full);
    assert_eq!(ctx.manager.connection_state(), ConnectionState::Connected);
    assert_eq!(ctx.manager.recipient(), Some(TEST_RECIPIENT));
    assert_eq!(
        ctx.push.calls(),
        vec![PushCall::Initialize {
            recipient_id: TEST_RECIPIENT
        }]
    );
    assert_eq!(ctx.realtime.connect_count(), 1);
    assert_eq!(ctx.app.subscriber_count(), 1);
    assert_eq!(
        ctx.observer.all(),
        vec![
            Observed::Connection(ConnectionState::Connecting),
            Observed::Connection(ConnectionState::Connected),
        ]
    );
}

#[tokio::test]
async fn invalid_config_is_rejected() {
    let ctx = TestContext::new();
    let config = test_config().with_cache_capacity(0);

    let ok = ctx
        .manager
        .initialize(TestContext::credentials(), Callbacks::new(), Some(config))
        .await;

    assert!(!ok);
    assert_eq!(ctx.manager.lifecycle(), Lifecycle::Uninitialized);
    assert!(ctx.push.calls().is_empty());
}

#[tokio::test]
async fn disconnect_clears_session() {
    let ctx = ready().await;
    ctx.manager.handle_event(push_event(1)).await;

    ctx.manager.disconnect().await;

    assert_eq!(ctx.manager.lifecycle(), Lifecycle::Disconnected);
    assert!(ctx.manager.is_empty());
    assert_eq!(ctx.manager.unread_count(), 0);
    assert_eq!(ctx.manager.recipient(), None);
    assert_eq!(ctx.manager.delivery_mode(), DeliveryMode::CacheOnly);
    assert_eq!(ctx.app.subscriber_count(), 0);
    assert_eq!(ctx.realtime.calls().last(), Some(&RealtimeCall::Disconnect));
}

#[tokio::test]
async fn disconnect_is_idempotent() {
    let ctx = TestContext::new();
    ctx.manager.disconnect().await;
    assert_eq!(ctx.manager.lifecycle(), Lifecycle::Uninitialized);
    assert!(ctx.realtime.calls().is_empty());

    assert!(ctx.initialize().await);
    ctx.manager.disconnect().await;
    ctx.manager.disconnect().await;

    assert_eq!(ctx.manager.lifecycle(), Lifecycle::Disconnected);
    let disconnects = ctx
        .realtime
        .calls()
        .into_iter()
        .filter(|c| *c == RealtimeCall::Disconnect)
        .count();
    assert_eq!(disconnects, 1);
}

#[tokio::test]
async fn mark_as_read_after_disconnect_is_inert() {
    let ctx = ready().await;
    ctx.manager.handle_event(push_event(1)).await;
    ctx.manager.disconnect().await;
    ctx.observer.clear();

    assert!(!ctx.manager.mark_as_read(id(1)));
    assert!(!ctx.manager.mark_all_as_read());
    assert!(ctx.observer.all().is_empty());
}

#[tokio::test]
async fn late_deliveries_after_disconnect_are_dropped() {
    let ctx = ready().await;
    ctx.manager.disconnect().await;

    // The push adapter still holds a sender; it stops accepting once the
    // pump is gone.
    eventually(|| !ctx.push.deliver(push_payload(9))).await;
    assert!(!ctx.realtime.emit_notification(realtime_payload(9)));
    ctx.manager.handle_event(push_event(9)).await;

    assert!(ctx.manager.is_empty());
    assert!(ctx.observer.all().is_empty());
}

#[tokio::test]
async fn reinitialize_replaces_session() {
    let ctx = ready().await;
    ctx.manager.handle_event(push_event(1)).await;
    let other = RecipientId::new(200);

    let ok = ctx
        .manager
        .initialize(Credentials::new("token-2", other), Callbacks::new(), None)
        .await;

    assert!(ok);
    assert!(ctx.manager.is_empty());
    assert_eq!(ctx.manager.recipient(), Some(other));
    assert_eq!(
        ctx.realtime.calls(),
        vec![
            RealtimeCall::Connect {
                recipient_id: TEST_RECIPIENT
            },
            RealtimeCall::Disconnect,
            RealtimeCall::Connect {
                recipient_id: other
            },
        ]
    );
    assert_eq!(ctx.app.subscriber_count(), 1);
}

#[tokio::test]
async fn reinitialize_keeps_unreplaced_callbacks() {
    let ctx = ready().await;
    let replaced = Arc::new(Mutex::new(Vec::new()));

    ctx.manager
        .initialize(
            TestContext::credentials(),
            Callbacks::new().on_unread_count_change({
                let replaced = replaced.clone();
                move |n| replaced.lock().push(n)
            }),
            None,
        )
        .await;
    ctx.observer.clear();
    ctx.manager.handle_event(push_event(1)).await;

    assert_eq!(ctx.observer.notifications(), vec![Observed::New(id(1))]);
    assert_eq!(*replaced.lock(), vec![1]);
}

#[tokio::test]
async fn disconnect_drops_callbacks() {
    let ctx = ready().await;
    ctx.manager.disconnect().await;

    ctx.manager
        .initialize(TestContext::credentials(), Callbacks::new(), None)
        .await;
    ctx.observer.clear();
    ctx.manager.handle_event(push_event(1)).await;

    assert!(ctx.observer.all().is_empty());
    assert_eq!(ctx.manager.len(), 1);
}

#[tokio::test]
async fn callbacks_registered_before_initialize_survive_it() {
    let ctx = TestContext::new();
    ctx.manager.set_callbacks(ctx.observer.callbacks());

    ctx.manager
        .initialize(TestContext::credentials(), Callbacks::new(), None)
        .await;
    ctx.manager.handle_event(push_event(1)).await;

    assert_eq!(ctx.observer.count_new(), 1);
}

#[tokio::test]
async fn events_before_ready_are_ignored() {
    let ctx = TestContext::new();
    ctx.manager.handle_event(push_event(1)).await;
    assert!(ctx.manager.is_empty());
}
