// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use inbox_adapters::RealtimeCall;
use serde_json::json;

const OTHER: RecipientId = RecipientId::new(200);

fn spawn_initialize(ctx: &TestContext, credentials: Credentials) -> tokio::task::JoinHandle<bool> {
    let manager = ctx.manager.clone();
    let callbacks = ctx.observer.callbacks();
    tokio::spawn(async move { manager.initialize(credentials, callbacks, None).await })
}

async fn let_others_run() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn overlapping_initialize_wires_realtime_to_latest_session() {
    let ctx = TestContext::new();
    ctx.realtime.pause_connect();

    let first = spawn_initialize(&ctx, TestContext::credentials());
    eventually(|| ctx.realtime.connect_count() == 1).await;
    let second = spawn_initialize(&ctx, Credentials::new("token-2", OTHER));
    let_others_run().await;
    assert_eq!(ctx.realtime.connect_count(), 1);

    ctx.realtime.resume_connect();
    assert!(first.await.unwrap());
    assert!(second.await.unwrap());

    assert_eq!(ctx.manager.lifecycle(), Lifecycle::Ready);
    assert_eq!(ctx.manager.recipient(), Some(OTHER));
    assert_eq!(
        ctx.realtime.calls(),
        vec![
            RealtimeCall::Connect {
                recipient_id: TEST_RECIPIENT
            },
            RealtimeCall::Disconnect,
            RealtimeCall::Connect { recipient_id: OTHER },
        ]
    );

    let mut payload = realtime_payload(1);
    payload["recipient_id"] = json!(OTHER.get());
    assert!(ctx.realtime.emit_notification(payload));
    eventually(|| ctx.manager.get(id(1)).is_some()).await;
}

#[tokio::test]
async fn disconnect_waits_for_pending_initialize() {
    let ctx = TestContext::new();
    ctx.realtime.pause_connect();

    let init = spawn_initialize(&ctx, TestContext::credentials());
    eventually(|| ctx.realtime.connect_count() == 1).await;
    let disconnect = tokio::spawn({
        let manager = ctx.manager.clone();
        async move { manager.disconnect().await }
    });
    let_others_run().await;
    assert_eq!(ctx.manager.lifecycle(), Lifecycle::Initializing);

    ctx.realtime.resume_connect();
    assert!(init.await.unwrap());
    disconnect.await.unwrap();

    assert_eq!(ctx.manager.lifecycle(), Lifecycle::Disconnected);
    assert_eq!(ctx.manager.recipient(), None);
    assert_eq!(ctx.realtime.status(), ConnectionState::Disconnected);
    assert_eq!(ctx.realtime.calls().last(), Some(&RealtimeCall::Disconnect));
    assert!(!ctx.realtime.emit_notification(realtime_payload(1)));
}
