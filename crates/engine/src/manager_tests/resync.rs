// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use inbox_adapters::RealtimeCall;

fn foreground(ctx: &TestContext) {
    ctx.app.transition(AppState::Background);
    ctx.app.transition(AppState::Active);
}

fn connection_events(ctx: &TestContext) -> Vec<Observed> {
    ctx.observer
        .all()
        .into_iter()
        .filter(|o| matches!(o, Observed::Connection(_)))
        .collect()
}

/// Deliver a marker push and wait for it, so earlier events have settled
async fn settle(ctx: &TestContext, marker: i64) {
    assert!(ctx.push.deliver(push_payload(marker)));
    eventually(|| ctx.manager.get(id(marker)).is_some()).await;
}

#[tokio::test]
async fn foreground_reconnects_dropped_stream() {
    let ctx = ready().await;
    ctx.realtime.set_status(ConnectionState::Disconnected);
    ctx.observer.clear();

    foreground(&ctx);
    eventually(|| connection_events(&ctx).len() == 2).await;

    assert_eq!(ctx.realtime.connect_count(), 2);
    assert_eq!(ctx.manager.connection_state(), ConnectionState::Connected);
    assert_eq!(
        connection_events(&ctx),
        vec![
            Observed::Connection(ConnectionState::Reconnecting),
            Observed::Connection(ConnectionState::Connected),
        ]
    );
}

#[tokio::test]
async fn active_without_background_does_not_resync() {
    let ctx = ready().await;
    ctx.realtime.set_status(ConnectionState::Disconnected);

    ctx.app.transition(AppState::Active);
    ctx.app.transition(AppState::Active);
    settle(&ctx, 1).await;

    assert_eq!(ctx.realtime.connect_count(), 1);
}

#[tokio::test]
async fn background_alone_does_nothing() {
    let ctx = ready().await;
    ctx.observer.clear();

    ctx.app.transition(AppState::Background);
    settle(&ctx, 1).await;

    assert_eq!(ctx.realtime.connect_count(), 1);
    assert!(!ctx
        .observer
        .all()
        .iter()
        .any(|o| matches!(o, Observed::Connection(_))));
}

#[tokio::test]
async fn connected_stream_is_left_alone() {
    let ctx = ready().await;
    ctx.observer.clear();

    foreground(&ctx);
    eventually(|| connection_events(&ctx).len() == 2).await;
    settle(&ctx, 1).await;

    assert_eq!(ctx.realtime.connect_count(), 1);
    assert_eq!(ctx.manager.connection_state(), ConnectionState::Connected);
}

#[tokio::test]
async fn failed_resync_reports_error() {
    let ctx = ready().await;
    ctx.realtime.set_status(ConnectionState::Disconnected);
    ctx.realtime.fail_connect("offline");
    ctx.observer.clear();

    foreground(&ctx);
    eventually(|| !ctx.observer.errors().is_empty()).await;

    assert_eq!(ctx.manager.connection_state(), ConnectionState::Failed);
    assert!(matches!(
        &ctx.observer.errors()[0],
        ManagerError::Channel { channel: Channel::Realtime, message } if message.contains("offline")
    ));
    // Push delivery is unaffected
    settle(&ctx, 1).await;
}

#[tokio::test]
async fn resync_after_disconnect_is_inert() {
    let ctx = ready().await;
    ctx.manager.disconnect().await;

    assert_eq!(ctx.app.transition(AppState::Background), 0);
    assert_eq!(ctx.app.transition(AppState::Active), 0);
    assert_eq!(ctx.realtime.connect_count(), 1);
}

#[tokio::test]
async fn push_deliveries_flow_while_resync_is_pending() {
    let ctx = ready().await;
    ctx.realtime.set_status(ConnectionState::Disconnected);
    ctx.realtime.pause_connect();

    foreground(&ctx);
    eventually(|| ctx.realtime.connect_count() == 2).await;
    settle(&ctx, 1).await;
    assert_eq!(ctx.manager.connection_state(), ConnectionState::Reconnecting);

    ctx.realtime.resume_connect();
    eventually(|| ctx.manager.connection_state() == ConnectionState::Connected).await;
}

#[tokio::test]
async fn resync_finishing_after_disconnect_is_inert() {
    let ctx = ready().await;
    ctx.realtime.set_status(ConnectionState::Disconnected);
    ctx.realtime.pause_connect();
    foreground(&ctx);
    eventually(|| ctx.realtime.connect_count() == 2).await;

    let disconnect = tokio::spawn({
        let manager = ctx.manager.clone();
        async move { manager.disconnect().await }
    });
    tokio::task::yield_now().await;
    ctx.realtime.resume_connect();
    disconnect.await.unwrap();

    assert_eq!(ctx.manager.lifecycle(), Lifecycle::Disconnected);
    assert_eq!(ctx.realtime.calls().last(), Some(&RealtimeCall::Disconnect));
    assert!(!ctx.realtime.emit(realtime_event(2)));
}
