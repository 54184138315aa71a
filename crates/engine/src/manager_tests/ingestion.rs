// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use inbox_core::test_support::read_record;
use serde_json::json;

#[tokio::test]
async fn same_id_on_both_channels_is_admitted_once() {
    let ctx = ready().await;
    ctx.observer.clear();

    ctx.manager.handle_event(push_event(1)).await;
    ctx.clock.advance(Duration::from_millis(50));
    ctx.manager.handle_event(realtime_event(1)).await;

    assert_eq!(ctx.manager.len(), 1);
    assert_eq!(ctx.manager.unread_count(), 1);
    assert_eq!(
        ctx.observer.notifications(),
        vec![Observed::New(id(1)), Observed::Count(1)]
    );
}

#[tokio::test]
async fn adapter_deliveries_are_deduplicated() {
    let ctx = ready().await;
    ctx.observer.clear();

    assert!(ctx.push.deliver(push_payload(1)));
    assert!(ctx.realtime.emit_notification(realtime_payload(1)));
    assert!(ctx.realtime.emit_notification(realtime_payload(2)));
    // Events are pumped in order, so id 2 landing means id 1 was settled.
    eventually(|| ctx.manager.get(id(2)).is_some()).await;

    assert_eq!(ids(&ctx.manager.list()), vec![2, 1]);
    assert_eq!(ctx.observer.count_new(), 2);
}

#[tokio::test]
async fn malformed_payloads_are_dropped() {
    let ctx = ready().await;
    ctx.observer.clear();

    for payload in [
        json!("not an object"),
        json!({"recipient_id": TEST_RECIPIENT.get(), "title": "no id"}),
        json!({"id": "abc", "recipient_id": TEST_RECIPIENT.get(), "title": "t"}),
    ] {
        ctx.manager
            .handle_event(ChannelEvent::NotificationCreated {
                source: Channel::Push,
                payload,
            })
            .await;
    }

    assert!(ctx.manager.is_empty());
    assert!(ctx.observer.all().is_empty());
}

#[tokio::test]
async fn payloads_for_other_recipients_are_dropped() {
    let ctx = ready().await;
    ctx.observer.clear();
    let mut payload = realtime_payload(1);
    payload["recipient_id"] = json!(TEST_RECIPIENT.get() + 1);

    ctx.manager
        .handle_event(ChannelEvent::NotificationCreated {
            source: Channel::Realtime,
            payload,
        })
        .await;

    assert!(ctx.manager.is_empty());
    assert!(ctx.observer.all().is_empty());
}

#[tokio::test]
async fn dropped_payload_does_not_consume_dedup_slot() {
    let ctx = ready().await;
    let mut bad = realtime_payload(1);
    bad["created_at"] = json!("later");

    ctx.manager
        .handle_event(ChannelEvent::NotificationCreated {
            source: Channel::Realtime,
            payload: bad,
        })
        .await;
    ctx.manager.handle_event(push_event(1)).await;

    assert_eq!(ctx.manager.len(), 1);
}

#[tokio::test]
async fn stats_snapshot_overrides_local_count() {
    let ctx = ready().await;
    for n in 1..=3 {
        ctx.manager.handle_event(push_event(n)).await;
    }
    assert_eq!(ctx.manager.unread_count(), 3);
    ctx.observer.clear();

    ctx.manager.handle_event(stats_event(5)).await;

    assert_eq!(ctx.manager.unread_count(), 5);
    assert_eq!(ctx.observer.notifications(), vec![Observed::Count(5)]);
}

#[tokio::test]
async fn server_read_marks_record() {
    let ctx = ready().await;
    ctx.manager.handle_event(push_event(1)).await;
    ctx.observer.clear();

    ctx.manager.handle_event(read_event(1)).await;

    let record = ctx.manager.get(id(1)).unwrap();
    assert!(record.is_read);
    assert!(record.read_at.is_some());
    assert_eq!(ctx.manager.unread_count(), 0);
    assert_eq!(
        ctx.observer.notifications(),
        vec![Observed::Read(id(1)), Observed::Count(0)]
    );
}

#[tokio::test]
async fn server_read_for_unknown_id_is_ignored() {
    let ctx = ready().await;
    ctx.observer.clear();

    ctx.manager.handle_event(read_event(42)).await;

    assert!(ctx.observer.all().is_empty());
}

#[tokio::test]
async fn server_all_read_clears_unread() {
    let ctx = ready().await;
    ctx.manager.handle_event(push_event(1)).await;
    ctx.manager.handle_event(push_event(2)).await;
    ctx.observer.clear();

    ctx.manager.handle_event(ChannelEvent::AllRead).await;

    assert!(ctx.manager.list_unread().is_empty());
    assert_eq!(ctx.observer.notifications(), vec![Observed::Count(0)]);
}

#[tokio::test]
async fn already_read_payload_does_not_raise_count() {
    let ctx = ready().await;
    ctx.observer.clear();
    let payload = serde_json::to_value(read_record(1)).unwrap();

    ctx.manager
        .handle_event(ChannelEvent::NotificationCreated {
            source: Channel::Realtime,
            payload,
        })
        .await;

    assert_eq!(ctx.manager.len(), 1);
    assert_eq!(ctx.manager.unread_count(), 0);
    assert_eq!(ctx.observer.notifications(), vec![Observed::New(id(1))]);
}

#[tokio::test]
async fn channel_failure_reaches_error_subscriber() {
    let ctx = ready().await;
    ctx.observer.clear();

    assert!(ctx.realtime.emit(ChannelEvent::ChannelFailed {
        channel: Channel::Realtime,
        message: "socket closed".to_string(),
    }));
    eventually(|| !ctx.observer.errors().is_empty()).await;

    assert_eq!(
        ctx.observer.errors(),
        vec![ManagerError::Channel {
            channel: Channel::Realtime,
            message: "socket closed".to_string(),
        }]
    );
}

#[tokio::test]
async fn connection_changes_are_forwarded_once() {
    let ctx = ready().await;
    ctx.observer.clear();

    for state in [
        ConnectionState::Reconnecting,
        ConnectionState::Reconnecting,
        ConnectionState::Connected,
    ] {
        ctx.manager
            .handle_event(ChannelEvent::ConnectionStateChanged { state })
            .await;
    }

    assert_eq!(
        ctx.observer.all(),
        vec![
            Observed::Connection(ConnectionState::Reconnecting),
            Observed::Connection(ConnectionState::Connected),
        ]
    );
    assert_eq!(ctx.manager.connection_state(), ConnectionState::Connected);
}

#[tokio::test]
async fn redelivery_after_window_updates_in_place() {
    let ctx = ready().await;
    ctx.manager.handle_event(push_event(1)).await;
    ctx.observer.clear();

    ctx.clock.advance(Duration::from_secs(6));
    ctx.manager.handle_event(realtime_event(1)).await;

    assert_eq!(ctx.manager.len(), 1);
    assert_eq!(ctx.manager.unread_count(), 1);
    assert_eq!(ctx.observer.count_new(), 0);
}

#[tokio::test]
async fn redelivery_keeps_local_read_state() {
    let ctx = ready().await;
    ctx.manager.handle_event(push_event(1)).await;
    assert!(ctx.manager.mark_as_read(id(1)));

    ctx.clock.advance(Duration::from_secs(6));
    ctx.manager.handle_event(realtime_event(1)).await;

    assert!(ctx.manager.get(id(1)).unwrap().is_read);
    assert_eq!(ctx.manager.unread_count(), 0);
}

#[tokio::test]
async fn redelivery_read_without_timestamp_is_stamped_at_ingest() {
    let ctx = ready().await;
    ctx.manager.handle_event(push_event(1)).await;
    let mut read = realtime_payload(1);
    read["is_read"] = json!(true);

    ctx.clock.advance(Duration::from_secs(6));
    ctx.manager
        .handle_event(ChannelEvent::NotificationCreated {
            source: Channel::Realtime,
            payload: read,
        })
        .await;

    let record = ctx.manager.get(id(1)).unwrap();
    assert!(record.is_read);
    assert_eq!(record.read_at, Some(ctx.clock.utc_now()));
    assert_eq!(ctx.manager.unread_count(), 0);
}

#[tokio::test]
async fn custom_dedup_window_is_honored() {
    let ctx = TestContext::with_config(test_config().with_dedup_window(Duration::from_millis(100)));
    assert!(ctx.initialize().await);
    ctx.manager.handle_event(push_event(1)).await;
    assert!(ctx.manager.mark_as_read(id(1)));
    ctx.observer.clear();
    let mut edited = realtime_payload(1);
    edited["title"] = json!("Edited");

    ctx.clock.advance(Duration::from_millis(150));
    ctx.manager
        .handle_event(ChannelEvent::NotificationCreated {
            source: Channel::Realtime,
            payload: edited,
        })
        .await;

    // Past the window the copy is admitted and replaces the record in place
    let record = ctx.manager.get(id(1)).unwrap();
    assert_eq!(record.title, "Edited");
    assert!(record.is_read);
    assert_eq!(ctx.observer.count_new(), 0);
}

#[tokio::test]
async fn duplicate_inside_window_is_not_applied() {
    let ctx = ready().await;
    ctx.manager.handle_event(push_event(1)).await;
    let mut edited = realtime_payload(1);
    edited["title"] = json!("Edited");

    ctx.clock.advance(Duration::from_millis(4999));
    ctx.manager
        .handle_event(ChannelEvent::NotificationCreated {
            source: Channel::Realtime,
            payload: edited,
        })
        .await;

    assert_eq!(ctx.manager.get(id(1)).unwrap().title, "Notification 1");
}
