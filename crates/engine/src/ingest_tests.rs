// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use inbox_core::test_support::{
    base_time, push_event, read_event, realtime_event, realtime_payload, stats_event,
    TEST_RECIPIENT,
};
use inbox_core::{Clock, FakeClock, NotificationId};
use serde_json::json;

const WINDOW: Duration = Duration::from_millis(5000);

struct Harness {
    clock: FakeClock,
    store: NotificationStore,
    ingestor: Ingestor,
}

impl Harness {
    fn new() -> Self {
        Self {
            clock: FakeClock::new(),
            store: NotificationStore::new(),
            ingestor: Ingestor::new(TEST_RECIPIENT, WINDOW),
        }
    }

    fn ingest(&mut self, event: ChannelEvent) -> Ingested {
        let now = self.clock.now();
        let utc = self.clock.utc_now();
        self.ingestor.ingest(&mut self.store, event, now, utc)
    }

    fn new_count(effects: &[Effect]) -> usize {
        effects
            .iter()
            .filter(|e| matches!(e, Effect::NotifyNew { .. }))
            .count()
    }
}

#[test]
fn push_then_realtime_within_window_admits_once() {
    let mut h = Harness::new();

    let first = h.ingest(push_event(1));
    h.clock.advance(Duration::from_millis(50));
    let second = h.ingest(realtime_event(1));

    assert_eq!(Harness::new_count(&first.effects), 1);
    assert!(second.effects.is_empty());
    assert_eq!(h.store.len(), 1);
    assert_eq!(h.store.unread_count(), 1);
}

#[test]
fn many_duplicates_inside_window_fire_one_new() {
    let mut h = Harness::new();
    let mut news = 0;

    for i in 0..10 {
        let event = if i % 2 == 0 { push_event(7) } else { realtime_event(7) };
        news += Harness::new_count(&h.ingest(event).effects);
        h.clock.advance(Duration::from_millis(400));
    }

    assert_eq!(news, 1);
    assert_eq!(h.store.unread_count(), 1);
}

#[test]
fn redelivery_after_window_updates_without_new() {
    let mut h = Harness::new();
    h.ingest(push_event(1));
    h.clock.advance(Duration::from_secs(6));

    let again = h.ingest(realtime_event(1));

    assert_eq!(again.effects, vec![Effect::PersistCache]);
    assert_eq!(h.store.len(), 1);
    assert_eq!(h.store.unread_count(), 1);
}

#[test]
fn malformed_payload_is_dropped() {
    let mut h = Harness::new();

    let out = h.ingest(ChannelEvent::NotificationCreated {
        source: Channel::Push,
        payload: json!({"data": {"title": "no id"}}),
    });

    assert_eq!(out, Ingested::default());
    assert!(h.store.is_empty());
    assert!(h.ingestor.dedup().is_empty());
}

#[test]
fn payload_for_other_recipient_is_dropped() {
    let mut h = Harness::new();
    let mut payload = realtime_payload(1);
    payload["recipient_id"] = json!(999);

    let out = h.ingest(ChannelEvent::NotificationCreated {
        source: Channel::Realtime,
        payload,
    });

    assert!(out.effects.is_empty());
    assert!(h.store.is_empty());
    assert!(!h.ingestor.dedup().contains(NotificationId::new(1)));
}

#[test]
fn server_read_applies_transition() {
    let mut h = Harness::new();
    h.ingest(push_event(1));

    let out = h.ingest(read_event(1));

    assert_eq!(out.effects[0], Effect::NotifyRead { id: NotificationId::new(1) });
    assert_eq!(h.store.unread_count(), 0);
    let read_at = h.store.get(NotificationId::new(1)).unwrap().read_at;
    assert_eq!(read_at, Some(h.clock.utc_now()));
}

#[test]
fn server_read_keeps_server_timestamp() {
    let mut h = Harness::new();
    h.ingest(push_event(1));
    let stamped = base_time();

    h.ingest(ChannelEvent::NotificationRead {
        id: NotificationId::new(1),
        read_at: Some(stamped),
    });

    assert_eq!(
        h.store.get(NotificationId::new(1)).unwrap().read_at,
        Some(stamped)
    );
}

#[test]
fn server_read_for_untracked_id_is_ignored() {
    let mut h = Harness::new();
    assert_eq!(h.ingest(read_event(42)), Ingested::default());
}

#[test]
fn all_read_resets_counter_once() {
    let mut h = Harness::new();
    for id in 1..=3 {
        h.ingest(push_event(id));
    }

    let out = h.ingest(ChannelEvent::AllRead);

    assert_eq!(
        out.effects,
        vec![Effect::NotifyUnreadCount { count: 0 }, Effect::PersistCache]
    );
}

#[test]
fn stats_snapshot_overrides_count() {
    let mut h = Harness::new();
    for id in 1..=3 {
        h.ingest(push_event(id));
    }

    let out = h.ingest(stats_event(5));

    assert_eq!(out.effects[0], Effect::NotifyUnreadCount { count: 5 });
    assert_eq!(h.store.unread_count(), 5);
}

#[test]
fn connection_changes_reported_once() {
    let mut h = Harness::new();
    let connected = ChannelEvent::ConnectionStateChanged {
        state: ConnectionState::Connected,
    };

    let first = h.ingest(connected.clone());
    let second = h.ingest(connected);

    assert_eq!(
        first.effects,
        vec![Effect::NotifyConnectionState {
            state: ConnectionState::Connected
        }]
    );
    assert!(second.effects.is_empty());
    assert_eq!(h.ingestor.connection(), ConnectionState::Connected);
}

#[test]
fn channel_failure_becomes_error_effect() {
    let mut h = Harness::new();

    let out = h.ingest(ChannelEvent::ChannelFailed {
        channel: Channel::Realtime,
        message: "token expired".to_string(),
    });

    assert_eq!(
        out.effects,
        vec![Effect::NotifyError {
            error: ManagerError::Channel {
                channel: Channel::Realtime,
                message: "token expired".to_string(),
            }
        }]
    );
}

#[yare::parameterized(
    first_active        = { &[AppState::Active],                                       false },
    active_to_active    = { &[AppState::Active, AppState::Active],                     false },
    to_background       = { &[AppState::Active, AppState::Background],                 false },
    back_to_foreground  = { &[AppState::Active, AppState::Background, AppState::Active], true },
    starts_background   = { &[AppState::Background, AppState::Active],                 true },
)]
fn resync_only_on_return_to_foreground(states: &[AppState], expect_last: bool) {
    let mut h = Harness::new();
    let mut last = false;
    for state in states {
        last = h.ingest(ChannelEvent::AppStateChanged { state: *state }).resync;
    }
    assert_eq!(last, expect_last);
}

#[test]
fn sweep_and_clear_release_dedup_entries() {
    let mut h = Harness::new();
    h.ingest(push_event(1));
    h.ingest(push_event(2));

    h.clock.advance(WINDOW);
    assert_eq!(h.ingestor.sweep(h.clock.now()), 2);

    h.ingest(push_event(3));
    h.ingestor.clear();
    assert!(h.ingestor.dedup().is_empty());
}
