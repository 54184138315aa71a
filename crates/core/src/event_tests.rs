// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;

#[test]
fn created_event_serializes_with_type_tag() {
    let event = ChannelEvent::NotificationCreated {
        source: Channel::Push,
        payload: json!({"id": "1"}),
    };
    let value = serde_json::to_value(&event).unwrap();
    assert_eq!(value["type"], "notification:created");
    assert_eq!(value["source"], "push");
}

#[test]
fn read_event_round_trips_without_read_at() {
    let json = r#"{"type":"notification:read","id":12}"#;
    let event: ChannelEvent = serde_json::from_str(json).unwrap();
    assert_eq!(
        event,
        ChannelEvent::NotificationRead {
            id: NotificationId::new(12),
            read_at: None,
        }
    );
    assert_eq!(serde_json::to_string(&event).unwrap(), json);
}

#[test]
fn stats_event_parses_optional_total() {
    let event: ChannelEvent =
        serde_json::from_str(r#"{"type":"stats:updated","unread_count":5}"#).unwrap();
    assert_eq!(
        event,
        ChannelEvent::StatsUpdated {
            unread_count: 5,
            total_count: None,
        }
    );
}

#[test]
fn name_matches_serialized_tag() {
    let events = vec![
        ChannelEvent::NotificationCreated {
            source: Channel::Realtime,
            payload: json!({}),
        },
        ChannelEvent::NotificationRead {
            id: NotificationId::new(1),
            read_at: None,
        },
        ChannelEvent::AllRead,
        ChannelEvent::StatsUpdated {
            unread_count: 0,
            total_count: Some(3),
        },
        ChannelEvent::ConnectionStateChanged {
            state: ConnectionState::Connected,
        },
        ChannelEvent::ChannelFailed {
            channel: Channel::Push,
            message: "boom".to_string(),
        },
        ChannelEvent::AppStateChanged {
            state: AppState::Active,
        },
    ];
    for event in events {
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], event.name());
    }
}

#[yare::parameterized(
    flat   = { json!({"id": 7, "title": "secret"}) },
    nested = { json!({"data": {"id": 7, "title": "secret"}}) },
)]
fn log_summary_reports_id_but_not_body(payload: serde_json::Value) {
    let event = ChannelEvent::NotificationCreated {
        source: Channel::Push,
        payload,
    };
    let summary = event.log_summary();
    assert!(summary.contains("id=7"), "summary: {summary}");
    assert!(!summary.contains("secret"));
}

#[test]
fn connection_state_display() {
    assert_eq!(ConnectionState::Reconnecting.to_string(), "reconnecting");
    assert!(ConnectionState::Connected.is_connected());
    assert!(!ConnectionState::Failed.is_connected());
}
