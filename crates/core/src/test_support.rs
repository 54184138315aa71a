// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{Channel, ChannelEvent, NotificationId, NotificationRecord, Priority, RecipientId};
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::{json, Value};

/// Recipient used by every factory below.
pub const TEST_RECIPIENT: RecipientId = RecipientId::new(100);

/// Base timestamp for records: 2026-01-01T00:00:00Z.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

// ── Record factory functions ────────────────────────────────────────────────

/// Unread record whose `created_at` is `id` minutes after [`base_time`].
pub fn unread_record(id: i64) -> NotificationRecord {
    NotificationRecord {
        id: NotificationId::new(id),
        recipient_id: TEST_RECIPIENT,
        title: format!("Notification {id}"),
        message: format!("Body {id}"),
        priority: Priority::Normal,
        kind: "general".to_string(),
        action_url: None,
        image_url: None,
        is_read: false,
        is_delivered: true,
        created_at: base_time() + Duration::minutes(id),
        read_at: None,
    }
}

pub fn read_record(id: i64) -> NotificationRecord {
    let mut record = unread_record(id);
    record.is_read = true;
    record.read_at = Some(record.created_at + Duration::seconds(30));
    record
}

// ── Payload / event factory functions ───────────────────────────────────────

/// Typed realtime-style payload for an unread record.
pub fn realtime_payload(id: i64) -> Value {
    json!({
        "id": id,
        "recipient_id": TEST_RECIPIENT.get(),
        "title": format!("Notification {id}"),
        "message": format!("Body {id}"),
        "priority": "normal",
        "type": "general",
        "is_read": false,
        "is_delivered": true,
        "created_at": (base_time() + Duration::minutes(id)).to_rfc3339(),
    })
}

/// Stringly push-style payload wrapped in a `data` envelope.
pub fn push_payload(id: i64) -> Value {
    json!({
        "data": {
            "id": id.to_string(),
            "recipient_id": TEST_RECIPIENT.get().to_string(),
            "title": format!("Notification {id}"),
            "message": format!("Body {id}"),
            "priority": "normal",
            "type": "general",
            "is_read": "false",
            "is_delivered": "true",
            "created_at": (base_time() + Duration::minutes(id)).to_rfc3339(),
        }
    })
}

pub fn push_event(id: i64) -> ChannelEvent {
    ChannelEvent::NotificationCreated {
        source: Channel::Push,
        payload: push_payload(id),
    }
}

pub fn realtime_event(id: i64) -> ChannelEvent {
    ChannelEvent::NotificationCreated {
        source: Channel::Realtime,
        payload: realtime_payload(id),
    }
}

pub fn read_event(id: i64) -> ChannelEvent {
    ChannelEvent::NotificationRead {
        id: NotificationId::new(id),
        read_at: None,
    }
}

pub fn stats_event(unread_count: u32) -> ChannelEvent {
    ChannelEvent::StatsUpdated {
        unread_count,
        total_count: None,
    }
}
