// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Canonical notification record

use crate::id::{NotificationId, RecipientId};
use crate::time_fmt::format_age;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Delivery priority assigned by the server
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    #[default]
    Normal,
    High,
    Urgent,
}

impl Priority {
    /// Parse a priority tag, case-insensitively. Unknown tags map to `Normal`.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "high" => Priority::High,
            "urgent" => Priority::Urgent,
            _ => Priority::Normal,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Normal => "normal",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized notification as held by the store.
///
/// This is also the shape exchanged with both delivery channels and the
/// persisted cache, so field names match the wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRecord {
    pub id: NotificationId,
    pub recipient_id: RecipientId,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default = "default_delivered")]
    pub is_delivered: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_at: Option<DateTime<Utc>>,
}

fn default_delivered() -> bool {
    true
}

impl NotificationRecord {
    /// Flip to read and stamp `read_at`.
    ///
    /// Returns false (and changes nothing) when the record is already read,
    /// so `read_at` is only ever set once.
    pub fn mark_read(&mut self, at: DateTime<Utc>) -> bool {
        if self.is_read {
            return false;
        }
        self.is_read = true;
        self.read_at = Some(at);
        true
    }

    /// Short relative age for display: `"just now"`, `"5m ago"`, `"2h ago"`.
    pub fn time_ago(&self, now: DateTime<Utc>) -> String {
        let secs = (now - self.created_at).num_seconds().max(0) as u64;
        if secs < 60 {
            "just now".to_string()
        } else {
            format!("{} ago", format_age(secs))
        }
    }
}

#[cfg(test)]
#[path = "notification_tests.rs"]
mod tests;
