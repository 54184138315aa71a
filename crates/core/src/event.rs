// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events delivered by the external channels

use crate::id::NotificationId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Delivery transport an event arrived on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Push,
    Realtime,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Push => "push",
            Channel::Realtime => "realtime",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Realtime connection status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    Reconnecting,
    Failed,
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected)
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Connected => "connected",
            ConnectionState::Reconnecting => "reconnecting",
            ConnectionState::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Host application foreground state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppState {
    Background,
    Active,
}

/// Events that arrive from the push channel, the realtime channel, or the
/// app-lifecycle observer.
///
/// Serializes with `{"type": "notification:created", ...fields}` format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ChannelEvent {
    // -- notification --
    /// A notification payload, not yet normalized
    #[serde(rename = "notification:created")]
    NotificationCreated {
        source: Channel,
        payload: serde_json::Value,
    },

    /// Server-confirmed read of a single notification
    #[serde(rename = "notification:read")]
    NotificationRead {
        id: NotificationId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        read_at: Option<DateTime<Utc>>,
    },

    /// Server-confirmed read of every notification
    #[serde(rename = "notification:all_read")]
    AllRead,

    // -- stats --
    #[serde(rename = "stats:updated")]
    StatsUpdated {
        unread_count: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        total_count: Option<u32>,
    },

    // -- connection --
    #[serde(rename = "connection:state")]
    ConnectionStateChanged { state: ConnectionState },

    #[serde(rename = "channel:failed")]
    ChannelFailed { channel: Channel, message: String },

    // -- app --
    #[serde(rename = "app:state")]
    AppStateChanged { state: AppState },
}

impl ChannelEvent {
    /// Event type tag, matching the serialized `type` field
    pub fn name(&self) -> &'static str {
        match self {
            ChannelEvent::NotificationCreated { .. } => "notification:created",
            ChannelEvent::NotificationRead { .. } => "notification:read",
            ChannelEvent::AllRead => "notification:all_read",
            ChannelEvent::StatsUpdated { .. } => "stats:updated",
            ChannelEvent::ConnectionStateChanged { .. } => "connection:state",
            ChannelEvent::ChannelFailed { .. } => "channel:failed",
            ChannelEvent::AppStateChanged { .. } => "app:state",
        }
    }

    /// One-line summary for logs. Never includes notification bodies.
    pub fn log_summary(&self) -> String {
        match self {
            ChannelEvent::NotificationCreated { source, payload } => {
                let id = payload
                    .get("id")
                    .or_else(|| payload.get("data").and_then(|d| d.get("id")))
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "?".to_string());
                format!("{} source={} id={}", self.name(), source, id)
            }
            ChannelEvent::NotificationRead { id, .. } => format!("{} id={}", self.name(), id),
            ChannelEvent::AllRead => self.name().to_string(),
            ChannelEvent::StatsUpdated { unread_count, .. } => {
                format!("{} unread={}", self.name(), unread_count)
            }
            ChannelEvent::ConnectionStateChanged { state } => {
                format!("{} state={}", self.name(), state)
            }
            ChannelEvent::ChannelFailed { channel, .. } => {
                format!("{} channel={}", self.name(), channel)
            }
            ChannelEvent::AppStateChanged { state } => format!("{} state={:?}", self.name(), state),
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
