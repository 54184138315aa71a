// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Effects represent side effects a store mutation needs performed.
//!
//! Mutations run under the state lock and only return effects. The executor
//! performs them after the lock is released, so subscribers always observe
//! fully-applied state and may call back into the manager.

use crate::error::ManagerError;
use crate::event::ConnectionState;
use crate::id::NotificationId;
use crate::notification::NotificationRecord;

/// Effects that need to be executed after a mutation
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    // === Subscriber fan-out ===
    /// A record was admitted for the first time
    NotifyNew { record: NotificationRecord },

    /// A record transitioned from unread to read
    NotifyRead { id: NotificationId },

    /// The exposed unread counter changed
    NotifyUnreadCount { count: u32 },

    /// The realtime connection changed state
    NotifyConnectionState { state: ConnectionState },

    /// A fault worth reporting to the error subscriber
    NotifyError { error: ManagerError },

    // === Persistence ===
    /// Schedule a best-effort cache write
    PersistCache,
}

impl Effect {
    pub fn name(&self) -> &'static str {
        match self {
            Effect::NotifyNew { .. } => "notify_new",
            Effect::NotifyRead { .. } => "notify_read",
            Effect::NotifyUnreadCount { .. } => "notify_unread_count",
            Effect::NotifyConnectionState { .. } => "notify_connection_state",
            Effect::NotifyError { .. } => "notify_error",
            Effect::PersistCache => "persist_cache",
        }
    }

    pub fn fields(&self) -> Vec<(&'static str, String)> {
        match self {
            Effect::NotifyNew { record } => vec![
                ("id", record.id.to_string()),
                ("priority", record.priority.to_string()),
                ("type", record.kind.clone()),
            ],
            Effect::NotifyRead { id } => vec![("id", id.to_string())],
            Effect::NotifyUnreadCount { count } => vec![("count", count.to_string())],
            Effect::NotifyConnectionState { state } => vec![("state", state.to_string())],
            Effect::NotifyError { error } => vec![("error", error.to_string())],
            Effect::PersistCache => vec![],
        }
    }
}

#[cfg(test)]
#[path = "effect_tests.rs"]
mod tests;
