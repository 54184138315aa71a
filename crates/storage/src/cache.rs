// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Serialized warm-start cache.
//!
//! Holds the most recent records, the unread counter, and the time it was
//! written. One cache exists per recipient; the key embeds the recipient id.

use inbox_core::{NotificationRecord, RecipientId};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Current cache format version
pub const CACHE_VERSION: u32 = 1;

/// Errors from decoding a persisted cache
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cache version {0} is newer than supported ({1})")]
    TooNew(u32, u32),
    #[error("cache belongs to recipient {found}, expected {expected}")]
    WrongRecipient {
        expected: RecipientId,
        found: RecipientId,
    },
}

/// Storage key for a recipient's cache
pub fn cache_key(prefix: &str, recipient: RecipientId) -> String {
    format!("{prefix}_{recipient}")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedNotifications {
    #[serde(rename = "v")]
    pub version: u32,
    pub recipient_id: RecipientId,
    /// Newest first
    pub notifications: Vec<NotificationRecord>,
    pub unread_count: u32,
    pub saved_at_ms: u64,
}

impl CachedNotifications {
    /// Capture the `capacity` most recent records by `created_at`.
    pub fn capture<'a>(
        recipient_id: RecipientId,
        records: impl IntoIterator<Item = &'a NotificationRecord>,
        unread_count: u32,
        capacity: usize,
        saved_at_ms: u64,
    ) -> Self {
        let mut notifications: Vec<NotificationRecord> = records.into_iter().cloned().collect();
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        notifications.truncate(capacity);
        Self {
            version: CACHE_VERSION,
            recipient_id,
            notifications,
            unread_count,
            saved_at_ms,
        }
    }

    pub fn encode(&self) -> Result<String, CacheError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a cache written for `expected`.
    pub fn decode(raw: &str, expected: RecipientId) -> Result<Self, CacheError> {
        let cache: Self = serde_json::from_str(raw)?;
        if cache.version > CACHE_VERSION {
            return Err(CacheError::TooNew(cache.version, CACHE_VERSION));
        }
        if cache.recipient_id != expected {
            return Err(CacheError::WrongRecipient {
                expected,
                found: cache.recipient_id,
            });
        }
        Ok(cache)
    }

    /// Age relative to `now_ms`. A timestamp in the future counts as zero.
    pub fn age(&self, now_ms: u64) -> Duration {
        Duration::from_millis(now_ms.saturating_sub(self.saved_at_ms))
    }

    /// Whether the cache was written strictly less than `max_age` ago.
    pub fn is_fresh(&self, now_ms: u64, max_age: Duration) -> bool {
        self.age(now_ms) < max_age
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
