// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persistence gateway.
//!
//! Loads a recipient's cache at startup, subject to a freshness gate, and
//! writes it back after mutations through a background writer. Writes are
//! best-effort: failures are logged and never reach the mutation path.

use inbox_core::{ManagerError, RecipientId};
use inbox_storage::{cache_key, CachedNotifications, KeyValueStore};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

#[derive(Clone)]
pub struct PersistenceGateway<K> {
    kv: K,
    key: String,
    recipient: RecipientId,
    max_age: Duration,
}

impl<K: KeyValueStore> PersistenceGateway<K> {
    pub fn new(kv: K, prefix: &str, recipient: RecipientId, max_age: Duration) -> Self {
        Self {
            kv,
            key: cache_key(prefix, recipient),
            recipient,
            max_age,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the cache if present, readable, and fresh.
    ///
    /// Every failure mode reads as "no cache". Unreadable values are
    /// quarantined so the next write starts clean.
    pub async fn load(&self, now_ms: u64) -> Option<CachedNotifications> {
        let raw = match self.kv.get(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "no cached notifications");
                return None;
            }
            Err(e) => {
                let error = ManagerError::PersistenceRead(e.to_string());
                warn!(key = %self.key, error = %error, "cache unreadable, starting empty");
                return None;
            }
        };

        let cache = match CachedNotifications::decode(&raw, self.recipient) {
            Ok(cache) => cache,
            Err(e) => {
                let error = ManagerError::PersistenceRead(e.to_string());
                warn!(key = %self.key, error = %error, "cache corrupt, starting empty");
                if let Err(e) = self.kv.quarantine(&self.key).await {
                    warn!(key = %self.key, error = %e, "failed to quarantine cache");
                }
                return None;
            }
        };

        if !cache.is_fresh(now_ms, self.max_age) {
            info!(
                key = %self.key,
                age_ms = cache.age(now_ms).as_millis() as u64,
                max_age_ms = self.max_age.as_millis() as u64,
                "cache stale, starting empty",
            );
            return None;
        }

        info!(
            key = %self.key,
            records = cache.notifications.len(),
            unread = cache.unread_count,
            "restored cached notifications",
        );
        Some(cache)
    }

    pub async fn save(&self, cache: &CachedNotifications) -> Result<(), ManagerError> {
        let raw = cache
            .encode()
            .map_err(|e| ManagerError::PersistenceWrite(e.to_string()))?;
        self.kv
            .set(&self.key, &raw)
            .await
            .map_err(|e| ManagerError::PersistenceWrite(e.to_string()))
    }

    /// Start the background writer for this gateway
    pub fn spawn_writer(&self) -> CacheWriter {
        let (tx, mut rx) = watch::channel::<Option<Arc<CachedNotifications>>>(None);
        let gateway = self.clone();
        let task = tokio::spawn(async move {
            // Exits once the sender is dropped and the last value is written.
            while rx.changed().await.is_ok() {
                let latest = rx.borrow_and_update().clone();
                if let Some(cache) = latest {
                    match gateway.save(&cache).await {
                        Ok(()) => debug!(
                            key = %gateway.key,
                            records = cache.notifications.len(),
                            "cache written",
                        ),
                        Err(e) => warn!(key = %gateway.key, error = %e, "cache write failed"),
                    }
                }
            }
        });
        CacheWriter { tx, task }
    }
}

/// Handle to a background cache writer.
///
/// Submissions coalesce: if several arrive while a write is in flight, only
/// the latest is written next. Dropping the handle lets the writer finish
/// the pending write and exit.
pub struct CacheWriter {
    tx: watch::Sender<Option<Arc<CachedNotifications>>>,
    task: JoinHandle<()>,
}

impl CacheWriter {
    pub fn submit(&self, cache: CachedNotifications) {
        self.tx.send_replace(Some(Arc::new(cache)));
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

#[cfg(test)]
#[path = "persistence_tests.rs"]
mod tests;
