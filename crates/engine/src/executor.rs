// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Effect executor

use crate::callbacks::Callbacks;
use crate::persistence::CacheWriter;
use inbox_core::Effect;
use inbox_storage::CachedNotifications;
use std::sync::Arc;

/// Executes the effects of one mutation, after the state lock is released.
///
/// Holds a snapshot of the callback registry and, when the mutation asked
/// for persistence, the cache captured under the lock. Several
/// `PersistCache` effects in one batch submit a single write.
pub struct Executor {
    callbacks: Callbacks,
    pending_write: Option<(Arc<CacheWriter>, CachedNotifications)>,
}

impl Executor {
    pub fn new(callbacks: Callbacks) -> Self {
        Self {
            callbacks,
            pending_write: None,
        }
    }

    pub fn with_cache(mut self, writer: Arc<CacheWriter>, cache: CachedNotifications) -> Self {
        self.pending_write = Some((writer, cache));
        self
    }

    /// Execute effects in order
    pub fn execute_all(mut self, effects: Vec<Effect>) {
        for effect in effects {
            self.execute(effect);
        }
    }

    /// Execute a single effect with tracing
    pub fn execute(&mut self, effect: Effect) {
        let span = tracing::info_span!("effect", effect = effect.name());
        let _guard = span.enter();
        tracing::debug!(fields = ?effect.fields(), "executing");

        let start = std::time::Instant::now();
        match effect {
            // === Subscriber fan-out ===
            Effect::NotifyNew { record } => self.callbacks.fire_new(&record),
            Effect::NotifyRead { id } => self.callbacks.fire_read(id),
            Effect::NotifyUnreadCount { count } => self.callbacks.fire_unread_count(count),
            Effect::NotifyConnectionState { state } => {
                self.callbacks.fire_connection_state(state)
            }
            Effect::NotifyError { error } => {
                if error.is_reported() {
                    self.callbacks.fire_error(&error);
                } else {
                    tracing::debug!(error = %error, "not reported to subscribers");
                }
            }

            // === Persistence ===
            Effect::PersistCache => match self.pending_write.take() {
                Some((writer, cache)) => writer.submit(cache),
                None => tracing::debug!("cache write already submitted"),
            },
        }
        tracing::debug!(elapsed_us = start.elapsed().as_micros() as u64, "completed");
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
