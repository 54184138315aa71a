// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notification store.
//!
//! Holds the records of one recipient keyed by id, plus the exposed unread
//! counter. Mutations return the [`Effect`]s they cause, in the order
//! subscribers must observe them.

use chrono::{DateTime, Utc};
use inbox_core::{Effect, ManagerError, NotificationId, NotificationRecord};
use std::collections::HashMap;

/// Outcome of [`NotificationStore::upsert`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted,
    Updated { became_read: bool },
}

#[derive(Debug, Default)]
pub struct NotificationStore {
    records: HashMap<NotificationId, NotificationRecord>,
    unread_count: u32,
}

impl NotificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records, newest first
    pub fn list(&self) -> Vec<NotificationRecord> {
        let mut records: Vec<_> = self.records.values().cloned().collect();
        sort_newest_first(&mut records);
        records
    }

    /// Unread records, newest first
    pub fn list_unread(&self) -> Vec<NotificationRecord> {
        let mut records: Vec<_> = self
            .records
            .values()
            .filter(|r| !r.is_read)
            .cloned()
            .collect();
        sort_newest_first(&mut records);
        records
    }

    pub fn unread_count(&self) -> u32 {
        self.unread_count
    }

    /// Number of stored records with `is_read == false`
    pub fn count_unread(&self) -> usize {
        self.records.values().filter(|r| !r.is_read).count()
    }

    pub fn get(&self, id: NotificationId) -> Option<&NotificationRecord> {
        self.records.get(&id)
    }

    pub fn contains(&self, id: NotificationId) -> bool {
        self.records.contains_key(&id)
    }

    pub fn records(&self) -> impl Iterator<Item = &NotificationRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Insert or replace by id.
    ///
    /// Read state is sticky: replacing a read record with an unread copy
    /// keeps it read (and keeps its `read_at`). Replacing an unread record
    /// with a read copy applies the read transition, stamping `at` when the
    /// copy carries no `read_at`.
    pub fn upsert(&mut self, mut record: NotificationRecord, at: DateTime<Utc>) -> Upsert {
        match self.records.get_mut(&record.id) {
            None => {
                if !record.is_read {
                    self.unread_count = self.unread_count.saturating_add(1);
                }
                self.records.insert(record.id, record);
                Upsert::Inserted
            }
            Some(existing) => {
                let became_read = !existing.is_read && record.is_read;
                if existing.is_read {
                    record.is_read = true;
                    record.read_at = existing.read_at.or(record.read_at);
                }
                if became_read {
                    record.read_at.get_or_insert(at);
                    self.unread_count = self.unread_count.saturating_sub(1);
                }
                *existing = record;
                Upsert::Updated { became_read }
            }
        }
    }

    /// Upsert an admitted record and report what subscribers see.
    ///
    /// Only a first insertion produces [`Effect::NotifyNew`].
    pub fn admit(&mut self, record: NotificationRecord, at: DateTime<Utc>) -> Vec<Effect> {
        let id = record.id;
        let unread = !record.is_read;
        let mut effects = Vec::new();
        match self.upsert(record.clone(), at) {
            Upsert::Inserted => {
                effects.push(Effect::NotifyNew { record });
                if unread {
                    effects.push(Effect::NotifyUnreadCount {
                        count: self.unread_count,
                    });
                }
            }
            Upsert::Updated { became_read: true } => {
                effects.push(Effect::NotifyRead { id });
                effects.push(Effect::NotifyUnreadCount {
                    count: self.unread_count,
                });
            }
            Upsert::Updated { became_read: false } => {}
        }
        effects.push(Effect::PersistCache);
        effects
    }

    /// Idempotent read transition.
    ///
    /// An already-read record yields no effects. An untracked id is an
    /// error the caller decides how to treat.
    pub fn mark_read(
        &mut self,
        id: NotificationId,
        at: DateTime<Utc>,
    ) -> Result<Vec<Effect>, ManagerError> {
        let record = self
            .records
            .get_mut(&id)
            .ok_or(ManagerError::UnknownReadTarget(id))?;
        if !record.mark_read(at) {
            return Ok(Vec::new());
        }
        self.unread_count = self.unread_count.saturating_sub(1);
        Ok(vec![
            Effect::NotifyRead { id },
            Effect::NotifyUnreadCount {
                count: self.unread_count,
            },
            Effect::PersistCache,
        ])
    }

    /// Mark every unread record read in one pass and reset the counter to 0.
    ///
    /// Produces at most one [`Effect::NotifyUnreadCount`], never one per
    /// record.
    pub fn mark_all_read(&mut self, at: DateTime<Utc>) -> Vec<Effect> {
        let flipped = self
            .records
            .values_mut()
            .map(|r| r.mark_read(at))
            .filter(|flipped| *flipped)
            .count();
        let previous = std::mem::take(&mut self.unread_count);
        if flipped == 0 && previous == 0 {
            return Vec::new();
        }
        vec![
            Effect::NotifyUnreadCount { count: 0 },
            Effect::PersistCache,
        ]
    }

    /// Apply a server-reported unread count. The server value wins.
    pub fn apply_unread_snapshot(&mut self, count: u32) -> Vec<Effect> {
        if count == self.unread_count {
            return Vec::new();
        }
        self.unread_count = count;
        vec![Effect::NotifyUnreadCount { count }, Effect::PersistCache]
    }

    /// Replace contents with a restored cache
    pub fn restore(&mut self, records: Vec<NotificationRecord>, unread_count: u32) {
        self.records = records.into_iter().map(|r| (r.id, r)).collect();
        self.unread_count = unread_count;
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.unread_count = 0;
    }
}

fn sort_newest_first(records: &mut [NotificationRecord]) {
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
