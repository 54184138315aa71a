// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dedup window.
//!
//! Remembers recently admitted notification ids so the second delivery of
//! the same notification over the other channel is discarded. Each admitted
//! id arms a one-shot expiry timer; expired ids are swept before every
//! admission check and on the pump's periodic tick.

use crate::scheduler::Scheduler;
use inbox_core::{NotificationId, TimerId};
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct DedupWindow {
    window: Duration,
    scheduler: Scheduler,
}

impl DedupWindow {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            scheduler: Scheduler::new(),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Admit `id` unless it was admitted less than one window ago.
    ///
    /// Returns true when admitted; the id is then remembered until
    /// `now + window`.
    pub fn admit(&mut self, id: NotificationId, now: Instant) -> bool {
        self.sweep(now);
        let timer = TimerId::dedup(id);
        if self.scheduler.is_armed(timer.as_str()) {
            return false;
        }
        self.scheduler.set_timer(timer, self.window, now);
        true
    }

    /// Forget ids whose window has elapsed. Returns the expired ids.
    pub fn sweep(&mut self, now: Instant) -> Vec<NotificationId> {
        self.scheduler
            .fired_timers(now)
            .iter()
            .filter_map(TimerId::notification_id)
            .collect()
    }

    pub fn contains(&self, id: NotificationId) -> bool {
        self.scheduler.is_armed(TimerId::dedup(id).as_str())
    }

    pub fn len(&self) -> usize {
        self.scheduler.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scheduler.is_empty()
    }

    /// When the oldest remembered id expires
    pub fn next_expiry(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    /// Cancel every outstanding expiry timer
    pub fn clear(&mut self) {
        self.scheduler.clear();
    }
}

#[cfg(test)]
#[path = "dedup_tests.rs"]
mod tests;
