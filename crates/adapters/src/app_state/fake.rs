// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake app-lifecycle observer for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{AppLifecycle, Subscription};
use inbox_core::{AppState, ChannelEvent};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;

#[derive(Default)]
struct FakeAppLifecycleState {
    next_id: u64,
    listeners: HashMap<u64, mpsc::Sender<ChannelEvent>>,
}

/// Fake observer that lets tests drive foreground transitions
#[derive(Clone, Default)]
pub struct FakeAppLifecycle {
    inner: Arc<Mutex<FakeAppLifecycleState>>,
}

impl FakeAppLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().listeners.len()
    }

    /// Report a transition to every live subscriber.
    ///
    /// Returns how many subscribers accepted the event.
    pub fn transition(&self, state: AppState) -> usize {
        let listeners: Vec<_> = self.inner.lock().listeners.values().cloned().collect();
        listeners
            .iter()
            .filter(|tx| tx.try_send(ChannelEvent::AppStateChanged { state }).is_ok())
            .count()
    }
}

impl AppLifecycle for FakeAppLifecycle {
    fn subscribe(&self, event_tx: mpsc::Sender<ChannelEvent>) -> Subscription {
        let id = {
            let mut inner = self.inner.lock();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.listeners.insert(id, event_tx);
            id
        };
        let inner = Arc::clone(&self.inner);
        Subscription::new(move || {
            inner.lock().listeners.remove(&id);
        })
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
