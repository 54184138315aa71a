// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! App-lifecycle observer adapters

mod noop;

pub use noop::NoOpAppLifecycle;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeAppLifecycle;

use inbox_core::ChannelEvent;
use tokio::sync::mpsc;

/// Observer for host foreground/background transitions.
///
/// Each transition is forwarded into `event_tx` as
/// [`ChannelEvent::AppStateChanged`] until the returned subscription is
/// dropped or unsubscribed.
pub trait AppLifecycle: Clone + Send + Sync + 'static {
    fn subscribe(&self, event_tx: mpsc::Sender<ChannelEvent>) -> Subscription;
}

/// Handle that stops an observer when unsubscribed or dropped
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Subscription with nothing to cancel
    pub fn inert() -> Self {
        Self { cancel: None }
    }

    /// Stop receiving transitions. Idempotent.
    pub fn unsubscribe(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
