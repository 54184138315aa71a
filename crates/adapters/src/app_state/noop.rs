// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op app-lifecycle observer.

use super::{AppLifecycle, Subscription};
use inbox_core::ChannelEvent;
use tokio::sync::mpsc;

/// Observer for hosts with no foreground concept (daemons, tests).
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpAppLifecycle;

impl NoOpAppLifecycle {
    pub fn new() -> Self {
        Self
    }
}

impl AppLifecycle for NoOpAppLifecycle {
    fn subscribe(&self, _event_tx: mpsc::Sender<ChannelEvent>) -> Subscription {
        Subscription::inert()
    }
}
