// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op realtime channel.

use super::{RealtimeChannel, RealtimeError};
use async_trait::async_trait;
use inbox_core::{ChannelEvent, ConnectionState, Credentials};
use tokio::sync::mpsc;

/// Realtime channel for hosts that only receive push.
///
/// Always fails to connect and reports `Disconnected`.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpRealtimeChannel;

impl NoOpRealtimeChannel {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RealtimeChannel for NoOpRealtimeChannel {
    async fn connect(
        &self,
        _credentials: &Credentials,
        _event_tx: mpsc::Sender<ChannelEvent>,
    ) -> Result<(), RealtimeError> {
        Err(RealtimeError::Unsupported)
    }

    async fn disconnect(&self) {}

    fn status(&self) -> ConnectionState {
        ConnectionState::Disconnected
    }
}

#[cfg(test)]
#[path = "noop_tests.rs"]
mod tests;
