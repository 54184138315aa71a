// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op push channel.

use super::{PushChannel, PushError};
use async_trait::async_trait;
use inbox_core::{ChannelEvent, Credentials};
use tokio::sync::mpsc;

/// Push channel for hosts without platform push.
///
/// Always fails to initialize, so the manager reports realtime-only mode
/// instead of pretending push is live.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpPushChannel;

impl NoOpPushChannel {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PushChannel for NoOpPushChannel {
    async fn initialize(
        &self,
        _credentials: &Credentials,
        _event_tx: mpsc::Sender<ChannelEvent>,
    ) -> Result<(), PushError> {
        Err(PushError::Unsupported)
    }
}

#[cfg(test)]
#[path = "noop_tests.rs"]
mod tests;
