// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Realtime event-stream channel adapters

mod noop;

pub use noop::NoOpRealtimeChannel;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeRealtimeChannel, RealtimeCall};

use async_trait::async_trait;
use inbox_core::{ChannelEvent, ConnectionState, Credentials};
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors from realtime channel operations
#[derive(Debug, Error)]
pub enum RealtimeError {
    #[error("realtime unsupported on this host")]
    Unsupported,
    #[error("connect failed: {0}")]
    ConnectFailed(String),
    #[error("authentication rejected: {0}")]
    Unauthorized(String),
}

/// Adapter for the persistent bidirectional event stream.
///
/// While connected, the channel forwards `notification:created`,
/// `notification:read`, `stats:updated`, `connection:state` and
/// `channel:failed` events into `event_tx`. Socket framing and reconnect
/// backoff are the adapter's business.
#[async_trait]
pub trait RealtimeChannel: Clone + Send + Sync + 'static {
    /// Open the stream for `credentials`
    async fn connect(
        &self,
        credentials: &Credentials,
        event_tx: mpsc::Sender<ChannelEvent>,
    ) -> Result<(), RealtimeError>;

    /// Close the stream. Safe to call when already closed.
    async fn disconnect(&self);

    /// Current connection status
    fn status(&self) -> ConnectionState;

    /// Re-establish the stream after the host returns to the foreground.
    ///
    /// The default reconnects only when the stream is not connected.
    async fn resync(
        &self,
        credentials: &Credentials,
        event_tx: mpsc::Sender<ChannelEvent>,
    ) -> Result<(), RealtimeError> {
        if self.status().is_connected() {
            return Ok(());
        }
        self.connect(credentials, event_tx).await
    }
}
