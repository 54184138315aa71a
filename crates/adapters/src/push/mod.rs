// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Push delivery channel adapters

mod noop;

pub use noop::NoOpPushChannel;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakePushChannel, PushCall};

use async_trait::async_trait;
use inbox_core::{ChannelEvent, Credentials};
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors from push channel operations
#[derive(Debug, Error)]
pub enum PushError {
    #[error("push unsupported on this host")]
    Unsupported,
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("registration failed: {0}")]
    RegistrationFailed(String),
}

/// Adapter for the platform push channel.
///
/// After a successful `initialize`, the channel forwards every received
/// payload into `event_tx` as [`ChannelEvent::NotificationCreated`] with
/// `source: Channel::Push`. Sends into a closed `event_tx` must be ignored,
/// which makes deliveries after teardown inert.
#[async_trait]
pub trait PushChannel: Clone + Send + Sync + 'static {
    /// Register the device for `credentials` and start forwarding payloads
    async fn initialize(
        &self,
        credentials: &Credentials,
        event_tx: mpsc::Sender<ChannelEvent>,
    ) -> Result<(), PushError>;
}
