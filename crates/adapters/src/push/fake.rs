// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake push channel for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{PushChannel, PushError};
use async_trait::async_trait;
use inbox_core::{Channel, ChannelEvent, Credentials, RecipientId};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Recorded push call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushCall {
    Initialize { recipient_id: RecipientId },
}

#[derive(Default)]
struct FakePushState {
    calls: Vec<PushCall>,
    fail_with: Option<String>,
    event_tx: Option<mpsc::Sender<ChannelEvent>>,
}

/// Fake push channel for testing
#[derive(Clone, Default)]
pub struct FakePushChannel {
    inner: Arc<Mutex<FakePushState>>,
}

impl FakePushChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<PushCall> {
        self.inner.lock().calls.clone()
    }

    /// Make subsequent `initialize` calls fail with `message`
    pub fn fail_initialize(&self, message: &str) {
        self.inner.lock().fail_with = Some(message.to_string());
    }

    /// Deliver a raw payload as if it arrived from platform push.
    ///
    /// Returns false when no listener is registered or the listener is gone.
    pub fn deliver(&self, payload: serde_json::Value) -> bool {
        let tx = self.inner.lock().event_tx.clone();
        match tx {
            Some(tx) => tx
                .try_send(ChannelEvent::NotificationCreated {
                    source: Channel::Push,
                    payload,
                })
                .is_ok(),
            None => false,
        }
    }
}

#[async_trait]
impl PushChannel for FakePushChannel {
    async fn initialize(
        &self,
        credentials: &Credentials,
        event_tx: mpsc::Sender<ChannelEvent>,
    ) -> Result<(), PushError> {
        let mut inner = self.inner.lock();
        inner.calls.push(PushCall::Initialize {
            recipient_id: credentials.recipient_id,
        });
        if let Some(message) = inner.fail_with.clone() {
            return Err(PushError::RegistrationFailed(message));
        }
        inner.event_tx = Some(event_tx);
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
