// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake realtime channel for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{RealtimeChannel, RealtimeError};
use async_trait::async_trait;
use inbox_core::{Channel, ChannelEvent, ConnectionState, Credentials, RecipientId};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};

/// Recorded realtime call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RealtimeCall {
    Connect { recipient_id: RecipientId },
    Disconnect,
}

#[derive(Default)]
struct FakeRealtimeState {
    calls: Vec<RealtimeCall>,
    fail_with: Option<String>,
    status: ConnectionState,
    event_tx: Option<mpsc::Sender<ChannelEvent>>,
    gate: Option<Arc<Semaphore>>,
}

/// Fake realtime channel for testing
#[derive(Clone, Default)]
pub struct FakeRealtimeChannel {
    inner: Arc<Mutex<FakeRealtimeState>>,
}

impl FakeRealtimeChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<RealtimeCall> {
        self.inner.lock().calls.clone()
    }

    /// Number of `connect` calls so far
    pub fn connect_count(&self) -> usize {
        self.inner
            .lock()
            .calls
            .iter()
            .filter(|c| matches!(c, RealtimeCall::Connect { .. }))
            .count()
    }

    /// Make subsequent `connect` calls fail with `message`
    pub fn fail_connect(&self, message: &str) {
        self.inner.lock().fail_with = Some(message.to_string());
    }

    /// Let subsequent `connect` calls succeed again
    pub fn allow_connect(&self) {
        self.inner.lock().fail_with = None;
    }

    /// Hold subsequent `connect` calls after they are recorded, until
    /// [`FakeRealtimeChannel::resume_connect`]
    pub fn pause_connect(&self) {
        self.inner.lock().gate = Some(Arc::new(Semaphore::new(0)));
    }

    /// Release every held `connect` and stop holding new ones
    pub fn resume_connect(&self) {
        if let Some(gate) = self.inner.lock().gate.take() {
            gate.close();
        }
    }

    /// Simulate a dropped stream without telling the manager
    pub fn set_status(&self, status: ConnectionState) {
        self.inner.lock().status = status;
    }

    /// Push an event from the server side.
    ///
    /// Returns false when not connected or the listener is gone.
    pub fn emit(&self, event: ChannelEvent) -> bool {
        let tx = self.inner.lock().event_tx.clone();
        match tx {
            Some(tx) => tx.try_send(event).is_ok(),
            None => false,
        }
    }

    /// Push a raw notification payload from the server side
    pub fn emit_notification(&self, payload: serde_json::Value) -> bool {
        self.emit(ChannelEvent::NotificationCreated {
            source: Channel::Realtime,
            payload,
        })
    }
}

#[async_trait]
impl RealtimeChannel for FakeRealtimeChannel {
    async fn connect(
        &self,
        credentials: &Credentials,
        event_tx: mpsc::Sender<ChannelEvent>,
    ) -> Result<(), RealtimeError> {
        let gate = {
            let mut inner = self.inner.lock();
            inner.calls.push(RealtimeCall::Connect {
                recipient_id: credentials.recipient_id,
            });
            inner.gate.clone()
        };
        if let Some(gate) = gate {
            // Closed once resumed
            let _ = gate.acquire().await;
        }
        let mut inner = self.inner.lock();
        if let Some(message) = inner.fail_with.clone() {
            inner.status = ConnectionState::Failed;
            return Err(RealtimeError::ConnectFailed(message));
        }
        inner.status = ConnectionState::Connected;
        inner.event_tx = Some(event_tx);
        Ok(())
    }

    async fn disconnect(&self) {
        let mut inner = self.inner.lock();
        inner.calls.push(RealtimeCall::Disconnect);
        inner.status = ConnectionState::Disconnected;
        inner.event_tx = None;
    }

    fn status(&self) -> ConnectionState {
        self.inner.lock().status
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
