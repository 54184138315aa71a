// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::push::{PushChannel, PushError};
use crate::realtime::{RealtimeChannel, RealtimeError};
use async_trait::async_trait;
use inbox_core::{ChannelEvent, ConnectionState, Credentials};
use tokio::sync::mpsc;
use tracing::Instrument;

/// Wrapper that adds tracing to any PushChannel
#[derive(Clone)]
pub struct TracedPush<P> {
    inner: P,
}

impl<P> TracedPush<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }
}

#[async_trait]
impl<P: PushChannel> PushChannel for TracedPush<P> {
    async fn initialize(
        &self,
        credentials: &Credentials,
        event_tx: mpsc::Sender<ChannelEvent>,
    ) -> Result<(), PushError> {
        let span = tracing::info_span!("push.initialize", recipient_id = %credentials.recipient_id);
        async {
            tracing::info!("starting");
            let start = std::time::Instant::now();
            let result = self.inner.initialize(credentials, event_tx).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(()) => tracing::info!(elapsed_ms, "push registered"),
                Err(e) => tracing::warn!(elapsed_ms, error = %e, "push unavailable"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

/// Wrapper that adds tracing to any RealtimeChannel
#[derive(Clone)]
pub struct TracedRealtime<R> {
    inner: R,
}

impl<R> TracedRealtime<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }
}

#[async_trait]
impl<R: RealtimeChannel> RealtimeChannel for TracedRealtime<R> {
    async fn connect(
        &self,
        credentials: &Credentials,
        event_tx: mpsc::Sender<ChannelEvent>,
    ) -> Result<(), RealtimeError> {
        let span =
            tracing::info_span!("realtime.connect", recipient_id = %credentials.recipient_id);
        async {
            tracing::info!("connecting");
            let start = std::time::Instant::now();
            let result = self.inner.connect(credentials, event_tx).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(()) => tracing::info!(elapsed_ms, "realtime connected"),
                Err(e) => tracing::warn!(elapsed_ms, error = %e, "connect failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn disconnect(&self) {
        self.inner.disconnect().await;
        tracing::info_span!("realtime.disconnect").in_scope(|| tracing::info!("disconnected"));
    }

    fn status(&self) -> ConnectionState {
        let status = self.inner.status();
        tracing::trace!(%status, "checked");
        status
    }

    async fn resync(
        &self,
        credentials: &Credentials,
        event_tx: mpsc::Sender<ChannelEvent>,
    ) -> Result<(), RealtimeError> {
        let span = tracing::info_span!("realtime.resync", recipient_id = %credentials.recipient_id);
        async {
            let before = self.inner.status();
            let result = self.inner.resync(credentials, event_tx).await;
            match &result {
                Ok(()) => tracing::info!(%before, after = %self.inner.status(), "resynced"),
                Err(e) => tracing::warn!(%before, error = %e, "resync failed"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
