// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! State owned by one authenticated session

use super::DeliveryMode;
use crate::config::ManagerConfig;
use crate::ingest::Ingestor;
use crate::persistence::{CacheWriter, PersistenceGateway};
use crate::store::NotificationStore;
use inbox_adapters::Subscription;
use inbox_core::{ChannelEvent, Credentials};
use inbox_storage::CachedNotifications;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub(super) struct Session<K> {
    pub generation: u64,
    pub credentials: Credentials,
    pub config: ManagerConfig,
    pub store: NotificationStore,
    pub ingestor: Ingestor,
    pub gateway: PersistenceGateway<K>,
    pub writer: Option<Arc<CacheWriter>>,
    /// Kept for realtime resync
    pub event_tx: mpsc::Sender<ChannelEvent>,
    pub push_ready: bool,
    pub realtime_ready: bool,
    pub pump: Option<JoinHandle<()>>,
    pub subscription: Option<Subscription>,
}

impl<K> Session<K> {
    pub fn delivery_mode(&self) -> DeliveryMode {
        DeliveryMode::from_channels(self.push_ready, self.realtime_ready)
    }

    /// Cache contents as of now: the most recent records up to capacity
    pub fn capture(&self, now_ms: u64) -> CachedNotifications {
        CachedNotifications::capture(
            self.credentials.recipient_id,
            self.store.records(),
            self.store.unread_count(),
            self.config.cache_capacity,
            now_ms,
        )
    }

    /// Stop the pump, the foreground observer, and every dedup timer, and
    /// clear the store. The writer is released and finishes any pending
    /// write on its own.
    pub fn close(&mut self) {
        if let Some(pump) = self.pump.take() {
            pump.abort();
        }
        if let Some(mut subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
        self.ingestor.clear();
        self.store.clear();
        self.writer = None;
    }
}
