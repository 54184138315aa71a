// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event ingestion.
//!
//! Turns channel events into store mutations: payloads are normalized,
//! checked against the session recipient and the dedup window, then
//! admitted. Server-confirmed reads and stats snapshots reconcile through
//! the same store transitions as local operations.

use crate::dedup::DedupWindow;
use crate::store::NotificationStore;
use chrono::{DateTime, Utc};
use inbox_core::{
    normalize_payload, AppState, Channel, ChannelEvent, ConnectionState, Effect, ManagerError,
    RecipientId,
};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Effects of one event, plus whether the realtime stream should resync
#[derive(Debug, Default, PartialEq)]
pub struct Ingested {
    pub effects: Vec<Effect>,
    pub resync: bool,
}

impl From<Vec<Effect>> for Ingested {
    fn from(effects: Vec<Effect>) -> Self {
        Self {
            effects,
            resync: false,
        }
    }
}

#[derive(Debug)]
pub struct Ingestor {
    recipient: RecipientId,
    dedup: DedupWindow,
    connection: ConnectionState,
    app_state: Option<AppState>,
}

impl Ingestor {
    pub fn new(recipient: RecipientId, dedup_window: Duration) -> Self {
        Self {
            recipient,
            dedup: DedupWindow::new(dedup_window),
            connection: ConnectionState::Disconnected,
            app_state: None,
        }
    }

    pub fn recipient(&self) -> RecipientId {
        self.recipient
    }

    pub fn connection(&self) -> ConnectionState {
        self.connection
    }

    pub fn dedup(&self) -> &DedupWindow {
        &self.dedup
    }

    pub fn ingest(
        &mut self,
        store: &mut NotificationStore,
        event: ChannelEvent,
        now: Instant,
        utc: DateTime<Utc>,
    ) -> Ingested {
        debug!(event = %event.log_summary(), "ingesting");
        match event {
            ChannelEvent::NotificationCreated { source, payload } => {
                self.created(store, source, &payload, now, utc).into()
            }
            ChannelEvent::NotificationRead { id, read_at } => {
                match store.mark_read(id, read_at.unwrap_or(utc)) {
                    Ok(effects) => effects.into(),
                    Err(e) => {
                        debug!(error = %e, "ignoring server read");
                        Ingested::default()
                    }
                }
            }
            ChannelEvent::AllRead => store.mark_all_read(utc).into(),
            ChannelEvent::StatsUpdated { unread_count, .. } => {
                store.apply_unread_snapshot(unread_count).into()
            }
            ChannelEvent::ConnectionStateChanged { state } => self.set_connection(state).into(),
            ChannelEvent::ChannelFailed { channel, message } => {
                warn!(%channel, %message, "channel reported failure");
                vec![Effect::NotifyError {
                    error: ManagerError::Channel { channel, message },
                }]
                .into()
            }
            ChannelEvent::AppStateChanged { state } => {
                let previous = self.app_state.replace(state);
                Ingested {
                    effects: Vec::new(),
                    resync: previous == Some(AppState::Background) && state == AppState::Active,
                }
            }
        }
    }

    fn created(
        &mut self,
        store: &mut NotificationStore,
        source: Channel,
        payload: &serde_json::Value,
        now: Instant,
        utc: DateTime<Utc>,
    ) -> Vec<Effect> {
        let record = match normalize_payload(payload, utc) {
            Ok(record) => record,
            Err(e) => {
                warn!(%source, error = %e, "dropping malformed payload");
                return Vec::new();
            }
        };
        if record.recipient_id != self.recipient {
            warn!(
                %source,
                id = %record.id,
                recipient_id = %record.recipient_id,
                "dropping payload addressed to another recipient",
            );
            return Vec::new();
        }
        if !self.dedup.admit(record.id, now) {
            debug!(%source, id = %record.id, "duplicate delivery suppressed");
            return Vec::new();
        }
        store.admit(record, utc)
    }

    /// Record a realtime connection change; reports it only when it differs
    pub fn set_connection(&mut self, state: ConnectionState) -> Vec<Effect> {
        if self.connection == state {
            return Vec::new();
        }
        debug!(from = %self.connection, to = %state, "connection state");
        self.connection = state;
        vec![Effect::NotifyConnectionState { state }]
    }

    /// Forget expired dedup entries. Returns how many expired.
    pub fn sweep(&mut self, now: Instant) -> usize {
        self.dedup.sweep(now).len()
    }

    /// Cancel every outstanding dedup timer
    pub fn clear(&mut self) {
        self.dedup.clear();
    }
}

#[cfg(test)]
#[path = "ingest_tests.rs"]
mod tests;
