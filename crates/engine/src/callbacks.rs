// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subscriber callback registry.
//!
//! Five named slots. Registering is a merge: slots left unset in the update
//! keep their previous handler. Each handler runs isolated; a panicking
//! handler is logged and the remaining slots still fire.

use inbox_core::{ConnectionState, ManagerError, NotificationId, NotificationRecord};
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

type Slot<T> = Option<Arc<dyn Fn(T) + Send + Sync>>;
type RefSlot<T> = Option<Arc<dyn Fn(&T) + Send + Sync>>;

#[derive(Clone, Default)]
pub struct Callbacks {
    on_new_notification: RefSlot<NotificationRecord>,
    on_notification_read: Slot<NotificationId>,
    on_unread_count_change: Slot<u32>,
    on_connection_state_change: Slot<ConnectionState>,
    on_error: RefSlot<ManagerError>,
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_new_notification(
        mut self,
        f: impl Fn(&NotificationRecord) + Send + Sync + 'static,
    ) -> Self {
        self.on_new_notification = Some(Arc::new(f));
        self
    }

    pub fn on_notification_read(mut self, f: impl Fn(NotificationId) + Send + Sync + 'static) -> Self {
        self.on_notification_read = Some(Arc::new(f));
        self
    }

    pub fn on_unread_count_change(mut self, f: impl Fn(u32) + Send + Sync + 'static) -> Self {
        self.on_unread_count_change = Some(Arc::new(f));
        self
    }

    pub fn on_connection_state_change(
        mut self,
        f: impl Fn(ConnectionState) + Send + Sync + 'static,
    ) -> Self {
        self.on_connection_state_change = Some(Arc::new(f));
        self
    }

    pub fn on_error(mut self, f: impl Fn(&ManagerError) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Arc::new(f));
        self
    }

    /// Overwrite only the slots `update` sets
    pub fn merge(&mut self, update: Callbacks) {
        let Callbacks {
            on_new_notification,
            on_notification_read,
            on_unread_count_change,
            on_connection_state_change,
            on_error,
        } = update;
        if on_new_notification.is_some() {
            self.on_new_notification = on_new_notification;
        }
        if on_notification_read.is_some() {
            self.on_notification_read = on_notification_read;
        }
        if on_unread_count_change.is_some() {
            self.on_unread_count_change = on_unread_count_change;
        }
        if on_connection_state_change.is_some() {
            self.on_connection_state_change = on_connection_state_change;
        }
        if on_error.is_some() {
            self.on_error = on_error;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.registered().is_empty()
    }

    /// Names of the registered slots
    pub fn registered(&self) -> Vec<&'static str> {
        [
            ("on_new_notification", self.on_new_notification.is_some()),
            ("on_notification_read", self.on_notification_read.is_some()),
            ("on_unread_count_change", self.on_unread_count_change.is_some()),
            (
                "on_connection_state_change",
                self.on_connection_state_change.is_some(),
            ),
            ("on_error", self.on_error.is_some()),
        ]
        .into_iter()
        .filter(|(_, set)| *set)
        .map(|(name, _)| name)
        .collect()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn fire_new(&self, record: &NotificationRecord) {
        if let Some(f) = &self.on_new_notification {
            guarded("on_new_notification", || f(record));
        }
    }

    pub(crate) fn fire_read(&self, id: NotificationId) {
        if let Some(f) = &self.on_notification_read {
            guarded("on_notification_read", || f(id));
        }
    }

    pub(crate) fn fire_unread_count(&self, count: u32) {
        if let Some(f) = &self.on_unread_count_change {
            guarded("on_unread_count_change", || f(count));
        }
    }

    pub(crate) fn fire_connection_state(&self, state: ConnectionState) {
        if let Some(f) = &self.on_connection_state_change {
            guarded("on_connection_state_change", || f(state));
        }
    }

    pub(crate) fn fire_error(&self, error: &ManagerError) {
        if let Some(f) = &self.on_error {
            guarded("on_error", || f(error));
        }
    }
}

/// Run a subscriber, containing any panic.
fn guarded(slot: &'static str, f: impl FnOnce()) {
    if let Err(payload) = catch_unwind(AssertUnwindSafe(f)) {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic".to_string());
        tracing::warn!(slot, panic = %message, "subscriber callback panicked");
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("registered", &self.registered())
            .finish()
    }
}

#[cfg(test)]
#[path = "callbacks_tests.rs"]
mod tests;
