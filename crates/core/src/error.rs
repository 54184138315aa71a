// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Faults surfaced to subscribers through the `on-error` slot

use crate::event::Channel;
use crate::id::NotificationId;
use thiserror::Error;

/// Errors the manager reports for observability.
///
/// None of these ever cross the public API as a failure: they are forwarded
/// to the error subscriber, logged, or both.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManagerError {
    /// Neither delivery channel came up; the manager runs from cache only
    #[error("initialization failed: push: {push}; realtime: {realtime}")]
    InitializationFailure { push: String, realtime: String },

    /// Forwarded verbatim from an external channel
    #[error("{channel} channel error: {message}")]
    Channel { channel: Channel, message: String },

    /// Cache write failed; logged, never fanned out
    #[error("cache write failed: {0}")]
    PersistenceWrite(String),

    /// Cache unreadable or stale; treated as an empty cache
    #[error("cache read failed: {0}")]
    PersistenceRead(String),

    /// Read event for an id the store is not tracking
    #[error("unknown read target: {0}")]
    UnknownReadTarget(NotificationId),
}

impl ManagerError {
    /// Whether this error is forwarded to the `on-error` subscriber
    pub fn is_reported(&self) -> bool {
        matches!(
            self,
            ManagerError::InitializationFailure { .. } | ManagerError::Channel { .. }
        )
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
