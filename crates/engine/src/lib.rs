// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Notification reconciliation engine

mod callbacks;
mod config;
mod dedup;
pub mod env;
mod error;
mod executor;
mod ingest;
mod manager;
mod persistence;
mod scheduler;
mod store;

#[cfg(test)]
mod test_helpers;

pub use callbacks::Callbacks;
pub use config::{
    ManagerConfig, DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_KEY_PREFIX, DEFAULT_CACHE_MAX_AGE,
    DEFAULT_DEDUP_WINDOW, DEFAULT_EVENT_BUFFER, DEFAULT_TIMER_CHECK_INTERVAL,
};
pub use dedup::DedupWindow;
pub use error::ConfigError;
pub use executor::Executor;
pub use ingest::{Ingested, Ingestor};
pub use manager::{DeliveryMode, Lifecycle, ManagerDeps, NotificationManager};
pub use persistence::{CacheWriter, PersistenceGateway};
pub use scheduler::Scheduler;
pub use store::{NotificationStore, Upsert};
