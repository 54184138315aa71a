// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notification manager tests

mod cache;
mod degraded;
mod ingestion;
mod lifecycle;
mod overlap;
mod reads;
mod resync;

use super::*;
use crate::test_helpers::{eventually, test_config, Observed, TestContext};
use inbox_core::test_support::{
    push_event, push_payload, read_event, realtime_event, realtime_payload, stats_event,
    unread_record, TEST_RECIPIENT,
};
use inbox_core::AppState;
use inbox_storage::{cache_key, CachedNotifications};
use std::time::Duration;

fn id(n: i64) -> NotificationId {
    NotificationId::new(n)
}

fn ids(records: &[NotificationRecord]) -> Vec<i64> {
    records.iter().map(|r| r.id.get()).collect()
}

/// Initialized context with both channels up
async fn ready() -> TestContext {
    let ctx = TestContext::new();
    assert!(ctx.initialize().await);
    ctx
}

fn test_cache_key() -> String {
    cache_key(crate::DEFAULT_CACHE_KEY_PREFIX, TEST_RECIPIENT)
}

/// Decode whatever the manager last wrote for the test recipient
fn persisted(ctx: &TestContext) -> Option<CachedNotifications> {
    ctx.kv
        .peek(&test_cache_key())
        .and_then(|raw| CachedNotifications::decode(&raw, TEST_RECIPIENT).ok())
}

/// Seed a cache for the test recipient written `age` before the fake clock
fn seed_cache(ctx: &TestContext, records: &[NotificationRecord], unread: u32, age: Duration) {
    let saved_at = ctx.clock.epoch_ms() - age.as_millis() as u64;
    let cache = CachedNotifications::capture(TEST_RECIPIENT, records, unread, 50, saved_at);
    ctx.kv.insert(&test_cache_key(), &cache.encode().unwrap());
}
