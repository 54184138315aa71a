// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn mutations_are_written_through() {
    let ctx = ready().await;

    ctx.manager.handle_event(push_event(1)).await;
    eventually(|| persisted(&ctx).is_some_and(|c| c.notifications.len() == 1)).await;

    assert!(ctx.manager.mark_as_read(id(1)));
    eventually(|| persisted(&ctx).is_some_and(|c| c.unread_count == 0)).await;

    let cache = persisted(&ctx).unwrap();
    assert_eq!(cache.recipient_id, TEST_RECIPIENT);
    assert!(cache.notifications[0].is_read);
}

#[tokio::test]
async fn fresh_cache_warms_the_store() {
    let ctx = TestContext::new();
    let records: Vec<_> = (1..=3).map(unread_record).collect();
    seed_cache(&ctx, &records, 3, Duration::from_secs(600));

    assert!(ctx.initialize().await);

    assert_eq!(ids(&ctx.manager.list()), vec![3, 2, 1]);
    assert_eq!(ctx.manager.unread_count(), 3);
    assert!(ctx.observer.all().contains(&Observed::Count(3)));
}

#[tokio::test]
async fn restored_records_are_not_announced_as_new() {
    let ctx = TestContext::new();
    seed_cache(&ctx, &[unread_record(1)], 1, Duration::ZERO);
    assert!(ctx.initialize().await);
    ctx.observer.clear();

    ctx.manager.handle_event(push_event(1)).await;

    assert_eq!(ctx.observer.count_new(), 0);
    assert_eq!(ctx.manager.unread_count(), 1);
}

async fn assert_stale(age: Duration) {
    let ctx = TestContext::new();
    seed_cache(&ctx, &[unread_record(1)], 1, age);

    assert!(ctx.initialize().await);

    assert!(ctx.manager.is_empty());
    assert_eq!(ctx.manager.unread_count(), 0);
}

#[tokio::test]
async fn cache_at_max_age_is_stale() {
    assert_stale(crate::DEFAULT_CACHE_MAX_AGE).await;
}

#[tokio::test]
async fn day_old_cache_is_stale() {
    assert_stale(Duration::from_secs(86_400)).await;
}

#[tokio::test]
async fn corrupt_cache_starts_empty() {
    let ctx = TestContext::new();
    ctx.kv.insert(&test_cache_key(), "{\"v\":1,\"notifications\":");

    assert!(ctx.initialize().await);

    assert!(ctx.manager.is_empty());
    assert!(ctx.observer.errors().is_empty());
    assert_eq!(ctx.kv.peek(&test_cache_key()), None);
}

#[tokio::test]
async fn cache_is_capped_to_newest_records() {
    let ctx = TestContext::with_config(test_config().with_cache_capacity(2));
    assert!(ctx.initialize().await);
    for n in [1, 3, 2] {
        ctx.manager.handle_event(push_event(n)).await;
    }

    assert!(ctx.manager.flush_cache().await);

    let cache = persisted(&ctx).unwrap();
    assert_eq!(ids(&cache.notifications), vec![3, 2]);
    assert_eq!(cache.unread_count, 3);
    // The in-memory store is not capped
    assert_eq!(ctx.manager.len(), 3);
}

#[tokio::test]
async fn write_failures_are_swallowed() {
    let ctx = ready().await;
    ctx.kv.fail_writes("disk full");
    ctx.observer.clear();

    ctx.manager.handle_event(push_event(1)).await;
    assert!(!ctx.manager.flush_cache().await);

    assert_eq!(ctx.manager.len(), 1);
    assert_eq!(ctx.kv.write_count(), 0);
    assert_eq!(
        ctx.observer.notifications(),
        vec![Observed::New(id(1)), Observed::Count(1)]
    );
}

#[tokio::test]
async fn cache_is_scoped_to_recipient() {
    let ctx = TestContext::new();
    let other = RecipientId::new(200);
    let other_key = cache_key(crate::DEFAULT_CACHE_KEY_PREFIX, other);
    let other_cache =
        CachedNotifications::capture(other, &[unread_record(7)], 1, 50, ctx.clock.epoch_ms());
    ctx.kv.insert(&other_key, &other_cache.encode().unwrap());

    assert!(ctx.initialize().await);
    ctx.manager.handle_event(push_event(1)).await;
    assert!(ctx.manager.flush_cache().await);

    assert_eq!(ids(&ctx.manager.list()), vec![1]);
    assert_eq!(ctx.kv.peek(&other_key), Some(other_cache.encode().unwrap()));
}

#[tokio::test]
async fn custom_prefix_changes_cache_key() {
    let mut config = test_config();
    config.cache_key_prefix = "inbox".to_string();
    let ctx = TestContext::with_config(config);
    assert!(ctx.initialize().await);
    ctx.manager.handle_event(push_event(1)).await;

    assert!(ctx.manager.flush_cache().await);

    assert!(ctx.kv.peek(&cache_key("inbox", TEST_RECIPIENT)).is_some());
    assert!(persisted(&ctx).is_none());
}

#[tokio::test]
async fn flush_without_session_returns_false() {
    let ctx = TestContext::new();
    assert!(!ctx.manager.flush_cache().await);

    assert!(ctx.initialize().await);
    ctx.manager.disconnect().await;
    assert!(!ctx.manager.flush_cache().await);
}
